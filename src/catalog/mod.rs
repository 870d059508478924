pub mod browse;
pub mod entry;
pub mod relax;
pub mod search;
pub mod suggest;

pub use browse::{facets, paginate, recent, Facets};
pub use entry::CatalogEntry;
pub use relax::{recommend, recommend_with_rng, ConstraintSet, FilterKind, Recommendation, MAX_RESULTS};
pub use search::search;
pub use suggest::{suggest, suggest_with_rng};
