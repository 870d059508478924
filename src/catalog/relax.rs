use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::entry::CatalogEntry;

/// Most items a recommendation or suggestion ever returns.
pub const MAX_RESULTS: usize = 5;

pub const NO_FILTERS_LABEL: &str = "No filters applied";

/// Constraint kinds in application order. Relaxation drops from the back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    Genre,
    Language,
    ReleaseYear,
}

impl FilterKind {
    pub const ORDER: [FilterKind; 3] = [FilterKind::Genre, FilterKind::Language, FilterKind::ReleaseYear];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "category" | "genre" => Some(FilterKind::Genre),
            "locale" | "language" => Some(FilterKind::Language),
            "releaseYear" => Some(FilterKind::ReleaseYear),
            _ => None,
        }
    }

    /// Primary names outrank aliases.
    fn name_rank(name: &str) -> u8 {
        match name {
            "genre" | "language" => 0,
            _ => 1,
        }
    }

    fn label_prefix(&self) -> &'static str {
        match self {
            FilterKind::Genre => "Genre",
            FilterKind::Language => "Language",
            FilterKind::ReleaseYear => "Year",
        }
    }
}

/// Requested constraint values. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    pub genre: Option<String>,
    pub language: Option<String>,
    pub release_year: Option<String>,
}

impl ConstraintSet {
    /// Build from raw name/value pairs; unrecognized names are dropped.
    ///
    /// Blank values never clear a slot, and a primary name (`category`,
    /// `locale`) beats its alias whatever order the pairs arrive in.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = ConstraintSet::default();
        let mut ranks: [Option<u8>; 3] = [None; 3];
        for (name, value) in pairs {
            let Some(kind) = FilterKind::from_name(name) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let rank = FilterKind::name_rank(name);
            let slot = &mut ranks[kind as usize];
            if slot.is_some_and(|r| r > rank) {
                continue;
            }
            *slot = Some(rank);
            set.set(kind, value);
        }
        set
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn set(&mut self, kind: FilterKind, value: &str) {
        let value = value.trim();
        let value = if value.is_empty() { None } else { Some(value.to_string()) };
        match kind {
            FilterKind::Genre => self.genre = value,
            FilterKind::Language => self.language = value,
            FilterKind::ReleaseYear => self.release_year = value,
        }
    }

    pub fn get(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Genre => self.genre.as_deref(),
            FilterKind::Language => self.language.as_deref(),
            FilterKind::ReleaseYear => self.release_year.as_deref(),
        }
    }

    /// Kinds that carry a value, in application order.
    pub fn active_filters(&self) -> Vec<FilterKind> {
        FilterKind::ORDER
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }

    fn label(&self, kind: FilterKind) -> Option<String> {
        self.get(kind).map(|v| format!("{}: {}", kind.label_prefix(), v))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation<T> {
    pub items: Vec<T>,
    pub applied: Vec<FilterKind>,
    pub labels: Vec<String>,
}

/// Apply `filters` from `constraints` to `catalog`, keeping catalog order.
pub fn apply_filters<'a, T: CatalogEntry>(
    catalog: &'a [T],
    constraints: &ConstraintSet,
    filters: &[FilterKind],
) -> Vec<&'a T> {
    // An unparsable year matches nothing.
    let year = if filters.contains(&FilterKind::ReleaseYear) {
        match constraints.release_year.as_deref().map(|y| y.parse::<i32>()) {
            Some(Ok(y)) => Some(Some(y)),
            _ => Some(None),
        }
    } else {
        None
    };

    catalog
        .iter()
        .filter(|item| {
            filters.iter().all(|kind| match kind {
                FilterKind::Genre => constraints
                    .genre
                    .as_deref()
                    .is_some_and(|g| item.genre().to_lowercase() == g.to_lowercase()),
                FilterKind::Language => constraints
                    .language
                    .as_deref()
                    .is_some_and(|l| item.language().to_lowercase() == l.to_lowercase()),
                FilterKind::ReleaseYear => match year {
                    Some(Some(y)) => item.release_year() == Some(y),
                    _ => false,
                },
            })
        })
        .collect()
}

pub fn recommend<T: CatalogEntry + Clone>(catalog: &[T], constraints: &ConstraintSet) -> Recommendation<T> {
    recommend_with_rng(catalog, constraints, &mut rand::thread_rng())
}

/// Filter `catalog` by `constraints`, dropping the last applied constraint
/// until something matches. At most [`MAX_RESULTS`] items come back, in
/// random order.
pub fn recommend_with_rng<T, R>(catalog: &[T], constraints: &ConstraintSet, rng: &mut R) -> Recommendation<T>
where
    T: CatalogEntry + Clone,
    R: Rng + ?Sized,
{
    let mut active = constraints.active_filters();

    loop {
        let matched = apply_filters(catalog, constraints, &active);

        if !matched.is_empty() {
            let mut items: Vec<T> = matched.into_iter().cloned().collect();
            items.shuffle(rng);
            items.truncate(MAX_RESULTS);

            let mut labels: Vec<String> = active.iter().filter_map(|k| constraints.label(*k)).collect();
            if labels.is_empty() {
                labels.push(NO_FILTERS_LABEL.to_string());
            }
            debug!(filters = ?active, count = items.len(), "recommendation found");
            return Recommendation { items, applied: active, labels };
        }

        match active.pop() {
            Some(dropped) => debug!(filter = ?dropped, "no match, relaxing filter"),
            None => {
                return Recommendation {
                    items: Vec::new(),
                    applied: Vec::new(),
                    labels: vec![NO_FILTERS_LABEL.to_string()],
                }
            }
        }
    }
}
