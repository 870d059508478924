use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::catalog::{self, ConstraintSet};
use crate::server::AppState;
use crate::util::QueryParams;
use super::error::ApiError;
use super::types::*;

/// Exact search over title, genre and language. When that finds nothing the
/// response carries fallback suggestions and `suggested: true`.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let movies = state.db.list_movies().await?;

    let raw = params.get("q").unwrap_or_default();
    let query = raw.trim();
    if query.is_empty() {
        return Ok(Json(SearchResults { movies, suggested: false, success: true }));
    }

    let found: Vec<_> = catalog::search(&movies, query).into_iter().cloned().collect();
    if !found.is_empty() {
        return Ok(Json(SearchResults { movies: found, suggested: false, success: true }));
    }

    // The matcher sees the query as typed; its first-letter tier keys on
    // the first raw character.
    let facets = catalog::facets(&movies);
    let suggestions = catalog::suggest(&movies, &facets.genres, &facets.languages, raw);
    debug!(query = raw, count = suggestions.len(), "no exact match, returning suggestions");

    Ok(Json(SearchResults { movies: suggestions, suggested: true, success: true }))
}

/// Recommendations for `genre`/`category`, `language`/`locale` and
/// `releaseYear`, relaxed until something matches.
pub async fn recommend_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<RecommendationResults>, ApiError> {
    let movies = state.db.list_movies().await?;
    let constraints = ConstraintSet::from_pairs(params.iter());

    let result = catalog::recommend(&movies, &constraints);

    Ok(Json(RecommendationResults {
        movies: result.items,
        applied_filters: result.labels,
        success: true,
    }))
}

pub async fn recent_movies(State(state): State<AppState>) -> Result<Json<MovieList>, ApiError> {
    let movies = state.db.list_movies().await?;
    let total = movies.len();
    let recent = catalog::recent(&movies, state.config.catalog.recent_limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(MovieList { movies: recent, total, success: true }))
}

pub async fn movie_facets(State(state): State<AppState>) -> Result<Json<FacetList>, ApiError> {
    let movies = state.db.list_movies().await?;
    let facets = catalog::facets(&movies);

    Ok(Json(FacetList {
        genres: facets.genres,
        languages: facets.languages,
        success: true,
    }))
}
