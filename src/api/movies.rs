use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use tracing::info;

use crate::catalog;
use crate::db::{Movie, MovieUpdate, NewMovie};
use crate::server::AppState;
use crate::util::QueryParams;
use super::auth::AuthUser;
use super::error::ApiError;
use super::types::*;

pub async fn add_movie(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<NewMovie>,
) -> Result<Json<MessageResponse>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Movie name is required".to_string()));
    }

    let movie = req.into_movie(Some(user_id));
    state.db.create_movie(&movie).await?;

    info!(movie = %movie.id, name = %movie.name, "movie added");
    Ok(Json(MessageResponse::ok("Movie added successfully")))
}

/// All movies, or one page of them when `page` is given.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<MovieList>, ApiError> {
    let movies = state.db.list_movies().await?;
    let total = movies.len();

    let movies = match params.get_usize("page") {
        Some(page) => {
            let size = params
                .get_usize("limit")
                .filter(|l| *l > 0)
                .unwrap_or(state.config.catalog.page_size);
            catalog::paginate(movies, page, size)
        }
        None => movies,
    };

    Ok(Json(MovieList { movies, total, success: true }))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Movie>>, ApiError> {
    let movie = state.db.get_movie(&id).await?;
    Ok(Json(DataResponse::new(movie)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<MovieUpdate>,
) -> Result<Json<DataResponse<Movie>>, ApiError> {
    let mut movie = state.db.get_movie(&id).await?;
    update.apply(&mut movie);
    state.db.update_movie(&movie).await?;

    info!(movie = %movie.id, "movie updated");
    Ok(Json(DataResponse::with_message("Movie updated successfully", movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.delete_movie(&id).await?;

    info!(movie = %id, "movie deleted");
    Ok(Json(MessageResponse::ok("Movie deleted successfully")))
}
