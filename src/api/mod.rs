pub mod auth;
pub mod browse;
pub mod error;
pub mod movies;
pub mod types;

pub use auth::AuthUser;
pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

pub fn build_api_router(state: AppState) -> Router<AppState> {
    let movie_routes = Router::new()
        .route("/api/movies/add-movie", post(movies::add_movie))
        .route("/api/movies", get(movies::list_movies))
        .route("/api/movies/", get(movies::list_movies))
        .route("/api/movies/search", get(browse::search_movies))
        .route("/api/movies/recommend", get(browse::recommend_movies))
        .route("/api/movies/recent", get(browse::recent_movies))
        .route("/api/movies/facets", get(browse::movie_facets))
        .route(
            "/api/movies/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/api/users/current", get(auth::current_user))
        .route_layer(axum::middleware::from_fn_with_state(state, auth::require_auth));

    Router::new()
        .route("/api/users/register", post(auth::register))
        .route("/api/users/login", post(auth::login))
        .merge(movie_routes)
}
