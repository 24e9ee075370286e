use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    handlers::{catalog, favorites, feedback},
    infra::app_state::{FavoritesState, FeedbackState},
};

/// JSON API for the favorites registry and catalog pass-through.
pub fn create_favorites_router(state: FavoritesState) -> Router {
    Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites_handler)
                .post(favorites::create_favorite_handler),
        )
        .route("/movies", get(catalog::movies_handler))
        .route("/people", get(catalog::people_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Form intake plus the static surface of the feedback site.
///
/// - `GET /` and `GET /exists` serve `feedback.html` and `exists.html`
///   from `pages_dir`
/// - `GET /feedback/<key>.txt` serves committed submissions from `public_dir`
/// - anything else falls back to `static_dir`
pub fn create_feedback_router(
    state: FeedbackState,
    pages_dir: &Path,
    public_dir: &Path,
    static_dir: &Path,
) -> Router {
    Router::new()
        .route("/create", post(feedback::create_feedback_handler))
        .route_service("/", ServeFile::new(pages_dir.join("feedback.html")))
        .route_service("/exists", ServeFile::new(pages_dir.join("exists.html")))
        .nest_service("/feedback", ServeDir::new(public_dir))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
