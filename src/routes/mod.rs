//! Router assembly: posts routes at the root and under `/api`, JSON 404 fallback, CORS and tracing layers.

mod posts;
pub use posts::post_routes;

use crate::handlers::resource_not_found;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Any origin may call the API; preflight requests are answered by the layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// Full application router.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(post_routes())
        .nest("/api", post_routes())
        .fallback(resource_not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
