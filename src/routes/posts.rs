//! Posts routes: collection and member paths, each with a preflight responder and a JSON 405 fallback.
//! HEAD is answered with 405 rather than the implicit GET-derived response.

use crate::handlers::posts::{
    create, delete as delete_handler, list, method_not_allowed, missing_id, preflight, read, update,
};
use crate::state::AppState;
use axum::routing::{get, MethodRouter};
use axum::Router;

fn collection() -> MethodRouter<AppState> {
    get(list)
        .post(create)
        .patch(missing_id)
        .delete(missing_id)
        .options(preflight)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// POST on a member path creates a new post; the id segment is ignored.
fn member() -> MethodRouter<AppState> {
    get(read)
        .post(create)
        .patch(update)
        .delete(delete_handler)
        .options(preflight)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", collection())
        .route("/posts/", collection())
        .route("/posts/:id", member())
        .route("/posts/:id/", member())
}
