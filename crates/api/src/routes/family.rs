//! Route definitions for the `/families` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::family;
use crate::state::AppState;

/// Routes mounted at `/families`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// PATCH  /{id}   -> patch
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(family::list).post(family::create))
        .route(
            "/{id}",
            get(family::get_by_id)
                .put(family::update)
                .patch(family::patch)
                .delete(family::delete),
        )
}
