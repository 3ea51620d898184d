//! Route definitions for the `/facilities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::facility;
use crate::state::AppState;

/// Routes mounted at `/facilities`.
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
        .route("/", get(facility::list).post(facility::create))
        .route(
            "/{id}",
            get(facility::get_by_id)
                .put(facility::update)
                .patch(facility::patch)
                .delete(facility::delete),
        )
}
