pub mod admin;
pub mod facility;
pub mod family;
pub mod health;
pub mod species;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /families                                list, create
/// /families/{id}                           get, update, partial update, delete
///
/// /species                                 list, create
/// /species/{id}                            get, update, partial update, delete
///
/// /facilities                              list, create
/// /facilities/{id}                         get, update, partial update, delete
///
/// /admin/families                          search (admin only)
/// /admin/species                           filter, search (admin only)
/// /admin/facilities                        search (admin only)
/// /admin/facilities/{id}/species           species selector, replace set
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/families", family::router())
        .nest("/species", species::router())
        .nest("/facilities", facility::router())
        // Admin console (role checked by handler extractors).
        .nest("/admin", admin::router())
}
