//! Route definitions for the `/admin` console.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET /families                  -> list_families
/// GET /species                   -> list_species
/// GET /facilities                -> list_facilities
/// GET /facilities/{id}/species   -> get_species_selector
/// PUT /facilities/{id}/species   -> set_species
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/families", get(admin::list_families))
        .route("/species", get(admin::list_species))
        .route("/facilities", get(admin::list_facilities))
        .route(
            "/facilities/{id}/species",
            get(admin::get_species_selector).put(admin::set_species),
        )
}
