//! Admin console handlers.
//!
//! Listing, searching, and filtering for all three record types, plus the
//! facility species multi-select. Every handler requires an admin token.

use axum::extract::{Path, Query, State};
use axum::Json;
use zoo_core::error::CoreError;
use zoo_core::search::non_blank;
use zoo_core::types::DbId;
use zoo_db::models::species::SpeciesFilter;
use zoo_db::repositories::{FacilityRepo, FamilyRepo, SpeciesRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::state::AppState;
use crate::views::admin::{AdminFacilityRow, AdminSpeciesRow, SetSpeciesRequest, SpeciesSelector};
use crate::views::family::FamilyView;

fn facility_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Facility",
        id,
    })
}

/// GET /api/v1/admin/families?search=
pub async fn list_families(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<FamilyView>>> {
    let families = match non_blank(params.search.as_deref()) {
        Some(term) => FamilyRepo::search(&state.pool, term).await?,
        None => FamilyRepo::list(&state.pool).await?,
    };
    Ok(Json(families.into_iter().map(FamilyView::from).collect()))
}

/// GET /api/v1/admin/species?family_id=&endangered=&search=
pub async fn list_species(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<SpeciesFilter>,
) -> AppResult<Json<Vec<AdminSpeciesRow>>> {
    let species = SpeciesRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(species.into_iter().map(AdminSpeciesRow::from).collect()))
}

/// GET /api/v1/admin/facilities?search=
pub async fn list_facilities(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<AdminFacilityRow>>> {
    let facilities = match non_blank(params.search.as_deref()) {
        Some(term) => FacilityRepo::search(&state.pool, term).await?,
        None => FacilityRepo::list(&state.pool).await?,
    };
    Ok(Json(
        facilities.into_iter().map(AdminFacilityRow::from).collect(),
    ))
}

/// GET /api/v1/admin/facilities/{id}/species
pub async fn get_species_selector(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SpeciesSelector>> {
    if FacilityRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(facility_not_found(id));
    }
    selector(&state, id).await
}

/// PUT /api/v1/admin/facilities/{id}/species
///
/// Replace the facility's species set by ID. Unknown IDs fail the request.
pub async fn set_species(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<SetSpeciesRequest>,
) -> AppResult<Json<SpeciesSelector>> {
    if !FacilityRepo::set_species_ids(&state.pool, id, &input.species_ids).await? {
        return Err(facility_not_found(id));
    }
    tracing::info!(
        facility_id = id,
        admin = %admin.subject,
        species = input.species_ids.len(),
        "Facility species replaced from admin console"
    );
    selector(&state, id).await
}

async fn selector(state: &AppState, facility_id: DbId) -> AppResult<Json<SpeciesSelector>> {
    let all = SpeciesRepo::list(&state.pool).await?;
    let chosen = FacilityRepo::species_ids(&state.pool, facility_id).await?;
    Ok(Json(SpeciesSelector::build(&all, &chosen)))
}
