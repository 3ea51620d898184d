//! Handlers for the `/facilities` resource.
//!
//! List and retrieve answer with the read view; create, update, and partial
//! update accept the write payload and answer with the write view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zoo_core::error::CoreError;
use zoo_core::types::DbId;
use zoo_db::models::facility::UpdateFacility;
use zoo_db::repositories::FacilityRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::views::facility::{
    render, FacilityPatchRequest, FacilityView, FacilityWriteRequest, Operation,
};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Facility",
        id,
    })
}

/// GET /api/v1/facilities
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FacilityView>>> {
    let facilities = FacilityRepo::list(&state.pool).await?;
    let mut views = Vec::with_capacity(facilities.len());
    for facility in facilities {
        views.push(render(&state.pool, Operation::List, facility).await?);
    }
    Ok(Json(views))
}

/// GET /api/v1/facilities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FacilityView>> {
    let facility = FacilityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(render(&state.pool, Operation::Retrieve, facility).await?))
}

/// POST /api/v1/facilities
///
/// Inserts the facility and links every species named in
/// `scientific_names`. Unknown names fail the whole request.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FacilityWriteRequest>,
) -> AppResult<(StatusCode, Json<FacilityView>)> {
    let (fields, names) = input.into_parts()?;
    let names = names.unwrap_or_default();

    let facility = FacilityRepo::create_with_species(&state.pool, &fields, &names).await?;
    tracing::info!(
        facility_id = facility.id,
        name = %facility.name,
        species_requested = names.len(),
        "Facility created"
    );

    let view = render(&state.pool, Operation::Create, facility).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/facilities/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<FacilityWriteRequest>,
) -> AppResult<Json<FacilityView>> {
    let (fields, names) = input.into_parts()?;
    write_update(&state, id, Operation::Update, &fields.into(), names).await
}

/// PATCH /api/v1/facilities/{id}
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<FacilityPatchRequest>,
) -> AppResult<Json<FacilityView>> {
    let (fields, names) = input.into_parts()?;
    write_update(&state, id, Operation::PartialUpdate, &fields, names).await
}

/// Apply scalar changes and, when `names` is present, replace the species
/// set in the same transaction.
async fn write_update(
    state: &AppState,
    id: DbId,
    op: Operation,
    fields: &UpdateFacility,
    names: Option<Vec<String>>,
) -> AppResult<Json<FacilityView>> {
    let facility = FacilityRepo::update_with_species(&state.pool, id, fields, names.as_deref())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        facility_id = id,
        replaced_species = names.is_some(),
        "Facility updated"
    );
    Ok(Json(render(&state.pool, op, facility).await?))
}

/// DELETE /api/v1/facilities/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if FacilityRepo::delete(&state.pool, id).await? {
        tracing::info!(facility_id = id, "Facility deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
