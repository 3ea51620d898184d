//! Handlers for the `/families` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zoo_core::error::CoreError;
use zoo_core::types::DbId;
use zoo_db::models::family::{CreateFamily, UpdateFamily};
use zoo_db::repositories::FamilyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::views::family::FamilyView;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Family",
        id,
    })
}

/// GET /api/v1/families
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FamilyView>>> {
    let families = FamilyRepo::list(&state.pool).await?;
    Ok(Json(families.into_iter().map(FamilyView::from).collect()))
}

/// POST /api/v1/families
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFamily>,
) -> AppResult<(StatusCode, Json<FamilyView>)> {
    let family = FamilyRepo::create(&state.pool, &input).await?;
    tracing::info!(family_id = family.id, name = %family.name, "Family created");
    Ok((StatusCode::CREATED, Json(family.into())))
}

/// GET /api/v1/families/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FamilyView>> {
    let family = FamilyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(family.into()))
}

/// PUT /api/v1/families/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateFamily>,
) -> AppResult<Json<FamilyView>> {
    let input = UpdateFamily {
        name: Some(input.name),
    };
    patch_inner(&state, id, &input).await
}

/// PATCH /api/v1/families/{id}
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateFamily>,
) -> AppResult<Json<FamilyView>> {
    patch_inner(&state, id, &input).await
}

async fn patch_inner(
    state: &AppState,
    id: DbId,
    input: &UpdateFamily,
) -> AppResult<Json<FamilyView>> {
    let family = FamilyRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(family.into()))
}

/// DELETE /api/v1/families/{id}
///
/// Refused with 409 while species still belong to the family.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    match FamilyRepo::delete(&state.pool, id).await {
        Ok(true) => {
            tracing::info!(family_id = id, "Family deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(not_found(id)),
        Err(err) if zoo_db::is_foreign_key_violation(&err) => {
            let dependents = FamilyRepo::count_species(&state.pool, id).await?;
            tracing::warn!(family_id = id, dependents, "Refusing to delete family with species");
            Err(AppError::Core(CoreError::IntegrityRefusal(format!(
                "Cannot delete Family {id}: {dependents} species still reference it"
            ))))
        }
        Err(err) => Err(err.into()),
    }
}
