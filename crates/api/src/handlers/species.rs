//! Handlers for the `/species` resource.
//!
//! Writes take a `family_id`; responses embed the family instead.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zoo_core::error::{CoreError, FieldError};
use zoo_core::types::DbId;
use zoo_db::models::species::{CreateSpecies, UpdateSpecies};
use zoo_db::repositories::{FamilyRepo, SpeciesRepo};
use zoo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::views::species::SpeciesView;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Species",
        id,
    })
}

fn unknown_family(family_id: DbId) -> AppError {
    AppError::Core(CoreError::InvalidField(
        FieldError::new(
            "family_id",
            format!("Invalid family id {family_id}: object does not exist"),
        )
        .with_invalid(vec![family_id.to_string()]),
    ))
}

/// Reject writes that point at a family that does not exist.
async fn ensure_family_exists(pool: &DbPool, family_id: DbId) -> AppResult<()> {
    if FamilyRepo::exists(pool, family_id).await? {
        Ok(())
    } else {
        Err(unknown_family(family_id))
    }
}

/// Map a foreign-key race (family deleted between check and write) back to
/// the same validation error the pre-check produces.
fn map_family_fk(err: sqlx::Error, family_id: Option<DbId>) -> AppError {
    match family_id {
        Some(family_id) if zoo_db::is_foreign_key_violation(&err) => unknown_family(family_id),
        _ => err.into(),
    }
}

/// Load the read form of a species just written.
async fn load_view(pool: &DbPool, id: DbId) -> AppResult<SpeciesView> {
    SpeciesRepo::find_with_family(pool, id)
        .await?
        .map(SpeciesView::from)
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/species
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SpeciesView>>> {
    let species = SpeciesRepo::list(&state.pool).await?;
    Ok(Json(species.into_iter().map(SpeciesView::from).collect()))
}

/// POST /api/v1/species
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSpecies>,
) -> AppResult<(StatusCode, Json<SpeciesView>)> {
    ensure_family_exists(&state.pool, input.family_id).await?;
    let species = SpeciesRepo::create(&state.pool, &input)
        .await
        .map_err(|e| map_family_fk(e, Some(input.family_id)))?;
    tracing::info!(
        species_id = species.id,
        scientific_name = %species.scientific_name,
        "Species created"
    );
    let view = load_view(&state.pool, species.id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/species/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SpeciesView>> {
    Ok(Json(load_view(&state.pool, id).await?))
}

/// PUT /api/v1/species/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateSpecies>,
) -> AppResult<Json<SpeciesView>> {
    let input = UpdateSpecies {
        common_name: Some(input.common_name),
        scientific_name: Some(input.scientific_name),
        family_id: Some(input.family_id),
        endangered: input.endangered,
    };
    patch_inner(&state, id, &input).await
}

/// PATCH /api/v1/species/{id}
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSpecies>,
) -> AppResult<Json<SpeciesView>> {
    patch_inner(&state, id, &input).await
}

async fn patch_inner(
    state: &AppState,
    id: DbId,
    input: &UpdateSpecies,
) -> AppResult<Json<SpeciesView>> {
    if SpeciesRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(family_id) = input.family_id {
        ensure_family_exists(&state.pool, family_id).await?;
    }
    let species = SpeciesRepo::update(&state.pool, id, input)
        .await
        .map_err(|e| map_family_fk(e, input.family_id))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_view(&state.pool, species.id).await?))
}

/// DELETE /api/v1/species/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if SpeciesRepo::delete(&state.pool, id).await? {
        tracing::info!(species_id = id, "Species deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
