//! Repository for the `facilities` and `facility_species` tables.
//!
//! Writes that touch the species set run in one transaction together with
//! the scalar write: if any requested species cannot be resolved, the
//! transaction is dropped and nothing is persisted.

use std::collections::HashSet;

use sqlx::{PgPool, Postgres, Transaction};
use zoo_core::error::{CoreError, FieldError};
use zoo_core::scientific_names::{missing_names, unresolved_species_error};
use zoo_core::search::contains_pattern;
use zoo_core::types::DbId;

use crate::models::facility::{CreateFacility, Facility, UpdateFacility};
use crate::{is_foreign_key_violation, RepoError};

/// Column list for the `facilities` table.
const COLUMNS: &str =
    "id, name, city, country, area_sq_m, annual_budget, created_at, updated_at";

/// Provides CRUD operations for facilities and their species associations.
pub struct FacilityRepo;

impl FacilityRepo {
    /// Insert a facility and associate the species named in
    /// `scientific_names`, all in one transaction.
    ///
    /// `scientific_names` must already be normalized. If it is non-empty and
    /// any entry has no matching species, returns the unresolved-names error
    /// and the insert is rolled back.
    pub async fn create_with_species(
        pool: &PgPool,
        input: &CreateFacility,
        scientific_names: &[String],
    ) -> Result<Facility, RepoError> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO facilities (name, city, country, area_sq_m, annual_budget) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let facility = sqlx::query_as::<_, Facility>(&insert_query)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.area_sq_m)
            .bind(input.annual_budget)
            .fetch_one(&mut *tx)
            .await?;

        if !scientific_names.is_empty() {
            Self::replace_species_by_names(&mut tx, facility.id, scientific_names).await?;
        }

        tx.commit().await?;
        Ok(facility)
    }

    /// Find a facility by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Facility>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facilities WHERE id = $1");
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all facilities ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Facility>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facilities ORDER BY name, id");
        sqlx::query_as::<_, Facility>(&query).fetch_all(pool).await
    }

    /// List facilities whose name, city, or country contains `term`
    /// (case-insensitive).
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Facility>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM facilities \
             WHERE name ILIKE $1 OR city ILIKE $1 OR country ILIKE $1 \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(contains_pattern(term))
            .fetch_all(pool)
            .await
    }

    /// Update a facility's scalar fields and, when `scientific_names` is
    /// `Some`, replace its species set. One transaction.
    ///
    /// `Some(&[])` clears all associations; `None` leaves them untouched.
    /// Returns `Ok(None)` if no row with the given `id` exists.
    pub async fn update_with_species(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFacility,
        scientific_names: Option<&[String]>,
    ) -> Result<Option<Facility>, RepoError> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE facilities SET \
                name = COALESCE($2, name), \
                city = COALESCE($3, city), \
                country = COALESCE($4, country), \
                area_sq_m = COALESCE($5, area_sq_m), \
                annual_budget = COALESCE($6, annual_budget) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let facility = sqlx::query_as::<_, Facility>(&update_query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.area_sq_m)
            .bind(input.annual_budget)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(facility) = facility else {
            return Ok(None);
        };

        if let Some(names) = scientific_names {
            Self::replace_species_by_names(&mut tx, facility.id, names).await?;
        }

        tx.commit().await?;
        Ok(Some(facility))
    }

    /// Delete a facility by ID. Its species associations go with it; the
    /// species themselves are untouched.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Species association helpers
    // -----------------------------------------------------------------------

    /// IDs of the species associated with a facility.
    pub async fn species_ids(pool: &PgPool, facility_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT species_id FROM facility_species \
             WHERE facility_id = $1 \
             ORDER BY species_id",
        )
        .bind(facility_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a facility's species set by species ID (admin multi-select).
    ///
    /// Unknown IDs fail the whole operation with a `species_ids` field error.
    /// Duplicate IDs are idempotent. Returns `Ok(false)` if the facility does
    /// not exist.
    pub async fn set_species_ids(
        pool: &PgPool,
        facility_id: DbId,
        species_ids: &[DbId],
    ) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        // Touch the row: existence check and updated_at refresh in one go.
        let touched = sqlx::query("UPDATE facilities SET updated_at = NOW() WHERE id = $1")
            .bind(facility_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Ok(false);
        }

        let found: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM species WHERE id = ANY($1)")
            .bind(species_ids)
            .fetch_all(&mut *tx)
            .await?;
        let found: HashSet<DbId> = found.into_iter().map(|(id,)| id).collect();

        let mut missing: Vec<DbId> = Vec::new();
        for &id in species_ids {
            if !found.contains(&id) && !missing.contains(&id) {
                missing.push(id);
            }
        }
        if !missing.is_empty() {
            return Err(unknown_species_ids_error(&missing).into());
        }

        let vanished = Self::replace_species_inner(&mut tx, facility_id, species_ids).await?;
        if let Some(vanished) = vanished {
            tracing::debug!(facility_id, species_id = vanished, "Species deleted during link");
            return Err(unknown_species_ids_error(&[vanished]).into());
        }

        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Resolve `names` to species and replace the facility's set, within an
    /// existing transaction. Fails with the unresolved names, in request
    /// order, if any name has no match.
    async fn replace_species_by_names(
        tx: &mut Transaction<'_, Postgres>,
        facility_id: DbId,
        names: &[String],
    ) -> Result<(), RepoError> {
        let found: Vec<(DbId, String)> =
            sqlx::query_as("SELECT id, scientific_name FROM species WHERE scientific_name = ANY($1)")
                .bind(names)
                .fetch_all(&mut **tx)
                .await?;

        let found_names: HashSet<&str> = found.iter().map(|(_, name)| name.as_str()).collect();
        let missing = missing_names(names, &found_names);
        if !missing.is_empty() {
            tracing::debug!(facility_id, ?missing, "Rejecting unresolved species names");
            return Err(unresolved_species_error(missing).into());
        }

        let ids: Vec<DbId> = found.iter().map(|(id, _)| *id).collect();
        if let Some(vanished) = Self::replace_species_inner(tx, facility_id, &ids).await? {
            let name = found
                .iter()
                .find(|(id, _)| *id == vanished)
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| vanished.to_string());
            tracing::debug!(facility_id, %name, "Species deleted during link");
            return Err(unresolved_species_error(vec![name]).into());
        }
        Ok(())
    }

    /// Replace species associations within an existing transaction.
    ///
    /// Deletes existing associations, then inserts the new set. Returns the
    /// ID of a species that no longer exists when its insert trips the
    /// foreign key; the caller must then abandon the transaction.
    async fn replace_species_inner(
        tx: &mut Transaction<'_, Postgres>,
        facility_id: DbId,
        species_ids: &[DbId],
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query("DELETE FROM facility_species WHERE facility_id = $1")
            .bind(facility_id)
            .execute(&mut **tx)
            .await?;

        for &species_id in species_ids {
            let inserted = sqlx::query(
                "INSERT INTO facility_species (facility_id, species_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(facility_id)
            .bind(species_id)
            .execute(&mut **tx)
            .await;

            match inserted {
                Ok(_) => {}
                Err(err) if is_foreign_key_violation(&err) => return Ok(Some(species_id)),
                Err(err) => return Err(err),
            }
        }

        Ok(None)
    }
}

/// Field error for species IDs with no matching row.
fn unknown_species_ids_error(missing: &[DbId]) -> CoreError {
    let invalid: Vec<String> = missing.iter().map(DbId::to_string).collect();
    CoreError::InvalidField(
        FieldError::new(
            "species_ids",
            format!("The following species ids do not exist: {invalid:?}"),
        )
        .with_invalid(invalid),
    )
}
