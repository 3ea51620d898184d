//! Repository for the `families` table.

use sqlx::PgPool;
use zoo_core::search::contains_pattern;
use zoo_core::types::DbId;

use crate::models::family::{CreateFamily, Family, UpdateFamily};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for families.
pub struct FamilyRepo;

impl FamilyRepo {
    /// Insert a new family, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFamily) -> Result<Family, sqlx::Error> {
        let query = format!("INSERT INTO families (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Family>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a family by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE id = $1");
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a family with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM families WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List all families ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families ORDER BY name");
        sqlx::query_as::<_, Family>(&query).fetch_all(pool).await
    }

    /// List families whose name contains `term` (case-insensitive).
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE name ILIKE $1 ORDER BY name");
        sqlx::query_as::<_, Family>(&query)
            .bind(contains_pattern(term))
            .fetch_all(pool)
            .await
    }

    /// Update a family. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFamily,
    ) -> Result<Option<Family>, sqlx::Error> {
        let query = format!(
            "UPDATE families SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a family by ID.
    ///
    /// Fails with a foreign-key violation while species still reference the
    /// family. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM families WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of species that belong to the family.
    pub async fn count_species(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM species WHERE family_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
