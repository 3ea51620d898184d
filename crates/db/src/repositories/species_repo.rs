//! Repository for the `species` table.

use sqlx::PgPool;
use zoo_core::search::{contains_pattern, non_blank};
use zoo_core::types::DbId;

use crate::models::species::{
    CreateSpecies, Species, SpeciesFilter, SpeciesWithFamily, UpdateSpecies,
};

/// Column list for the `species` table.
const COLUMNS: &str =
    "id, common_name, scientific_name, family_id, endangered, created_at, updated_at";

/// Species columns plus the owning family's name (aliases `s` and `f`).
const WITH_FAMILY_COLUMNS: &str = "s.id, s.common_name, s.scientific_name, s.family_id, \
    s.endangered, s.created_at, s.updated_at, f.name AS family_name";

/// Provides CRUD operations for species.
pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a new species, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSpecies) -> Result<Species, sqlx::Error> {
        let query = format!(
            "INSERT INTO species (common_name, scientific_name, family_id, endangered) \
             VALUES ($1, $2, $3, COALESCE($4, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(&input.common_name)
            .bind(&input.scientific_name)
            .bind(input.family_id)
            .bind(input.endangered)
            .fetch_one(pool)
            .await
    }

    /// Find a species by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a species by ID together with its family name.
    pub async fn find_with_family(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SpeciesWithFamily>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_FAMILY_COLUMNS} \
             FROM species s \
             LEFT JOIN families f ON f.id = s.family_id \
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, SpeciesWithFamily>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all species with their family, ordered by scientific name.
    pub async fn list(pool: &PgPool) -> Result<Vec<SpeciesWithFamily>, sqlx::Error> {
        Self::list_filtered(pool, &SpeciesFilter::default()).await
    }

    /// List species matching the given filters, ordered by scientific name.
    ///
    /// `search` matches either the common or the scientific name.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &SpeciesFilter,
    ) -> Result<Vec<SpeciesWithFamily>, sqlx::Error> {
        let search = non_blank(filter.search.as_deref()).map(contains_pattern);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.family_id.is_some() {
            conditions.push(format!("s.family_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.endangered.is_some() {
            conditions.push(format!("s.endangered = ${bind_idx}"));
            bind_idx += 1;
        }
        if search.is_some() {
            conditions.push(format!(
                "(s.common_name ILIKE ${bind_idx} OR s.scientific_name ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {WITH_FAMILY_COLUMNS} \
             FROM species s \
             LEFT JOIN families f ON f.id = s.family_id \
             {where_clause} \
             ORDER BY s.scientific_name"
        );

        let mut q = sqlx::query_as::<_, SpeciesWithFamily>(&query);
        if let Some(family_id) = filter.family_id {
            q = q.bind(family_id);
        }
        if let Some(endangered) = filter.endangered {
            q = q.bind(endangered);
        }
        if let Some(pattern) = search {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }

    /// List the species associated with a facility, ordered by scientific name.
    pub async fn list_for_facility(
        pool: &PgPool,
        facility_id: DbId,
    ) -> Result<Vec<SpeciesWithFamily>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_FAMILY_COLUMNS} \
             FROM species s \
             JOIN facility_species fs ON fs.species_id = s.id \
             LEFT JOIN families f ON f.id = s.family_id \
             WHERE fs.facility_id = $1 \
             ORDER BY s.scientific_name"
        );
        sqlx::query_as::<_, SpeciesWithFamily>(&query)
            .bind(facility_id)
            .fetch_all(pool)
            .await
    }

    /// Update a species. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSpecies,
    ) -> Result<Option<Species>, sqlx::Error> {
        let query = format!(
            "UPDATE species SET \
                common_name = COALESCE($2, common_name), \
                scientific_name = COALESCE($3, scientific_name), \
                family_id = COALESCE($4, family_id), \
                endangered = COALESCE($5, endangered) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .bind(&input.common_name)
            .bind(&input.scientific_name)
            .bind(input.family_id)
            .bind(input.endangered)
            .fetch_optional(pool)
            .await
    }

    /// Delete a species by ID. Its facility associations go with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM species WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
