//! Species entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use zoo_core::types::{DbId, Timestamp};

/// A row from the `species` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub common_name: String,
    pub scientific_name: String,
    pub family_id: DbId,
    pub endangered: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A species joined with its family's name.
///
/// `family_name` comes from a LEFT JOIN and is `None` only if the family row
/// is missing.
#[derive(Debug, Clone, FromRow)]
pub struct SpeciesWithFamily {
    #[sqlx(flatten)]
    pub species: Species,
    pub family_name: Option<String>,
}

/// DTO for creating a new species.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpecies {
    #[validate(length(min = 1, max = 200))]
    pub common_name: String,
    #[validate(length(min = 1, max = 200))]
    pub scientific_name: String,
    pub family_id: DbId,
    pub endangered: Option<bool>,
}

/// DTO for updating an existing species. All fields optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSpecies {
    #[validate(length(min = 1, max = 200))]
    pub common_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub scientific_name: Option<String>,
    pub family_id: Option<DbId>,
    pub endangered: Option<bool>,
}

/// Filters for the admin species listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesFilter {
    pub family_id: Option<DbId>,
    pub endangered: Option<bool>,
    /// Matched case-insensitively against both name fields.
    pub search: Option<String>,
}
