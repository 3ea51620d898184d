//! Family entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use zoo_core::types::{DbId, Timestamp};

/// A row from the `families` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Family {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new family.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamily {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

/// DTO for updating an existing family. All fields optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFamily {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
}
