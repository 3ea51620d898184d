//! Facility (zoo) entity model and DTOs.
//!
//! Species associations live in the `facility_species` junction table and
//! are passed to the repository separately from these scalar DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use zoo_core::types::{DbId, Timestamp};

/// A row from the `facilities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Facility {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub area_sq_m: i64,
    pub annual_budget: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Scalar fields for inserting a facility.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFacility {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub country: String,
    #[validate(range(min = 0))]
    pub area_sq_m: i64,
    pub annual_budget: Decimal,
}

/// Scalar fields for updating a facility. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFacility {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub country: Option<String>,
    #[validate(range(min = 0))]
    pub area_sq_m: Option<i64>,
    pub annual_budget: Option<Decimal>,
}

impl From<CreateFacility> for UpdateFacility {
    fn from(input: CreateFacility) -> Self {
        Self {
            name: Some(input.name),
            city: Some(input.city),
            country: Some(input.country),
            area_sq_m: Some(input.area_sq_m),
            annual_budget: Some(input.annual_budget),
        }
    }
}
