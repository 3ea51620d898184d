//! Row shapes for the admin console listings and the species selector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use zoo_core::scientific_names::species_display_name;
use zoo_core::types::DbId;
use zoo_db::models::facility::Facility;
use zoo_db::models::species::SpeciesWithFamily;

/// Species listing row: name columns, family, endangered flag.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSpeciesRow {
    pub id: DbId,
    pub common_name: String,
    pub scientific_name: String,
    pub family: Option<String>,
    pub endangered: bool,
    pub display_name: String,
}

impl From<SpeciesWithFamily> for AdminSpeciesRow {
    fn from(row: SpeciesWithFamily) -> Self {
        let display_name =
            species_display_name(&row.species.common_name, &row.species.scientific_name);
        Self {
            id: row.species.id,
            common_name: row.species.common_name,
            scientific_name: row.species.scientific_name,
            family: row.family_name,
            endangered: row.species.endangered,
            display_name,
        }
    }
}

/// Facility listing row: the scalar columns only.
#[derive(Debug, Clone, Serialize)]
pub struct AdminFacilityRow {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub area_sq_m: i64,
    pub annual_budget: Decimal,
}

impl From<Facility> for AdminFacilityRow {
    fn from(facility: Facility) -> Self {
        Self {
            id: facility.id,
            name: facility.name,
            city: facility.city,
            country: facility.country,
            area_sq_m: facility.area_sq_m,
            annual_budget: facility.annual_budget,
        }
    }
}

/// One entry in the species multi-select.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesOption {
    pub id: DbId,
    pub display_name: String,
}

impl From<&SpeciesWithFamily> for SpeciesOption {
    fn from(row: &SpeciesWithFamily) -> Self {
        Self {
            id: row.species.id,
            display_name: species_display_name(
                &row.species.common_name,
                &row.species.scientific_name,
            ),
        }
    }
}

/// Two-pane multi-select: species already linked and species still available.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesSelector {
    pub chosen: Vec<SpeciesOption>,
    pub available: Vec<SpeciesOption>,
}

impl SpeciesSelector {
    /// Partition `all` by membership in `chosen_ids`, keeping `all`'s order.
    pub fn build(all: &[SpeciesWithFamily], chosen_ids: &[DbId]) -> Self {
        let (chosen, available): (Vec<_>, Vec<_>) = all
            .iter()
            .partition(|row| chosen_ids.contains(&row.species.id));
        Self {
            chosen: chosen.into_iter().map(SpeciesOption::from).collect(),
            available: available.into_iter().map(SpeciesOption::from).collect(),
        }
    }
}

/// Body for `PUT /admin/facilities/{id}/species`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetSpeciesRequest {
    pub species_ids: Vec<DbId>,
}
