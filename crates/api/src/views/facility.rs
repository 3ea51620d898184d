//! Facility representations.
//!
//! Reads (list, retrieve) use [`FacilityReadView`] with derived aggregate
//! fields. Writes (create, update, partial update) accept
//! [`FacilityWriteRequest`] / [`FacilityPatchRequest`] and answer with
//! [`FacilityWriteView`], which embeds full species records.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use zoo_core::budget::validate_budget;
use zoo_core::error::CoreError;
use zoo_core::grouping::group_by_family;
use zoo_core::scientific_names::normalize_scientific_names;
use zoo_core::types::DbId;
use zoo_db::models::facility::{CreateFacility, Facility, UpdateFacility};
use zoo_db::models::species::SpeciesWithFamily;
use zoo_db::repositories::SpeciesRepo;
use zoo_db::DbPool;

use super::species::SpeciesView;

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

/// The five operations a facility handler performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
}

/// Which representation an operation answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Read,
    Write,
}

impl Operation {
    pub fn view_kind(self) -> ViewKind {
        match self {
            Operation::List | Operation::Retrieve => ViewKind::Read,
            Operation::Create | Operation::Update | Operation::PartialUpdate => ViewKind::Write,
        }
    }
}

/// A facility rendered in the representation its operation calls for.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FacilityView {
    Read(FacilityReadView),
    Write(FacilityWriteView),
}

impl FacilityView {
    /// Build the view for `op` from a facility and its species, which must be
    /// in scientific-name order.
    pub fn build(op: Operation, facility: Facility, species: Vec<SpeciesWithFamily>) -> Self {
        match op.view_kind() {
            ViewKind::Read => FacilityView::Read(FacilityReadView::build(facility, &species)),
            ViewKind::Write => FacilityView::Write(FacilityWriteView::build(facility, species)),
        }
    }
}

/// Load a facility's species and render it for `op`.
pub async fn render(
    pool: &DbPool,
    op: Operation,
    facility: Facility,
) -> Result<FacilityView, sqlx::Error> {
    let species = SpeciesRepo::list_for_facility(pool, facility.id).await?;
    Ok(FacilityView::build(op, facility, species))
}

// ---------------------------------------------------------------------------
// Outbound views
// ---------------------------------------------------------------------------

/// List/detail representation with derived aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityReadView {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub area_sq_m: i64,
    pub annual_budget: Decimal,
    pub species_count: usize,
    /// Family name -> common names, in encounter order.
    pub species_by_family: IndexMap<String, Vec<String>>,
}

impl FacilityReadView {
    pub fn build(facility: Facility, species: &[SpeciesWithFamily]) -> Self {
        let species_by_family = group_by_family(
            species
                .iter()
                .map(|s| (s.family_name.as_deref(), s.species.common_name.as_str())),
        );
        Self {
            id: facility.id,
            name: facility.name,
            city: facility.city,
            country: facility.country,
            area_sq_m: facility.area_sq_m,
            annual_budget: facility.annual_budget,
            species_count: species.len(),
            species_by_family,
        }
    }
}

/// Create/update response: scalar fields plus full species records.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityWriteView {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub area_sq_m: i64,
    pub annual_budget: Decimal,
    pub species: Vec<SpeciesView>,
}

impl FacilityWriteView {
    pub fn build(facility: Facility, species: Vec<SpeciesWithFamily>) -> Self {
        Self {
            id: facility.id,
            name: facility.name,
            city: facility.city,
            country: facility.country,
            area_sq_m: facility.area_sq_m,
            annual_budget: facility.annual_budget,
            species: species.into_iter().map(SpeciesView::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound payloads
// ---------------------------------------------------------------------------

/// Body for `POST /facilities` and `PUT /facilities/{id}`: every scalar field
/// is required; `scientific_names` is optional.
#[derive(Debug, Deserialize, Validate)]
pub struct FacilityWriteRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: CreateFacility,
    pub scientific_names: Option<Vec<String>>,
}

impl FacilityWriteRequest {
    /// Check the budget and normalize the species list.
    pub fn into_parts(self) -> Result<(CreateFacility, Option<Vec<String>>), CoreError> {
        let mut fields = self.fields;
        fields.annual_budget = validate_budget(fields.annual_budget)?;
        let names = self
            .scientific_names
            .map(|names| normalize_scientific_names(&names));
        Ok((fields, names))
    }
}

/// Body for `PATCH /facilities/{id}`: any subset of fields.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FacilityPatchRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: UpdateFacility,
    pub scientific_names: Option<Vec<String>>,
}

impl FacilityPatchRequest {
    /// Check the budget (when present) and normalize the species list.
    pub fn into_parts(self) -> Result<(UpdateFacility, Option<Vec<String>>), CoreError> {
        let mut fields = self.fields;
        fields.annual_budget = fields.annual_budget.map(validate_budget).transpose()?;
        let names = self
            .scientific_names
            .map(|names| normalize_scientific_names(&names));
        Ok((fields, names))
    }
}
