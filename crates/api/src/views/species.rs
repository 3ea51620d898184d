use serde::Serialize;
use zoo_core::types::DbId;
use zoo_db::models::species::SpeciesWithFamily;

use super::family::FamilyView;

/// Species as returned to clients, with the owning family embedded.
///
/// Writes accept a `family_id` instead; it is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesView {
    pub id: DbId,
    pub common_name: String,
    pub scientific_name: String,
    pub family: Option<FamilyView>,
    pub endangered: bool,
}

impl From<SpeciesWithFamily> for SpeciesView {
    fn from(row: SpeciesWithFamily) -> Self {
        let family = row.family_name.map(|name| FamilyView {
            id: row.species.family_id,
            name,
        });
        Self {
            id: row.species.id,
            common_name: row.species.common_name,
            scientific_name: row.species.scientific_name,
            family,
            endangered: row.species.endangered,
        }
    }
}
