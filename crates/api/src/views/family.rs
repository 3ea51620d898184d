use serde::Serialize;
use zoo_core::types::DbId;
use zoo_db::models::family::Family;

/// `{id, name}`, identical for reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyView {
    pub id: DbId,
    pub name: String,
}

impl From<Family> for FamilyView {
    fn from(family: Family) -> Self {
        Self {
            id: family.id,
            name: family.name,
        }
    }
}
