//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod facility_repo;
pub mod family_repo;
pub mod species_repo;

pub use facility_repo::FacilityRepo;
pub use family_repo::FamilyRepo;
pub use species_repo::SpeciesRepo;
