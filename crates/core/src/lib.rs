//! Domain types, error taxonomy, and pure logic for the zoo registry.
//!
//! Nothing in this crate touches the database; repositories and handlers
//! build on top of it.

pub mod budget;
pub mod error;
pub mod grouping;
pub mod roles;
pub mod scientific_names;
pub mod search;
pub mod types;
