//! Transmitted representations of stored records.
//!
//! Handlers never serialize database rows directly; they map them through
//! the view types here. Facilities have two views, selected per operation.

pub mod admin;
pub mod facility;
pub mod family;
pub mod species;
