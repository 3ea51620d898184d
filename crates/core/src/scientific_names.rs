//! Scientific-name handling for facility species assignment.
//!
//! Facilities reference species by their unique scientific name. The write
//! path normalizes the requested list, resolves it against the database, and
//! fails with the exact unresolved entries if anything is missing.

use std::collections::HashSet;

use crate::error::{CoreError, FieldError};

/// Field name used for species lists in facility write payloads.
pub const SCIENTIFIC_NAMES_FIELD: &str = "scientific_names";

/// Trim every entry and drop blank ones, preserving request order.
///
/// Duplicates are kept; association is set-based, so they are harmless.
pub fn normalize_scientific_names<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Return the requested names that are absent from `found`, in request
/// order. A repeated missing name is reported at each occurrence.
pub fn missing_names(requested: &[String], found: &HashSet<&str>) -> Vec<String> {
    requested
        .iter()
        .filter(|name| !found.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Build the client-facing error for unresolved species names.
pub fn unresolved_species_error(missing: Vec<String>) -> CoreError {
    let message = format!("The following species do not exist: {missing:?}");
    CoreError::InvalidField(FieldError::new(SCIENTIFIC_NAMES_FIELD, message).with_invalid(missing))
}

/// `"{common_name} ({scientific_name})"`, as shown in listings and selectors.
pub fn species_display_name(common_name: &str, scientific_name: &str) -> String {
    format!("{common_name} ({scientific_name})")
}
