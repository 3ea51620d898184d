//! Grouping of a facility's species by family name.

use indexmap::IndexMap;

/// Key used when a species has no resolvable family.
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// Group `(family_name, common_name)` pairs into `family -> [common names]`.
///
/// Families appear in first-encounter order and names keep their input order,
/// so the result mirrors the order the species were read in.
pub fn group_by_family<'a, I>(species: I) -> IndexMap<String, Vec<String>>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
{
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (family, common_name) in species {
        grouped
            .entry(family.unwrap_or(UNKNOWN_FAMILY).to_string())
            .or_default()
            .push(common_name.to_string());
    }
    grouped
}
