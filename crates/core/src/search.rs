//! Helpers for case-insensitive substring search in the admin console.

/// Build an `ILIKE` pattern that matches `term` anywhere, treating `%`, `_`
/// and `\` in the term literally.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Treat blank search terms as "no filter".
pub fn non_blank(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}
