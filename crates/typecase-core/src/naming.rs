//! Display-name derivation and format-suffix stripping.

use crate::types::FontFormat;
use std::path::Path;

/// Suffix literals stripped when recovering a family name from a registry
/// display name. Each is checked once, in order, against the progressively
/// shortened name, so a name matching several patterns loses all of them.
/// Kept exactly as-is for compatibility with existing registry contents.
const FAMILY_SUFFIXES: &[&str] = &[
    " (TrueType)",
    " (OpenType)",
    " (TTC)",
    " & ",
    "(TrueType)",
    "(OpenType)",
];

/// Derive the registry display name for a freshly installed font file:
/// the filename's stem plus the format's annotation.
pub fn display_name(filename: &str, format: FontFormat) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    format!("{}{}", stem, format.registry_annotation())
}

/// Recover a font family name from a registry display name by stripping
/// every matching suffix literal in list order, e.g.
/// `"Arial (TrueType)"` -> `"Arial"`.
pub fn family_name(name: &str) -> String {
    let mut family = name.trim();
    for suffix in FAMILY_SUFFIXES {
        if let Some(idx) = family.find(suffix) {
            family = family[..idx].trim_end();
        }
    }
    family.to_string()
}
