//! Source registry: loads the bundled dataset definitions.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`].

use crate::source_def::{SourceDefinition, parse_source_toml};

/// Identifier of the dataset served when none is configured.
pub const DEFAULT_SOURCE_ID: &str = "chicago_red_light";

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    (
        "chicago_red_light",
        include_str!("../sources/chicago_red_light.toml"),
    ),
    ("chicago_speed", include_str!("../sources/chicago_speed.toml")),
];

/// Returns all bundled source definitions.
///
/// # Panics
///
/// Panics if any embedded TOML config is malformed.
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_source_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a bundled source definition by its `id`.
#[must_use]
pub fn find_source(id: &str) -> Option<SourceDefinition> {
    all_sources().into_iter().find(|s| s.id == id)
}
