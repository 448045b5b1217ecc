//! Built-in API profiles embedded in the binary
//!
//! Lets users pass `--api v1` instead of a path to a profile YAML file.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Profile used when none is named
pub const DEFAULT_PROFILE: &str = "v1";

/// Built-in profile YAML definitions
pub static BUILTIN_PROFILES: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = BTreeMap::new();
        m.insert("legacy", include_str!("../profiles/legacy.yaml"));
        m.insert("v1", include_str!("../profiles/v1.yaml"));
        m
    });

/// Get a built-in profile's YAML by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_PROFILES.get(name).copied()
}

/// Names of all built-in profiles, sorted
pub fn list_builtin() -> Vec<&'static str> {
    BUILTIN_PROFILES.keys().copied().collect()
}
