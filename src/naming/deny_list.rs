//! Case-insensitive exclusion sets for type names and candidate names.

use std::collections::HashSet;

use tracing::warn;

use crate::core::types::NAMESPACE_SEPARATOR;

/// Two independent case-insensitive deny sets, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct DenyList {
    type_names: HashSet<String>,
    candidate_names: HashSet<String>,
}

impl DenyList {
    /// Build a deny list from literal type names and candidate names.
    ///
    /// Type names may be written with a leading namespace separator.
    pub fn new<T, C>(type_names: T, candidate_names: C) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            type_names: build_lookup(
                type_names
                    .into_iter()
                    .map(|name| name.as_ref().trim_start_matches(NAMESPACE_SEPARATOR).to_string()),
                "type name",
            ),
            candidate_names: build_lookup(
                candidate_names.into_iter().map(|name| name.as_ref().to_string()),
                "candidate name",
            ),
        }
    }

    /// A deny list that denies nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the fully-qualified type name is denied
    pub fn is_type_name_denied(&self, type_name: &str) -> bool {
        if self.type_names.is_empty() {
            return false;
        }
        let normalized = type_name.trim_start_matches(NAMESPACE_SEPARATOR).to_lowercase();
        self.type_names.contains(&normalized)
    }

    /// Whether the candidate base name is denied
    pub fn is_candidate_name_denied(&self, candidate_name: &str) -> bool {
        !self.candidate_names.is_empty() && self.candidate_names.contains(&candidate_name.to_lowercase())
    }

    /// Number of denied type names
    pub fn type_name_count(&self) -> usize {
        self.type_names.len()
    }

    /// Number of denied candidate names
    pub fn candidate_name_count(&self) -> usize {
        self.candidate_names.len()
    }
}

fn build_lookup(values: impl Iterator<Item = String>, kind: &str) -> HashSet<String> {
    let mut lookup = HashSet::new();
    for value in values {
        if !lookup.insert(value.to_lowercase()) {
            warn!("Duplicate deny-list {} ignored: {}", kind, value);
        }
    }
    lookup
}
