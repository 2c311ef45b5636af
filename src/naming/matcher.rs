//! Identifier conformance against candidate base names.

use crate::naming::case::capitalize;

/// Decides whether an identifier conforms to a base name.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableNameMatcher;

impl VariableNameMatcher {
    /// Create a matcher
    pub fn new() -> Self {
        Self
    }

    /// `identifier` equals `base_name`, or ends with the capitalized base name.
    ///
    /// `readChannel` conforms to `channel`; `channelReader` does not. An empty
    /// base name only matches an empty identifier.
    pub fn is_valid(&self, identifier: &str, base_name: &str) -> bool {
        if identifier == base_name {
            return true;
        }
        if base_name.is_empty() {
            return false;
        }
        identifier.ends_with(&capitalize(base_name))
    }

    /// Whether `identifier` conforms to any of `base_names`
    pub fn is_valid_for_any<S: AsRef<str>>(&self, identifier: &str, base_names: &[S]) -> bool {
        base_names
            .iter()
            .any(|base_name| self.is_valid(identifier, base_name.as_ref()))
    }

    /// `identifier` repeats the base name with no contextual prefix.
    pub fn should_report_bare_name_notice(&self, identifier: &str, base_name: &str) -> bool {
        identifier == base_name
    }
}
