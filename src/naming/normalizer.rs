//! Type short name to candidate base name normalization.

use serde::{Deserialize, Serialize};

use crate::core::types::{short_name_of, TypeName};
use crate::naming::case::to_camel_case;

/// Prefixes always removed when they end on a word boundary.
pub const MANDATORY_STRIP_PREFIXES: &[&str] = &["Abstract"];

/// Suffixes always removed; only the stripped form is a candidate.
pub const MANDATORY_STRIP_SUFFIXES: &[&str] = &["Interface", "Abstract", "Trait"];

/// Suffixes that may be dropped; both forms are candidates.
pub const OPTIONAL_STRIP_SUFFIXES: &[&str] = &["Dto", "Vo", "Entity"];

/// Suffixes that carry meaning and are never removed.
pub const NEVER_STRIP_SUFFIXES: &[&str] = &["Factory", "Collection"];

/// Which suffix rule decided the outcome of a normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixRule {
    /// A never-strip suffix matched
    NeverStrip,
    /// A mandatory suffix matched and was removed
    Mandatory,
    /// An optional suffix matched; both forms are kept
    Optional,
    /// No suffix rule applied
    None,
}

/// Derives candidate base names from a type's short name.
///
/// Rules, applied in order to the short name only:
/// - a mandatory prefix followed by an uppercase letter is removed first and
///   the unstripped form is discarded;
/// - never-strip suffixes keep only the camelCased name;
/// - mandatory suffixes keep only the stripped form;
/// - optional suffixes keep the unstripped form, then the stripped form.
///
/// ```
/// use nomen_rs::naming::normalizer::NameNormalizer;
///
/// let normalizer = NameNormalizer::new();
/// assert_eq!(normalizer.normalize_str("App\\ChannelInterface"), vec!["channel"]);
/// assert_eq!(normalizer.normalize_str("UserDto"), vec!["userDto", "user"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NameNormalizer;

impl NameNormalizer {
    /// Create a normalizer
    pub fn new() -> Self {
        Self
    }

    /// Candidate base names for `type_name`. Never empty.
    pub fn normalize(&self, type_name: &TypeName) -> Vec<String> {
        self.normalize_str(type_name.as_str())
    }

    /// Candidate base names for a raw, possibly namespaced type name.
    pub fn normalize_str(&self, type_name: &str) -> Vec<String> {
        self.normalize_with_rule(type_name).0
    }

    /// Candidate base names together with the suffix rule that produced them.
    pub fn normalize_with_rule(&self, type_name: &str) -> (Vec<String>, SuffixRule) {
        let short_name = strip_mandatory_prefix(short_name_of(type_name));
        let camel = to_camel_case(short_name);

        if find_suffix(short_name, NEVER_STRIP_SUFFIXES).is_some() {
            return (vec![camel], SuffixRule::NeverStrip);
        }

        if let Some(suffix) = find_suffix(short_name, MANDATORY_STRIP_SUFFIXES) {
            let stripped = &short_name[..short_name.len() - suffix.len()];
            if stripped.is_empty() {
                return (vec![camel], SuffixRule::Mandatory);
            }
            return (vec![to_camel_case(stripped)], SuffixRule::Mandatory);
        }

        if let Some(suffix) = find_suffix(short_name, OPTIONAL_STRIP_SUFFIXES) {
            let stripped = &short_name[..short_name.len() - suffix.len()];
            if stripped.is_empty() {
                return (vec![camel], SuffixRule::Optional);
            }
            let stripped_camel = to_camel_case(stripped);
            if stripped_camel == camel {
                return (vec![camel], SuffixRule::Optional);
            }
            return (vec![camel, stripped_camel], SuffixRule::Optional);
        }

        (vec![camel], SuffixRule::None)
    }
}

/// Remove a mandatory prefix when it ends at a word boundary and leaves something behind.
fn strip_mandatory_prefix(short_name: &str) -> &str {
    for prefix in MANDATORY_STRIP_PREFIXES {
        let Some(remaining) = short_name.strip_prefix(prefix) else {
            continue;
        };
        let on_boundary = remaining
            .bytes()
            .next()
            .map_or(true, |first| first.is_ascii_uppercase());
        if !on_boundary {
            continue;
        }
        if remaining.is_empty() {
            return short_name;
        }
        return remaining;
    }
    short_name
}

fn find_suffix(value: &str, suffixes: &'static [&'static str]) -> Option<&'static str> {
    suffixes.iter().copied().find(|suffix| value.ends_with(suffix))
}
