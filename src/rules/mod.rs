//! Naming rules built on top of candidate resolution.
//!
//! Each rule takes an identifier together with the type it holds and reports
//! zero or more [`RuleViolation`]s. Rules never fail: a type that yields no
//! candidate base names simply places no constraint on the identifier.

pub mod describe;
pub mod foreach_value;
pub mod iterable_plural;
pub mod type_suffix;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::case::capitalize;

pub use describe::TypeMessageDescriber;
pub use foreach_value::ForeachValueVariableNamingRule;
pub use iterable_plural::IterablePluralNamingRule;
pub use type_suffix::TypeSuffixMismatchRule;

/// Stable identifier of a reported naming problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleIdentifier {
    /// Object-typed name does not end in a type base name
    #[serde(rename = "naming.typeSuffixMismatch")]
    TypeSuffixMismatch,
    /// Interface-typed name repeats the interface base name verbatim
    #[serde(rename = "naming.interfaceBareName")]
    InterfaceBareName,
    /// Iterable name is neither plural nor collection-suffixed
    #[serde(rename = "naming.iterablePluralMismatch")]
    IterablePluralMismatch,
    /// Iterable name contains a `Map` segment
    #[serde(rename = "naming.mapForbidden")]
    MapForbidden,
    /// Foreach value name matches neither the iterable nor its element type
    #[serde(rename = "naming.foreachValueVarMismatch")]
    ForeachValueVarMismatch,
}

impl RuleIdentifier {
    /// Dotted identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeSuffixMismatch => "naming.typeSuffixMismatch",
            Self::InterfaceBareName => "naming.interfaceBareName",
            Self::IterablePluralMismatch => "naming.iterablePluralMismatch",
            Self::MapForbidden => "naming.mapForbidden",
            Self::ForeachValueVarMismatch => "naming.foreachValueVarMismatch",
        }
    }
}

impl fmt::Display for RuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single naming problem reported by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Which check fired
    pub identifier: RuleIdentifier,
    /// Human-readable explanation with the allowed names
    pub message: String,
    /// Source line, when the caller knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl RuleViolation {
    /// Create a violation
    pub fn new(identifier: RuleIdentifier, message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            identifier,
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}: {} [{}]", line, self.message, self.identifier),
            None => write!(f, "{} [{}]", self.message, self.identifier),
        }
    }
}

/// Capitalized forms of `base_names`, joined for a message
pub(crate) fn join_suffixes(base_names: &[String]) -> String {
    base_names
        .iter()
        .map(|base_name| capitalize(base_name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_serializes_to_dotted_name() {
        let json = serde_json::to_string(&RuleIdentifier::MapForbidden).unwrap();
        assert_eq!(json, "\"naming.mapForbidden\"");
        let parsed: RuleIdentifier = serde_json::from_str("\"naming.interfaceBareName\"").unwrap();
        assert_eq!(parsed, RuleIdentifier::InterfaceBareName);
        assert_eq!(parsed.as_str(), "naming.interfaceBareName");
    }

    #[test]
    fn test_violation_display() {
        let violation = RuleViolation::new(RuleIdentifier::TypeSuffixMismatch, "bad name", Some(12));
        assert_eq!(violation.to_string(), "12: bad name [naming.typeSuffixMismatch]");

        let without_line = RuleViolation::new(RuleIdentifier::TypeSuffixMismatch, "bad name", None);
        assert_eq!(without_line.to_string(), "bad name [naming.typeSuffixMismatch]");
    }

    #[test]
    fn test_join_suffixes() {
        let names = vec!["order".to_string(), "orderEntity".to_string()];
        assert_eq!(join_suffixes(&names), "Order, OrderEntity");
    }
}
