//! Iterables of objects must use plural or collection-style names.

use std::sync::Arc;

use tracing::debug;

use crate::core::types::TypeDescriptor;
use crate::naming::case::split_before_uppercase;
use crate::naming::inflection::{pluralize, COLLECTION_SUFFIXES};
use crate::naming::matcher::VariableNameMatcher;
use crate::naming::resolver::TypeCandidateResolver;
use crate::oracle::TypeOracle;
use crate::rules::describe::TypeMessageDescriber;
use crate::rules::{RuleIdentifier, RuleViolation};

const FORBIDDEN_SEGMENT: &str = "map";

/// Reports iterable assignments whose name does not describe the elements.
///
/// For `array<int, Node>` the names `$nodes`, `$nodeList`, `$activeNodeList`
/// and `$nodeById` are accepted. `$itemList` is reported, as is any name with
/// a `Map` segment such as `$nodeMap`.
pub struct IterablePluralNamingRule<O> {
    resolver: Arc<TypeCandidateResolver<O>>,
    matcher: VariableNameMatcher,
    describer: TypeMessageDescriber,
}

impl<O: TypeOracle> IterablePluralNamingRule<O> {
    /// Create the rule over a shared resolver
    pub fn new(resolver: Arc<TypeCandidateResolver<O>>) -> Self {
        Self {
            resolver,
            matcher: VariableNameMatcher::new(),
            describer: TypeMessageDescriber::new(),
        }
    }

    /// Check the name an iterable of `descriptor` is assigned to.
    pub fn check(&self, name: &str, descriptor: &TypeDescriptor, line: Option<usize>) -> Vec<RuleViolation> {
        let Some(value_type) = descriptor.iterable_value_type() else {
            return Vec::new();
        };

        let mut candidates = self.resolver.resolve_candidates(&value_type);
        if candidates.is_empty() {
            return Vec::new();
        }
        candidates.sort();

        let mut violations = Vec::new();

        if contains_forbidden_map_segment(name) {
            violations.push(RuleViolation::new(
                RuleIdentifier::MapForbidden,
                format!(
                    "Iterable name \"${}\" contains forbidden segment \"Map\". \
                     Use \"List\", \"Collection\", \"Lookup\", \"ById\", or \"ByKey\" naming instead.",
                    name
                ),
                line,
            ));
        }

        if !self.is_valid_for_any_collection_name(name, &candidates) {
            debug!("Iterable name {} does not match {} candidates", name, candidates.len());
            violations.push(RuleViolation::new(
                RuleIdentifier::IterablePluralMismatch,
                format!(
                    "Iterable name \"${}\" does not match inferred iterable element type \"{}\". \
                     Allowed base names: {}. Use plural form or collection suffixes: {}.",
                    name,
                    self.describer.describe_iterable_value_type(descriptor),
                    candidates.join(", "),
                    COLLECTION_SUFFIXES.join(", "),
                ),
                line,
            ));
        }

        violations
    }

    fn is_valid_for_any_collection_name(&self, name: &str, candidates: &[String]) -> bool {
        candidates.iter().any(|candidate| {
            self.matcher.is_valid(name, &pluralize(candidate))
                || COLLECTION_SUFFIXES
                    .iter()
                    .any(|suffix| self.matcher.is_valid(name, &format!("{candidate}{suffix}")))
        })
    }
}

fn contains_forbidden_map_segment(name: &str) -> bool {
    split_before_uppercase(name)
        .into_iter()
        .any(|segment| segment.eq_ignore_ascii_case(FORBIDDEN_SEGMENT))
}
