//! Foreach value variables must be named after the iterable or its elements.

use std::sync::Arc;

use tracing::debug;

use crate::core::types::TypeDescriptor;
use crate::naming::inflection::singularize;
use crate::naming::matcher::VariableNameMatcher;
use crate::naming::resolver::TypeCandidateResolver;
use crate::oracle::TypeOracle;
use crate::rules::describe::TypeMessageDescriber;
use crate::rules::{join_suffixes, RuleIdentifier, RuleViolation};

const CHILDREN_SUFFIX: &str = "children";

/// Reports foreach value variables with uninformative names.
///
/// Allowed base names come from the singularized iterable variable and from
/// the iterable's element type. With `$children` of type
/// `array<int, ChildNode>`, `$child`, `$childNode` and `$firstChildNode` are
/// accepted while `$item` is reported.
pub struct ForeachValueVariableNamingRule<O> {
    resolver: Arc<TypeCandidateResolver<O>>,
    matcher: VariableNameMatcher,
    describer: TypeMessageDescriber,
}

impl<O: TypeOracle> ForeachValueVariableNamingRule<O> {
    /// Create the rule over a shared resolver
    pub fn new(resolver: Arc<TypeCandidateResolver<O>>) -> Self {
        Self {
            resolver,
            matcher: VariableNameMatcher::new(),
            describer: TypeMessageDescriber::new(),
        }
    }

    /// Check `value_name` in `foreach ($iterable_name as $value_name)`.
    ///
    /// `iterable_name` is `None` when the iterated expression is not a plain
    /// variable; only the element type contributes base names then.
    pub fn check(
        &self,
        value_name: &str,
        iterable_name: Option<&str>,
        iterable_type: &TypeDescriptor,
        line: Option<usize>,
    ) -> Vec<RuleViolation> {
        let mut allowed = self.allowed_base_names(iterable_name, iterable_type);
        if allowed.is_empty() {
            return Vec::new();
        }
        allowed.sort();

        if self.matcher.is_valid_for_any(value_name, &allowed) {
            return Vec::new();
        }

        debug!("Foreach value {} matches none of {} base names", value_name, allowed.len());
        let iterable_description = match iterable_name {
            Some(iterable_name) => format!("\"${iterable_name}\""),
            None => "\"<expression>\"".to_string(),
        };
        vec![RuleViolation::new(
            RuleIdentifier::ForeachValueVarMismatch,
            format!(
                "Foreach value name \"${}\" does not match iterable {} (inferred value type: \"{}\"). \
                 Allowed base names: {}. Use one of these names directly or a contextual prefix ending with: {}.",
                value_name,
                iterable_description,
                self.describe_value_type(iterable_type),
                allowed.join(", "),
                join_suffixes(&allowed),
            ),
            line,
        )]
    }

    fn allowed_base_names(&self, iterable_name: Option<&str>, iterable_type: &TypeDescriptor) -> Vec<String> {
        let mut allowed: Vec<String> = Vec::new();

        if let Some(base_name) = iterable_name.map(singularize_iterable_name) {
            if !base_name.is_empty() {
                allowed.push(base_name);
            }
        }

        if let Some(value_type) = iterable_type.iterable_value_type() {
            for candidate in self.resolver.resolve_candidates(&value_type) {
                if !allowed.contains(&candidate) {
                    allowed.push(candidate);
                }
            }
        }

        allowed
    }

    fn describe_value_type(&self, iterable_type: &TypeDescriptor) -> String {
        match iterable_type.iterable_value_type() {
            Some(value_type) => self.describer.describe_type(&value_type),
            None => iterable_type.to_string(),
        }
    }
}

/// Singular base name of an iterable variable.
///
/// `children` and names ending in it map to `child`, since the plural is
/// irregular. Everything else goes through [`singularize`].
pub fn singularize_iterable_name(iterable_name: &str) -> String {
    let split_at = iterable_name.len().saturating_sub(CHILDREN_SUFFIX.len());
    let ends_with_children = iterable_name
        .get(split_at..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(CHILDREN_SUFFIX));

    if !ends_with_children {
        return singularize(iterable_name);
    }

    let prefix = &iterable_name[..split_at];
    if prefix.is_empty() {
        "child".to_string()
    } else {
        format!("{prefix}Child")
    }
}
