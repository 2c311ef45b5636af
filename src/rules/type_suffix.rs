//! Object-typed names must end in a base name of their type.

use std::sync::Arc;

use tracing::debug;

use crate::core::types::TypeDescriptor;
use crate::naming::case::capitalize;
use crate::naming::matcher::VariableNameMatcher;
use crate::naming::resolver::TypeCandidateResolver;
use crate::oracle::TypeOracle;
use crate::rules::describe::TypeMessageDescriber;
use crate::rules::{join_suffixes, RuleIdentifier, RuleViolation};

/// Reports variables and properties whose names hide their object type.
///
/// `$item = new FooData()` is reported; `$fooData` and `$initialFooData` are
/// accepted. With the interface bare-name check enabled, a property typed
/// `ChannelInterface` and named `$channel` is also reported so that a
/// contextual name such as `$readChannel` is chosen instead.
pub struct TypeSuffixMismatchRule<O> {
    resolver: Arc<TypeCandidateResolver<O>>,
    matcher: VariableNameMatcher,
    describer: TypeMessageDescriber,
    enable_interface_bare_name_check: bool,
}

impl<O: TypeOracle> TypeSuffixMismatchRule<O> {
    /// Create the rule with the interface bare-name check disabled
    pub fn new(resolver: Arc<TypeCandidateResolver<O>>) -> Self {
        Self {
            resolver,
            matcher: VariableNameMatcher::new(),
            describer: TypeMessageDescriber::new(),
            enable_interface_bare_name_check: false,
        }
    }

    /// Enable or disable the interface bare-name check
    pub fn with_interface_bare_name_check(mut self, enabled: bool) -> Self {
        self.enable_interface_bare_name_check = enabled;
        self
    }

    /// Whether the interface bare-name check is enabled
    pub fn interface_bare_name_check_enabled(&self) -> bool {
        self.enable_interface_bare_name_check
    }

    /// Check `name` against the inferred `descriptor`.
    pub fn check(&self, name: &str, descriptor: &TypeDescriptor, line: Option<usize>) -> Vec<RuleViolation> {
        let mut candidates = self.resolver.resolve_candidates(descriptor);
        if candidates.is_empty() {
            return Vec::new();
        }
        candidates.sort();

        let mut violations = Vec::new();

        if !self.matcher.is_valid_for_any(name, &candidates) {
            debug!("Name {} does not match any of {} candidates", name, candidates.len());
            violations.push(RuleViolation::new(
                RuleIdentifier::TypeSuffixMismatch,
                self.mismatch_message(name, descriptor, &candidates),
                line,
            ));
        }

        if !self.enable_interface_bare_name_check {
            return violations;
        }

        let interface_base_names = self.resolver.resolve_direct_interface_base_names(descriptor);
        let bare_interface = interface_base_names
            .iter()
            .find(|(base_name, _)| self.matcher.should_report_bare_name_notice(name, base_name));
        if let Some((_, interface_short_name)) = bare_interface {
            violations.push(RuleViolation::new(
                RuleIdentifier::InterfaceBareName,
                bare_name_message(name, interface_short_name),
                line,
            ));
        }

        violations
    }

    /// Check a promoted constructor property whose type was narrowed by a
    /// doc tag.
    ///
    /// Violations against the `narrowed` type are dropped when any base name
    /// of the `declared` type accepts the name, since a narrowed name may
    /// not resolve to the full hierarchy of the declared type.
    pub fn check_with_declared_fallback(
        &self,
        name: &str,
        narrowed: &TypeDescriptor,
        declared: Option<&TypeDescriptor>,
        line: Option<usize>,
    ) -> Vec<RuleViolation> {
        let violations = self.check(name, narrowed, line);
        if violations.is_empty() {
            return violations;
        }

        if let Some(declared) = declared {
            let declared_candidates = self.resolver.resolve_candidates(declared);
            if self.matcher.is_valid_for_any(name, &declared_candidates) {
                debug!("Name {} accepted through declared type {}", name, declared);
                return Vec::new();
            }
        }

        violations
    }

    fn mismatch_message(&self, name: &str, descriptor: &TypeDescriptor, candidates: &[String]) -> String {
        format!(
            "Name \"${}\" does not match inferred type \"{}\". Allowed base names: {}. \
             Use one of these names directly or a contextual prefix ending with: {}.",
            name,
            self.describer.describe_type(descriptor),
            candidates.join(", "),
            join_suffixes(candidates),
        )
    }
}

fn bare_name_message(name: &str, interface_short_name: &str) -> String {
    format!(
        "Interface-typed name \"${}\" uses the bare interface base name \"{}\" \
         (inferred interface type: {}). Prefer a contextual prefix like \"$read{}\".",
        name,
        name,
        interface_short_name,
        capitalize(name),
    )
}
