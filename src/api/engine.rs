//! Main naming engine implementation.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::NamingConfig;
use crate::core::errors::{NomenError, Result};
use crate::core::types::TypeDescriptor;
use crate::naming::resolver::{CacheStatistics, TypeCandidateResolver};
use crate::oracle::TypeOracle;
use crate::rules::{
    ForeachValueVariableNamingRule, IterablePluralNamingRule, RuleIdentifier, RuleViolation,
    TypeSuffixMismatchRule,
};

/// An identifier to check, together with the type information it carries.
///
/// Types are written as type expressions (`?App\Order`, `array<int, Node>`)
/// when subjects are read from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NamingSubject {
    /// Variable or property fetch assigned a value
    Variable {
        /// Variable name without `$`
        name: String,
        /// Inferred type of the assigned value
        #[serde(rename = "type", with = "type_expression")]
        type_descriptor: TypeDescriptor,
        /// Source line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
    /// Typed class property
    Property {
        /// Property name
        name: String,
        /// Declared or doc-narrowed property type
        #[serde(rename = "type", with = "type_expression")]
        type_descriptor: TypeDescriptor,
        /// Source line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
    /// Promoted constructor property, possibly narrowed by a doc tag
    PromotedProperty {
        /// Property name
        name: String,
        /// Effective type after doc-tag narrowing
        #[serde(rename = "type", with = "type_expression")]
        type_descriptor: TypeDescriptor,
        /// Type written in the parameter declaration
        #[serde(default, skip_serializing_if = "Option::is_none", with = "optional_type_expression")]
        declared_type: Option<TypeDescriptor>,
        /// Source line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
    /// Assignment whose value is known to be iterable; checked like `Variable`
    IterableAssignment {
        /// Assignment target name
        name: String,
        /// Inferred type of the assigned value
        #[serde(rename = "type", with = "type_expression")]
        type_descriptor: TypeDescriptor,
        /// Source line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
    /// `foreach ($iterable as $value)`
    ForeachValue {
        /// Value variable name
        value_name: String,
        /// Iterated variable, absent for other expressions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        iterable_name: Option<String>,
        /// Type of the iterated expression
        #[serde(with = "type_expression")]
        iterable_type: TypeDescriptor,
        /// Source line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
}

impl NamingSubject {
    /// The identifier being checked
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. }
            | Self::Property { name, .. }
            | Self::PromotedProperty { name, .. }
            | Self::IterableAssignment { name, .. } => name,
            Self::ForeachValue { value_name, .. } => value_name,
        }
    }
}

/// A batch of subjects as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingSubjects {
    /// Subjects in check order
    #[serde(default)]
    pub subjects: Vec<NamingSubject>,
}

impl NamingSubjects {
    /// Load subjects from a YAML or JSON file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NomenError::io(format!("Failed to read subjects file: {}", path.display()), e)
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(Into::into),
            _ => serde_yaml::from_str(&content).map_err(Into::into),
        }
    }
}

/// A violation attributed to the subject that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingFinding {
    /// Position of the subject in the checked batch
    pub subject_index: usize,
    /// Identifier of the subject
    pub subject_name: String,
    /// The reported violation
    #[serde(flatten)]
    pub violation: RuleViolation,
}

/// Result of checking a batch of subjects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingReport {
    /// Number of subjects checked
    pub subjects_checked: usize,
    /// Violations in subject order
    pub findings: Vec<NamingFinding>,
}

impl NamingReport {
    /// Total number of violations
    pub fn violation_count(&self) -> usize {
        self.findings.len()
    }

    /// Whether no violations were reported
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of subjects with at least one violation
    pub fn subjects_with_violations(&self) -> usize {
        let mut indices: Vec<usize> = self.findings.iter().map(|finding| finding.subject_index).collect();
        indices.dedup();
        indices.len()
    }

    /// Violation counts per rule identifier, in first-reported order
    pub fn counts_by_identifier(&self) -> IndexMap<RuleIdentifier, usize> {
        let mut counts: IndexMap<RuleIdentifier, usize> = IndexMap::new();
        for finding in &self.findings {
            *counts.entry(finding.violation.identifier).or_insert(0) += 1;
        }
        counts
    }
}

/// Main naming engine
///
/// Owns one candidate resolver shared by every rule, so hierarchy and
/// candidate caches are reused across all subjects the engine checks.
pub struct NamingEngine<O> {
    config: NamingConfig,
    resolver: Arc<TypeCandidateResolver<O>>,
    type_suffix: TypeSuffixMismatchRule<O>,
    iterable_plural: IterablePluralNamingRule<O>,
    foreach_value: ForeachValueVariableNamingRule<O>,
}

impl<O: TypeOracle> NamingEngine<O> {
    /// Create an engine from a validated naming configuration
    pub fn new(config: NamingConfig, oracle: O) -> Result<Self> {
        info!("Initializing naming engine");
        config.validate()?;

        let deny_list = config.deny_list();
        debug!(
            "Deny list holds {} type names and {} candidate names",
            deny_list.type_name_count(),
            deny_list.candidate_name_count()
        );

        let resolver = Arc::new(TypeCandidateResolver::with_deny_list(oracle, deny_list));
        let type_suffix = TypeSuffixMismatchRule::new(Arc::clone(&resolver))
            .with_interface_bare_name_check(config.enable_interface_bare_name_check);
        let iterable_plural = IterablePluralNamingRule::new(Arc::clone(&resolver));
        let foreach_value = ForeachValueVariableNamingRule::new(Arc::clone(&resolver));

        info!("Naming engine initialized successfully");

        Ok(Self {
            config,
            resolver,
            type_suffix,
            iterable_plural,
            foreach_value,
        })
    }

    /// Check a single subject against every enabled rule that applies to it
    ///
    /// Assignments (`Variable`, `IterableAssignment`) run the type-suffix rule
    /// and then the iterable-plural rule; each skips types it does not constrain.
    /// Property declarations run only the type-suffix rule.
    pub fn check(&self, subject: &NamingSubject) -> Vec<RuleViolation> {
        let rules = self.config.rules;
        match subject {
            NamingSubject::Variable {
                name,
                type_descriptor,
                line,
            }
            | NamingSubject::IterableAssignment {
                name,
                type_descriptor,
                line,
            } => {
                let mut violations = Vec::new();
                if rules.type_suffix_mismatch {
                    violations.extend(self.type_suffix.check(name, type_descriptor, *line));
                }
                if rules.iterable_plural {
                    violations.extend(self.iterable_plural.check(name, type_descriptor, *line));
                }
                violations
            }
            NamingSubject::Property {
                name,
                type_descriptor,
                line,
            } if rules.type_suffix_mismatch => self.type_suffix.check(name, type_descriptor, *line),
            NamingSubject::PromotedProperty {
                name,
                type_descriptor,
                declared_type,
                line,
            } if rules.type_suffix_mismatch => self.type_suffix.check_with_declared_fallback(
                name,
                type_descriptor,
                declared_type.as_ref(),
                *line,
            ),
            NamingSubject::ForeachValue {
                value_name,
                iterable_name,
                iterable_type,
                line,
            } if rules.foreach_value => {
                self.foreach_value
                    .check(value_name, iterable_name.as_deref(), iterable_type, *line)
            }
            _ => Vec::new(),
        }
    }

    /// Check a batch of subjects
    pub fn check_all(&self, subjects: &[NamingSubject]) -> NamingReport {
        let mut report = NamingReport {
            subjects_checked: subjects.len(),
            findings: Vec::new(),
        };

        for (subject_index, subject) in subjects.iter().enumerate() {
            for violation in self.check(subject) {
                report.findings.push(NamingFinding {
                    subject_index,
                    subject_name: subject.name().to_string(),
                    violation,
                });
            }
        }

        let statistics = self.statistics();
        info!(
            "Checked {} subjects: {} violations (candidate cache hit rate {:.1}%)",
            report.subjects_checked,
            report.violation_count(),
            statistics.hit_rate() * 100.0
        );

        report
    }

    /// Sorted candidate base names for a type
    pub fn candidates(&self, descriptor: &TypeDescriptor) -> Vec<String> {
        let mut candidates = self.resolver.resolve_candidates(descriptor);
        candidates.sort();
        candidates
    }

    /// Interface base names named directly in a type, with the interface short name
    pub fn interface_base_names(&self, descriptor: &TypeDescriptor) -> IndexMap<String, String> {
        self.resolver.resolve_direct_interface_base_names(descriptor)
    }

    /// The configuration in use
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// The shared candidate resolver
    pub fn resolver(&self) -> &TypeCandidateResolver<O> {
        &self.resolver
    }

    /// The type suffix rule, for checking single identifiers
    pub fn type_suffix_rule(&self) -> &TypeSuffixMismatchRule<O> {
        &self.type_suffix
    }

    /// Candidate cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        self.resolver.statistics()
    }
}

mod type_expression {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::types::TypeDescriptor;

    pub fn serialize<S: Serializer>(descriptor: &TypeDescriptor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(descriptor)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TypeDescriptor, D::Error> {
        let expression = String::deserialize(deserializer)?;
        TypeDescriptor::parse(&expression).map_err(serde::de::Error::custom)
    }
}

mod optional_type_expression {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::types::TypeDescriptor;

    pub fn serialize<S: Serializer>(
        descriptor: &Option<TypeDescriptor>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match descriptor {
            Some(descriptor) => serializer.collect_str(descriptor),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TypeDescriptor>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|expression| TypeDescriptor::parse(&expression).map_err(serde::de::Error::custom))
            .transpose()
    }
}
