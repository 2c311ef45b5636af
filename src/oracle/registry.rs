//! In-memory type oracle built from declarations.
//!
//! A registry is loaded from a YAML or JSON type model:
//!
//! ```yaml
//! types:
//!   - name: App\Domain\CustomDomainDto
//!     extends: [App\Domain\DomainBaseEntity]
//!     implements: [App\Domain\DomainChildInterface]
//!   - name: App\Domain\DomainChildInterface
//!     kind: interface
//!     extends: [App\Domain\DomainRootInterface]
//! ```
//!
//! Lookups are case-insensitive, as class names are in PHP; reflections
//! report the declared spelling.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ClassKind, ClassReflection, ReflectedType, TypeOracle};
use crate::core::errors::{NomenError, Result};
use crate::core::types::{TypeName, NAMESPACE_SEPARATOR};

/// One class-like declaration in a type model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Fully-qualified name
    pub name: TypeName,
    /// Declaration kind
    #[serde(default)]
    pub kind: ClassKind,
    /// Parent class (classes) or parent interfaces (interfaces)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<TypeName>,
    /// Implemented interfaces (classes and enums)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeName>,
    /// Whether the type belongs to the language runtime
    #[serde(default)]
    pub builtin: bool,
}

impl TypeDeclaration {
    /// A user-land class
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            extends: Vec::new(),
            implements: Vec::new(),
            builtin: false,
        }
    }

    /// A user-land interface
    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self {
            kind: ClassKind::Interface,
            ..Self::class(name)
        }
    }

    /// Set the parent class, or add a parent interface
    pub fn extending(mut self, parent: impl Into<TypeName>) -> Self {
        self.extends.push(parent.into());
        self
    }

    /// Add an implemented interface
    pub fn implementing(mut self, interface: impl Into<TypeName>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Mark as builtin/internal
    pub fn as_builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    fn validate(&self, index: usize) -> Result<()> {
        let field = format!("types[{index}]");
        if self.name.is_empty() {
            return Err(NomenError::validation_field("Type name cannot be empty", field));
        }
        if self.name.as_str().contains(char::is_whitespace) {
            return Err(NomenError::validation_field(
                format!("Type name `{}` contains whitespace", self.name),
                field,
            ));
        }
        match self.kind {
            ClassKind::Class if self.extends.len() > 1 => Err(NomenError::validation_field(
                format!("Class `{}` cannot extend more than one class", self.name),
                format!("{field}.extends"),
            )),
            ClassKind::Enum | ClassKind::Trait if !self.extends.is_empty() => {
                Err(NomenError::validation_field(
                    format!("`{}` cannot extend other types", self.name),
                    format!("{field}.extends"),
                ))
            }
            ClassKind::Interface | ClassKind::Trait if !self.implements.is_empty() => {
                Err(NomenError::validation_field(
                    format!("`{}` cannot implement interfaces", self.name),
                    format!("{field}.implements"),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Serialized form of a registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeModel {
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

/// Type oracle over a fixed set of declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    declarations: IndexMap<String, TypeDeclaration>,
}

impl TypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with common PHP runtime types, all builtin
    pub fn with_php_builtins() -> Self {
        let mut registry = Self::new();
        for declaration in php_builtin_declarations() {
            registry.register(declaration);
        }
        registry
    }

    /// Build a registry from declarations, validating each one
    pub fn from_declarations(declarations: impl IntoIterator<Item = TypeDeclaration>) -> Result<Self> {
        let mut registry = Self::new();
        registry.extend(declarations)?;
        Ok(registry)
    }

    /// Validate and register declarations
    pub fn extend(&mut self, declarations: impl IntoIterator<Item = TypeDeclaration>) -> Result<()> {
        for (index, declaration) in declarations.into_iter().enumerate() {
            declaration.validate(index)?;
            self.register(declaration);
        }
        Ok(())
    }

    /// Register a declaration, replacing any earlier one with the same name
    pub fn register(&mut self, declaration: TypeDeclaration) {
        let key = lookup_key(declaration.name.as_str());
        let name = declaration.name.to_string();
        if self.declarations.insert(key, declaration).is_some() {
            debug!("Replaced earlier declaration of {}", name);
        }
    }

    /// Load a type model from a YAML or JSON file, on top of the PHP builtins
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NomenError::io(format!("Failed to read type model: {}", path.display()), e)
        })?;
        let model: TypeModel = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };

        let mut registry = Self::with_php_builtins();
        registry.extend(model.types)?;
        debug!("Loaded {} type declarations from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Look up a declaration by name, case-insensitively
    pub fn declaration(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(&lookup_key(name))
    }

    fn reflected(&self, name: &TypeName) -> (ReflectedType, Option<&TypeDeclaration>) {
        match self.declaration(name.as_str()) {
            Some(declaration) => (
                ReflectedType {
                    name: declaration.name.to_string(),
                    is_builtin: declaration.builtin,
                },
                Some(declaration),
            ),
            None => (ReflectedType::userland(name.as_str()), None),
        }
    }

    /// Parent chain, nearest first. Stops at an undeclared parent or a cycle.
    fn parent_chain<'a>(&'a self, declaration: &'a TypeDeclaration) -> Vec<(ReflectedType, Option<&'a TypeDeclaration>)> {
        let mut chain = Vec::new();
        if declaration.kind != ClassKind::Class {
            return chain;
        }

        let mut visited: HashSet<String> = HashSet::from([lookup_key(declaration.name.as_str())]);
        let mut current = declaration;
        while let Some(parent_name) = current.extends.first() {
            if !visited.insert(lookup_key(parent_name.as_str())) {
                warn!("Cyclic class hierarchy through {}", parent_name);
                break;
            }
            let (reflected, parent) = self.reflected(parent_name);
            chain.push((reflected, parent));
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chain
    }

    fn collect_interfaces(
        &self,
        names: &[TypeName],
        visited: &mut HashSet<String>,
        interfaces: &mut Vec<ReflectedType>,
    ) {
        for name in names {
            if !visited.insert(lookup_key(name.as_str())) {
                continue;
            }
            let (reflected, declaration) = self.reflected(name);
            interfaces.push(reflected);
            if let Some(declaration) = declaration {
                self.collect_interfaces(&declaration.extends, visited, interfaces);
            }
        }
    }
}

impl TypeOracle for TypeRegistry {
    fn reflect(&self, name: &str) -> Option<ClassReflection> {
        let declaration = self.declaration(name)?;
        let chain = self.parent_chain(declaration);

        let mut visited: HashSet<String> = HashSet::from([lookup_key(declaration.name.as_str())]);
        let mut interfaces = Vec::new();
        match declaration.kind {
            ClassKind::Interface => {
                self.collect_interfaces(&declaration.extends, &mut visited, &mut interfaces);
            }
            ClassKind::Class | ClassKind::Enum => {
                self.collect_interfaces(&declaration.implements, &mut visited, &mut interfaces);
                for (_, parent) in &chain {
                    if let Some(parent) = parent {
                        self.collect_interfaces(&parent.implements, &mut visited, &mut interfaces);
                    }
                }
            }
            ClassKind::Trait => {}
        }

        Some(ClassReflection {
            name: declaration.name.to_string(),
            kind: declaration.kind,
            is_builtin: declaration.builtin,
            parents: chain.into_iter().map(|(reflected, _)| reflected).collect(),
            interfaces,
        })
    }
}

fn lookup_key(name: &str) -> String {
    name.trim_start_matches(NAMESPACE_SEPARATOR).to_lowercase()
}

fn php_builtin_declarations() -> Vec<TypeDeclaration> {
    let interface = |name: &str| TypeDeclaration::interface(name).as_builtin();
    let class = |name: &str| TypeDeclaration::class(name).as_builtin();

    vec![
        interface("Traversable"),
        interface("Iterator").extending("Traversable"),
        interface("IteratorAggregate").extending("Traversable"),
        interface("ArrayAccess"),
        interface("Countable"),
        interface("Stringable"),
        interface("JsonSerializable"),
        interface("Serializable"),
        interface("UnitEnum"),
        interface("BackedEnum").extending("UnitEnum"),
        interface("Throwable").extending("Stringable"),
        interface("DateTimeInterface"),
        class("Exception").implementing("Throwable"),
        class("Error").implementing("Throwable"),
        class("ErrorException").extending("Exception"),
        class("RuntimeException").extending("Exception"),
        class("LogicException").extending("Exception"),
        class("DomainException").extending("LogicException"),
        class("InvalidArgumentException").extending("LogicException"),
        class("UnexpectedValueException").extending("RuntimeException"),
        class("DateTime").implementing("DateTimeInterface"),
        class("DateTimeImmutable").implementing("DateTimeInterface"),
        class("DateTimeZone"),
        class("DateInterval"),
        class("ArrayObject")
            .implementing("IteratorAggregate")
            .implementing("ArrayAccess")
            .implementing("Serializable")
            .implementing("Countable"),
        class("ArrayIterator")
            .implementing("Iterator")
            .implementing("ArrayAccess")
            .implementing("Serializable")
            .implementing("Countable"),
        class("Generator").implementing("Iterator"),
        class("Closure"),
        class("stdClass"),
        class("SplObjectStorage")
            .implementing("Countable")
            .implementing("Iterator")
            .implementing("Serializable")
            .implementing("ArrayAccess"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::with_php_builtins();
        registry
            .extend([
                TypeDeclaration::interface("App\\DomainRootInterface"),
                TypeDeclaration::interface("App\\DomainChildInterface").extending("App\\DomainRootInterface"),
                TypeDeclaration::class("App\\DomainBaseEntity").implementing("App\\DomainChildInterface"),
                TypeDeclaration::class("App\\CustomDomainDto")
                    .extending("App\\DomainBaseEntity")
                    .implementing("JsonSerializable"),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn test_reflect_reports_parents_and_transitive_interfaces() {
        let registry = domain_registry();
        let reflection = registry.reflect("App\\CustomDomainDto").unwrap();

        assert_eq!(reflection.kind, ClassKind::Class);
        assert!(!reflection.is_builtin);
        assert_eq!(reflection.parents, vec![ReflectedType::userland("App\\DomainBaseEntity")]);
        assert_eq!(
            reflection.interfaces,
            vec![
                ReflectedType::builtin("JsonSerializable"),
                ReflectedType::userland("App\\DomainChildInterface"),
                ReflectedType::userland("App\\DomainRootInterface"),
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_reports_declared_name() {
        let registry = domain_registry();
        let reflection = registry.reflect("\\app\\customdomaindto").unwrap();
        assert_eq!(reflection.name, "App\\CustomDomainDto");
    }

    #[test]
    fn test_interface_reflection_lists_parent_interfaces() {
        let registry = domain_registry();
        let reflection = registry.reflect("App\\DomainChildInterface").unwrap();
        assert!(reflection.is_interface());
        assert!(reflection.parents.is_empty());
        assert_eq!(reflection.interfaces, vec![ReflectedType::userland("App\\DomainRootInterface")]);
    }

    #[test]
    fn test_builtin_chain() {
        let registry = TypeRegistry::with_php_builtins();
        let reflection = registry.reflect("InvalidArgumentException").unwrap();
        assert!(reflection.is_builtin);
        let parents: Vec<&str> = reflection.parents.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(parents, vec!["LogicException", "Exception"]);
        let interfaces: Vec<&str> = reflection.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(interfaces, vec!["Throwable", "Stringable"]);
    }

    #[test]
    fn test_unknown_type_is_not_reflected() {
        assert!(TypeRegistry::new().reflect("App\\Missing").is_none());
    }

    #[test]
    fn test_undeclared_parent_ends_the_chain() {
        let registry = TypeRegistry::from_declarations([
            TypeDeclaration::class("App\\Child").extending("Vendor\\UnknownBase"),
        ])
        .unwrap();
        let reflection = registry.reflect("App\\Child").unwrap();
        assert_eq!(reflection.parents, vec![ReflectedType::userland("Vendor\\UnknownBase")]);
    }

    #[test]
    fn test_cyclic_model_terminates() {
        let registry = TypeRegistry::from_declarations([
            TypeDeclaration::class("A").extending("B"),
            TypeDeclaration::class("B").extending("A"),
            TypeDeclaration::interface("I").extending("J"),
            TypeDeclaration::interface("J").extending("I"),
        ])
        .unwrap();
        let class = registry.reflect("A").unwrap();
        assert_eq!(class.parents, vec![ReflectedType::userland("B")]);
        let interface = registry.reflect("I").unwrap();
        assert_eq!(interface.interfaces, vec![ReflectedType::userland("J")]);
    }

    #[test]
    fn test_invalid_declarations_are_rejected() {
        let err = TypeRegistry::from_declarations([
            TypeDeclaration::class("Ok"),
            TypeDeclaration::class("Bad").extending("A").extending("B"),
        ])
        .unwrap_err();
        assert_eq!(err.field(), Some("types[1].extends"));

        assert!(TypeRegistry::from_declarations([TypeDeclaration::class("")]).is_err());
        assert!(
            TypeRegistry::from_declarations([TypeDeclaration::interface("I").implementing("J")]).is_err()
        );
    }

    #[test]
    fn test_model_deserializes_from_yaml() {
        let yaml = r"
types:
  - name: App\Order
    extends: [App\AbstractAggregate]
    implements: [App\OrderInterface]
  - name: App\OrderInterface
    kind: interface
";
        let model: TypeModel = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(model.types.len(), 2);
        assert_eq!(model.types[0].kind, ClassKind::Class);
        assert_eq!(model.types[1].kind, ClassKind::Interface);
        assert_eq!(model.types[0].extends, vec![TypeName::new("App\\AbstractAggregate")]);
    }
}
