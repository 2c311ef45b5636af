//! Type oracle seam.
//!
//! The naming core never inspects source code. Whatever resolves type names
//! to declarations (a static analyser's reflection provider, a serialized
//! type model, a test fixture) plugs in behind [`TypeOracle`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod registry;

pub use registry::{TypeDeclaration, TypeRegistry};

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// A class (concrete or abstract)
    #[default]
    Class,
    /// An interface
    Interface,
    /// A trait
    Trait,
    /// An enum
    Enum,
}

/// An ancestor or interface as reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedType {
    /// Fully-qualified name
    pub name: String,
    /// Whether the type is builtin/internal to the language runtime
    pub is_builtin: bool,
}

impl ReflectedType {
    /// A user-land type
    pub fn userland(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_builtin: false,
        }
    }

    /// A builtin/internal type
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_builtin: true,
        }
    }
}

/// Reflection-like view of one class-like type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReflection {
    /// Canonical fully-qualified name
    pub name: String,
    /// Declaration kind
    pub kind: ClassKind,
    /// Whether the type is builtin/internal
    pub is_builtin: bool,
    /// Parent classes, nearest first
    pub parents: Vec<ReflectedType>,
    /// Every implemented or extended interface, transitively, in declaration order
    pub interfaces: Vec<ReflectedType>,
}

impl ClassReflection {
    /// Whether the type is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

/// Resolves type names to reflection data.
pub trait TypeOracle {
    /// Reflect `name`, or `None` when the type is unknown to the oracle.
    fn reflect(&self, name: &str) -> Option<ClassReflection>;
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    fn reflect(&self, name: &str) -> Option<ClassReflection> {
        (**self).reflect(name)
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for Arc<O> {
    fn reflect(&self, name: &str) -> Option<ClassReflection> {
        (**self).reflect(name)
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for Box<O> {
    fn reflect(&self, name: &str) -> Option<ClassReflection> {
        (**self).reflect(name)
    }
}

/// An oracle that knows no types.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl TypeOracle for NullOracle {
    fn reflect(&self, _name: &str) -> Option<ClassReflection> {
        None
    }
}
