//! # Nomen-RS: Type-Driven Identifier Naming
//!
//! Derives the acceptable names for a variable, property or loop variable
//! from the type it holds, and reports identifiers that hide their type behind
//! generic names such as `$item` or `$data`.
//!
//! - **Normalization**: class names become camelCase base names, with
//!   `Interface`/`Abstract`/`Trait` noise removed and `Dto`/`Vo`/`Entity`
//!   made optional
//! - **Hierarchy Expansion**: parents and interfaces contribute base names,
//!   memoized per type
//! - **Inflection**: plural and collection-style names for iterables,
//!   singular names for loop values
//! - **Rules**: type-suffix, iterable-plural and foreach-value checks with
//!   deterministic messages
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        API Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │    Rules       │        Naming Core         │    Oracle     │
//! │                │                            │               │
//! │ • Type suffix  │ • Case / inflection        │ • TypeOracle  │
//! │ • Iterables    │ • Normalizer / deny list   │ • Registry    │
//! │ • Foreach      │ • Hierarchy / resolver     │ • Builtins    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use nomen_rs::{NamingConfig, NamingEngine, NamingSubject, TypeDescriptor, TypeRegistry};
//!
//! let engine = NamingEngine::new(NamingConfig::default(), TypeRegistry::with_php_builtins())?;
//! let subject = NamingSubject::Variable {
//!     name: "item".to_string(),
//!     type_descriptor: TypeDescriptor::parse("App\\OrderEntity")?,
//!     line: Some(12),
//! };
//!
//! let violations = engine.check(&subject);
//! assert_eq!(violations.len(), 1);
//! # Ok::<(), nomen_rs::NomenError>(())
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

// Shared types, errors and configuration
pub mod core {
    //! Core data types, errors and configuration.

    pub mod config;
    pub mod errors;
    pub mod types;
}

// Type-to-name derivation
pub mod naming {
    //! Candidate base name derivation and identifier matching.

    pub mod case;
    pub mod deny_list;
    pub mod hierarchy;
    pub mod inflection;
    pub mod matcher;
    pub mod normalizer;
    pub mod resolver;
}

// Type reflection
pub mod oracle;

// Naming rules
pub mod rules;

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
}

// Re-export primary types for convenience
pub use api::engine::{NamingEngine, NamingReport, NamingSubject, NamingSubjects};
pub use core::config::{NamingConfig, NomenConfig, RuleToggles};
pub use core::errors::{NomenError, Result};
pub use core::types::{TypeDescriptor, TypeName};
pub use naming::resolver::TypeCandidateResolver;
pub use oracle::{TypeOracle, TypeRegistry};
pub use rules::{RuleIdentifier, RuleViolation};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
