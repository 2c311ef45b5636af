//! Type hierarchy expansion with per-name memoization.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::core::types::TypeName;
use crate::oracle::{ReflectedType, TypeOracle};

/// A type followed by its user-land ancestors and interfaces.
///
/// Order: the type itself, parent classes nearest first, then interfaces in
/// the order the oracle reports them. Builtin types never appear and no
/// name appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyClosure {
    members: Vec<TypeName>,
}

impl HierarchyClosure {
    /// Closure with no members (builtin types)
    pub fn empty() -> Self {
        Self::default()
    }

    fn push_unique(&mut self, name: TypeName) {
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }

    fn push_reflected(&mut self, reflected: &ReflectedType) {
        if !reflected.is_builtin {
            self.push_unique(TypeName::new(&reflected.name));
        }
    }

    /// Members in closure order
    pub fn members(&self) -> &[TypeName] {
        &self.members
    }

    /// Iterate members in closure order
    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.members.iter()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the closure has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<TypeName> for HierarchyClosure {
    fn from_iter<I: IntoIterator<Item = TypeName>>(iter: I) -> Self {
        let mut closure = Self::empty();
        for name in iter {
            closure.push_unique(name);
        }
        closure
    }
}

/// Expands type names into hierarchy closures through a [`TypeOracle`].
///
/// Each closure is computed once per type name and kept for the lifetime of
/// the expander. Types do not change during an analysis run, so entries are
/// never invalidated.
pub struct TypeHierarchyExpander<O> {
    oracle: O,
    cache: DashMap<TypeName, Arc<HierarchyClosure>>,
    expansions: AtomicUsize,
}

impl<O: TypeOracle> TypeHierarchyExpander<O> {
    /// Create an expander over `oracle` with an empty cache
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            cache: DashMap::new(),
            expansions: AtomicUsize::new(0),
        }
    }

    /// The oracle this expander reflects through
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Hierarchy closure of `type_name`.
    ///
    /// Builtin types expand to an empty closure. Types the oracle does not
    /// know expand to themselves alone.
    pub fn expand(&self, type_name: &TypeName) -> Arc<HierarchyClosure> {
        if let Some(cached) = self.cache.get(type_name) {
            trace!("Hierarchy cache hit for {}", type_name);
            return Arc::clone(cached.value());
        }

        let closure = Arc::new(self.compute(type_name));
        self.expansions.fetch_add(1, Ordering::Relaxed);
        debug!("Expanded {} to {} hierarchy members", type_name, closure.len());

        Arc::clone(
            self.cache
                .entry(type_name.clone())
                .or_insert(closure)
                .value(),
        )
    }

    fn compute(&self, type_name: &TypeName) -> HierarchyClosure {
        let Some(reflection) = self.oracle.reflect(type_name.as_str()) else {
            debug!("No reflection for {}, using the name alone", type_name);
            return std::iter::once(type_name.clone()).collect();
        };

        if reflection.is_builtin {
            return HierarchyClosure::empty();
        }

        let mut closure = HierarchyClosure::empty();
        closure.push_unique(TypeName::new(&reflection.name));
        for parent in &reflection.parents {
            closure.push_reflected(parent);
        }
        for interface in &reflection.interfaces {
            closure.push_reflected(interface);
        }
        closure
    }

    /// Number of closures computed (cache misses) so far
    pub fn expansion_count(&self) -> usize {
        self.expansions.load(Ordering::Relaxed)
    }

    /// Number of cached closures
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
