//! Candidate base name resolution for type descriptors.
//!
//! Composes deny-listing, hierarchy expansion and name normalization:
//!
//! ```text
//! TypeDescriptor ──flatten──▶ named members ──deny──▶ expand ──deny──▶ normalize ──deny──▶ candidates
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::core::types::{short_name_of, NamedType, TypeDescriptor, TypeName};
use crate::naming::deny_list::DenyList;
use crate::naming::hierarchy::TypeHierarchyExpander;
use crate::naming::normalizer::NameNormalizer;
use crate::oracle::TypeOracle;

/// Candidate cache performance statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Lookups answered from the candidate cache
    pub hits: usize,
    /// Lookups that had to expand and normalize
    pub misses: usize,
}

impl CacheStatistics {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Resolves the acceptable base names for values of a given type.
///
/// Candidate lists are memoized per named type for the lifetime of the
/// resolver. Separate resolvers never share cache state.
pub struct TypeCandidateResolver<O> {
    normalizer: NameNormalizer,
    deny_list: DenyList,
    expander: TypeHierarchyExpander<O>,
    candidates_by_type: DashMap<TypeName, Arc<[String]>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<O: TypeOracle> TypeCandidateResolver<O> {
    /// Resolver over `oracle` with an empty deny list
    pub fn new(oracle: O) -> Self {
        Self::with_deny_list(oracle, DenyList::empty())
    }

    /// Resolver over `oracle` filtering through `deny_list`
    pub fn with_deny_list(oracle: O, deny_list: DenyList) -> Self {
        Self::from_parts(TypeHierarchyExpander::new(oracle), deny_list)
    }

    /// Resolver over an existing expander, sharing its hierarchy cache
    pub fn from_parts(expander: TypeHierarchyExpander<O>, deny_list: DenyList) -> Self {
        Self {
            normalizer: NameNormalizer::new(),
            deny_list,
            expander,
            candidates_by_type: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Candidate base names for every named member of `descriptor`.
    ///
    /// Order follows the members' first appearance and each member's
    /// hierarchy; duplicates are dropped. An empty result means no naming
    /// constraint applies.
    pub fn resolve_candidates(&self, descriptor: &TypeDescriptor) -> Vec<String> {
        let mut candidates: IndexSet<String> = IndexSet::new();

        for member in descriptor.named_members() {
            if self.is_member_excluded(member) {
                continue;
            }
            for candidate in self.candidates_for_type_name(&member.name).iter() {
                candidates.insert(candidate.clone());
            }
        }

        debug!("Resolved {} candidates for {}", candidates.len(), descriptor);
        candidates.into_iter().collect()
    }

    /// Memoized candidate list for a single type name.
    ///
    /// Deny-listing of `type_name` itself is the caller's concern; members of
    /// its hierarchy are filtered here.
    pub fn candidates_for_type_name(&self, type_name: &TypeName) -> Arc<[String]> {
        if let Some(cached) = self.candidates_by_type.get(type_name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("Candidate cache hit for {}", type_name);
            return Arc::clone(cached.value());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let closure = self.expander.expand(type_name);
        let mut candidates: IndexSet<String> = IndexSet::new();
        for hierarchy_member in closure.iter() {
            if self.deny_list.is_type_name_denied(hierarchy_member.as_str()) {
                continue;
            }
            for candidate in self.normalizer.normalize(hierarchy_member) {
                if !self.deny_list.is_candidate_name_denied(&candidate) {
                    candidates.insert(candidate);
                }
            }
        }

        let candidates: Arc<[String]> = candidates.into_iter().collect();
        Arc::clone(
            self.candidates_by_type
                .entry(type_name.clone())
                .or_insert(candidates)
                .value(),
        )
    }

    /// Base names of the interfaces named directly in `descriptor`, mapped to
    /// the interface's short name.
    ///
    /// Only members that are themselves interfaces count; a class implementing
    /// an interface does not inherit its bare-name restriction. On key
    /// collision the first interface wins.
    pub fn resolve_direct_interface_base_names(&self, descriptor: &TypeDescriptor) -> IndexMap<String, String> {
        let mut base_names: IndexMap<String, String> = IndexMap::new();

        for member in descriptor.named_members() {
            if self.is_member_excluded(member) {
                continue;
            }
            let Some(reflection) = self.expander.oracle().reflect(member.name.as_str()) else {
                continue;
            };
            if reflection.is_builtin || !reflection.is_interface() {
                continue;
            }

            let short_interface_name = short_name_of(&reflection.name).to_string();
            for base_name in self.normalizer.normalize_str(&reflection.name) {
                if self.deny_list.is_candidate_name_denied(&base_name) {
                    continue;
                }
                base_names
                    .entry(base_name)
                    .or_insert_with(|| short_interface_name.clone());
            }
        }

        base_names
    }

    fn is_member_excluded(&self, member: &NamedType) -> bool {
        member.builtin || self.deny_list.is_type_name_denied(member.name.as_str())
    }

    /// The deny list in use
    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }

    /// The hierarchy expander in use
    pub fn expander(&self) -> &TypeHierarchyExpander<O> {
        &self.expander
    }

    /// Snapshot of candidate cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{TypeDeclaration, TypeRegistry};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::with_php_builtins();
        registry
            .extend([
                TypeDeclaration::interface("Fixtures\\DomainRootInterface"),
                TypeDeclaration::interface("Fixtures\\DomainChildInterface")
                    .extending("Fixtures\\DomainRootInterface"),
                TypeDeclaration::class("Fixtures\\DomainBaseEntity")
                    .implementing("Fixtures\\DomainChildInterface"),
                TypeDeclaration::class("Fixtures\\CustomDomainDto").extending("Fixtures\\DomainBaseEntity"),
                TypeDeclaration::class("Fixtures\\UserlandDomainException").extending("DomainException"),
                TypeDeclaration::interface("Fixtures\\ChannelInterface"),
                TypeDeclaration::interface("Fixtures\\Channel"),
                TypeDeclaration::class("Fixtures\\FileChannel").implementing("Fixtures\\ChannelInterface"),
            ])
            .unwrap();
        registry
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_union_ignores_null_and_false_and_expands_hierarchy() {
        let resolver = TypeCandidateResolver::new(registry());
        let descriptor = TypeDescriptor::parse("Fixtures\\CustomDomainDto|null|false").unwrap();

        assert_eq!(
            sorted(resolver.resolve_candidates(&descriptor)),
            vec![
                "customDomain",
                "customDomainDto",
                "domainBase",
                "domainBaseEntity",
                "domainChild",
                "domainRoot",
            ]
        );
    }

    #[test]
    fn test_candidate_order_follows_hierarchy() {
        let resolver = TypeCandidateResolver::new(registry());
        let candidates = resolver.resolve_candidates(&TypeDescriptor::named("Fixtures\\CustomDomainDto"));
        assert_eq!(
            candidates,
            vec![
                "customDomainDto",
                "customDomain",
                "domainBaseEntity",
                "domainBase",
                "domainChild",
                "domainRoot",
            ]
        );
    }

    #[test]
    fn test_builtin_members_contribute_nothing() {
        let resolver = TypeCandidateResolver::new(registry());
        let descriptor = TypeDescriptor::parse("ArrayObject|Fixtures\\UserlandDomainException").unwrap();
        assert_eq!(resolver.resolve_candidates(&descriptor), vec!["userlandDomainException"]);

        let flagged = TypeDescriptor::builtin("Fixtures\\CustomDomainDto");
        assert!(resolver.resolve_candidates(&flagged).is_empty());
    }

    #[test]
    fn test_denied_root_type_removes_its_whole_chain() {
        let deny_list = DenyList::new(["Fixtures\\CustomDomainDto"], Vec::<String>::new());
        let resolver = TypeCandidateResolver::with_deny_list(registry(), deny_list);
        assert!(resolver
            .resolve_candidates(&TypeDescriptor::named("Fixtures\\CustomDomainDto"))
            .is_empty());
        assert_eq!(resolver.expander().expansion_count(), 0);
    }

    #[test]
    fn test_denied_ancestor_is_skipped() {
        let deny_list = DenyList::new(["fixtures\\domainbaseentity"], Vec::<String>::new());
        let resolver = TypeCandidateResolver::with_deny_list(registry(), deny_list);
        assert_eq!(
            sorted(resolver.resolve_candidates(&TypeDescriptor::named("Fixtures\\CustomDomainDto"))),
            vec!["customDomain", "customDomainDto", "domainChild", "domainRoot"]
        );
    }

    #[test]
    fn test_denied_candidate_names_are_skipped() {
        let deny_list = DenyList::new(Vec::<String>::new(), ["customDomainDto", "customDomain"]);
        let resolver = TypeCandidateResolver::with_deny_list(registry(), deny_list);
        assert_eq!(
            sorted(resolver.resolve_candidates(&TypeDescriptor::named("Fixtures\\CustomDomainDto"))),
            vec!["domainBase", "domainBaseEntity", "domainChild", "domainRoot"]
        );
    }

    #[test]
    fn test_direct_interface_type_expands_parent_interfaces() {
        let resolver = TypeCandidateResolver::new(registry());
        assert_eq!(
            sorted(resolver.resolve_candidates(&TypeDescriptor::named("Fixtures\\DomainChildInterface"))),
            vec!["domainChild", "domainRoot"]
        );
    }

    #[test]
    fn test_repeated_resolution_is_memoized() {
        let resolver = TypeCandidateResolver::new(registry());
        let descriptor = TypeDescriptor::named("Fixtures\\CustomDomainDto");
        let first = resolver.resolve_candidates(&descriptor);
        let second = resolver.resolve_candidates(&descriptor);
        assert_eq!(first, second);
        assert_eq!(resolver.expander().expansion_count(), 1);
        assert_eq!(resolver.statistics(), CacheStatistics { hits: 1, misses: 1 });
        assert!((resolver.statistics().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interface_base_names_only_for_direct_interfaces() {
        let resolver = TypeCandidateResolver::new(registry());

        let direct = resolver.resolve_direct_interface_base_names(&TypeDescriptor::named("Fixtures\\ChannelInterface"));
        assert_eq!(direct.get("channel").map(String::as_str), Some("ChannelInterface"));

        let concrete = resolver.resolve_direct_interface_base_names(&TypeDescriptor::named("Fixtures\\FileChannel"));
        assert!(concrete.is_empty());
    }

    #[test]
    fn test_interface_base_names_first_writer_wins() {
        let resolver = TypeCandidateResolver::new(registry());
        let descriptor = TypeDescriptor::parse("Fixtures\\ChannelInterface|Fixtures\\Channel").unwrap();
        let base_names = resolver.resolve_direct_interface_base_names(&descriptor);
        assert_eq!(base_names.len(), 1);
        assert_eq!(base_names["channel"], "ChannelInterface");
    }

    #[test]
    fn test_interface_base_names_skip_denied_interfaces() {
        let deny_list = DenyList::new(["Fixtures\\DomainChildInterface"], Vec::<String>::new());
        let resolver = TypeCandidateResolver::with_deny_list(registry(), deny_list);
        let descriptor =
            TypeDescriptor::parse("Fixtures\\DomainChildInterface|Fixtures\\DomainRootInterface").unwrap();
        let base_names = resolver.resolve_direct_interface_base_names(&descriptor);
        assert_eq!(base_names.keys().collect::<Vec<_>>(), vec!["domainRoot"]);
    }

    #[test]
    fn test_unknown_types_still_produce_candidates() {
        let resolver = TypeCandidateResolver::new(TypeRegistry::new());
        assert_eq!(
            resolver.resolve_candidates(&TypeDescriptor::named("OrderEntity")),
            vec!["orderEntity", "order"]
        );
        assert!(resolver
            .resolve_direct_interface_base_names(&TypeDescriptor::named("OrderEntity"))
            .is_empty());
    }

    #[test]
    fn test_no_named_member_means_no_constraint() {
        let resolver = TypeCandidateResolver::new(registry());
        assert!(resolver.resolve_candidates(&TypeDescriptor::parse("int|null").unwrap()).is_empty());
    }
}
