//! LRU-cached lookups against a [`SchemaRegistry`](crate::registry::SchemaRegistry).
//!
//! The registry itself is a flat `HashMap` and already cheap to query, but
//! the type expander re-resolves the same handful of hot qualified names
//! (a shared `AddressType`, a common fault wrapper) over and over while
//! walking a large schema graph; wrapping lookups in an `lru::LruCache`
//! keeps those resolutions off the hot path and gives the run's
//! processing metadata a hit/miss ratio worth reporting.

use crate::qname::QualifiedName;
use crate::registry::{SchemaRegistry, SchemaRegistryEntry};
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;

const DEFAULT_CAPACITY: usize = 1000;

pub struct ResolutionCache {
    cache: LruCache<QualifiedName, Arc<SchemaRegistryEntry>>,
    hits: usize,
    misses: usize,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Resolve `qname` against `registry`, consulting the cache first.
    pub fn resolve(
        &mut self,
        qname: &QualifiedName,
        registry: &SchemaRegistry,
    ) -> Option<Arc<SchemaRegistryEntry>> {
        if let Some(entry) = self.cache.get(qname) {
            self.hits += 1;
            return Some(Arc::clone(entry));
        }
        self.misses += 1;
        let entry = registry.get(qname)?;
        self.cache.put(qname.clone(), Arc::clone(&entry));
        Some(entry)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryKind;

    fn registry_with_one_entry(qname: QualifiedName) -> SchemaRegistry {
        let mut diagnostics = Vec::new();
        let mut schema = crate::parser::xsd::XmlSchema {
            target_namespace: Some(qname.namespace_uri.clone()),
            ..Default::default()
        };
        schema.complex_types.insert(
            qname.local_name.clone(),
            crate::parser::xsd::ComplexType {
                name: qname.local_name.clone(),
                sequence: None,
                extension_base: None,
            },
        );
        SchemaRegistry::build(
            Some((std::path::Path::new("main.wsdl"), &schema)),
            &[],
            &mut diagnostics,
        )
    }

    #[test]
    fn first_lookup_is_a_miss_second_is_a_hit() {
        let qname = QualifiedName::new("urn:orders", "Order");
        let registry = registry_with_one_entry(qname.clone());
        let mut cache = ResolutionCache::new(10);

        assert!(cache.resolve(&qname, &registry).is_some());
        assert!(cache.resolve(&qname, &registry).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn missing_qname_resolves_to_none_and_counts_as_a_miss() {
        let registry = registry_with_one_entry(QualifiedName::new("urn:orders", "Order"));
        let mut cache = ResolutionCache::new(10);
        let unknown = QualifiedName::new("urn:orders", "Invoice");

        assert!(cache.resolve(&unknown, &registry).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn entry_kind_is_preserved_through_cache() {
        let qname = QualifiedName::new("urn:orders", "Order");
        let registry = registry_with_one_entry(qname.clone());
        let mut cache = ResolutionCache::new(10);
        let entry = cache.resolve(&qname, &registry).unwrap();
        assert_eq!(entry.kind, RegistryKind::ComplexType);
    }
}
