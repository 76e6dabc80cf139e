//! Name-to-definition lookup for every cluster the forms use.

use std::collections::BTreeMap;

use super::cluster::ClusterSpec;
use super::clusters::{address, date_of_birth, phone_number, third_party_contact};
use super::priority::verify_priority_table;
use crate::error::CoreError;

/// Immutable set of cluster definitions, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ClusterRegistry {
    clusters: BTreeMap<&'static str, ClusterSpec>,
}

impl ClusterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in cluster.
    ///
    /// Fails on any definition problem: an incomplete priority table, a rule
    /// naming an unknown field, or a rule whose scope disagrees with its kind.
    pub fn with_defaults() -> Result<Self, CoreError> {
        verify_priority_table()?;

        let mut registry = Self::new();
        registry.register(date_of_birth::definition()?)?;
        registry.register(phone_number::definition()?)?;
        registry.register(address::definition()?)?;
        registry.register(third_party_contact::definition()?)?;

        tracing::info!(
            clusters = registry.clusters.len(),
            "Cluster registry built"
        );
        Ok(registry)
    }

    pub fn register(&mut self, spec: ClusterSpec) -> Result<(), CoreError> {
        let name = spec.name();
        if self.clusters.contains_key(name) {
            return Err(CoreError::InvalidDefinition(format!(
                "Cluster '{name}' is registered twice"
            )));
        }
        self.clusters.insert(name, spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClusterSpec> {
        self.clusters.get(name)
    }

    /// Like [`get`](Self::get) but returns `CoreError::NotFound`.
    pub fn require(&self, name: &str) -> Result<&ClusterSpec, CoreError> {
        self.get(name).ok_or_else(|| CoreError::NotFound {
            entity: "Cluster",
            key: name.to_string(),
        })
    }

    /// Registered cluster names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.clusters.keys().copied()
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ClusterSpec> {
        self.clusters.values()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
