//! Namespace inventory: namespace name -> locations where it was last seen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{ClusterIdentity, LocationFilter, NamespaceLocation, ProjectNamespaces};

/// Point-in-time mapping from namespace name to every location it was observed in.
///
/// Rebuilt wholesale from each scan. Location order within a key follows scan
/// completion order and is not stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    namespaces: BTreeMap<String, Vec<NamespaceLocation>>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh inventory from scan results.
    pub fn from_scan(results: &[ProjectNamespaces]) -> Result<Self> {
        let mut inventory = Self::new();
        inventory.build(results)?;
        Ok(inventory)
    }

    /// Replace the contents with one location per (cluster, namespace) pair in `results`.
    ///
    /// On a malformed cluster identity the previous contents are left untouched.
    pub fn build(&mut self, results: &[ProjectNamespaces]) -> Result<()> {
        let mut namespaces: BTreeMap<String, Vec<NamespaceLocation>> = BTreeMap::new();

        for project in results {
            for cluster in &project.clusters {
                let identity = ClusterIdentity::parse(&cluster.identity)?;
                for namespace in &cluster.namespaces {
                    namespaces
                        .entry(namespace.clone())
                        .or_default()
                        .push(identity.to_location(&project.project_id));
                }
            }
        }

        self.namespaces = namespaces;
        Ok(())
    }

    /// All known locations for a namespace; empty if it is unknown.
    pub fn lookup(&self, name: &str) -> &[NamespaceLocation] {
        self.namespaces
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Locations of `name` whose cluster short name contains `cluster`.
    pub fn filter_by_cluster(&self, name: &str, cluster: &str) -> Vec<NamespaceLocation> {
        self.lookup(name)
            .iter()
            .filter(|l| l.cluster.contains(cluster))
            .cloned()
            .collect()
    }

    /// Locations of `name` whose project id contains `project`.
    pub fn filter_by_project(&self, name: &str, project: &str) -> Vec<NamespaceLocation> {
        self.lookup(name)
            .iter()
            .filter(|l| l.project_id.contains(project))
            .cloned()
            .collect()
    }

    /// Locations of `name` passing `filter`.
    pub fn filter(&self, name: &str, filter: &LocationFilter) -> Vec<NamespaceLocation> {
        if !filter.is_active() {
            return self.lookup(name).to_vec();
        }
        self.lookup(name)
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect()
    }

    /// Number of distinct namespace names.
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Number of locations across all namespaces.
    pub fn location_count(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterate over namespace names and their locations, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NamespaceLocation])> {
        self.namespaces
            .iter()
            .map(|(name, locations)| (name.as_str(), locations.as_slice()))
    }
}
