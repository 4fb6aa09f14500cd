//! Scan result models produced by the scan coordinator.
//!
//! These are ephemeral: built by a scan, consumed to build the inventory,
//! then dropped.

use crate::error::Error;

use super::ProjectId;

/// One cluster's encoded identity plus the namespaces observed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNamespaces {
    pub identity: String,
    pub namespaces: Vec<String>,
}

impl ClusterNamespaces {
    pub fn new(identity: impl Into<String>, namespaces: Vec<String>) -> Self {
        Self {
            identity: identity.into(),
            namespaces,
        }
    }
}

/// One project's identifier plus the clusters found by scanning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNamespaces {
    pub project_id: ProjectId,
    pub clusters: Vec<ClusterNamespaces>,
}

impl ProjectNamespaces {
    pub fn new(project_id: impl Into<String>, clusters: Vec<ClusterNamespaces>) -> Self {
        Self {
            project_id: project_id.into(),
            clusters,
        }
    }

    /// Total number of (cluster, namespace) observations.
    pub fn namespace_count(&self) -> usize {
        self.clusters.iter().map(|c| c.namespaces.len()).sum()
    }
}

/// A project whose scan failed.
#[derive(Debug)]
pub struct ProjectScanFailure {
    pub project_id: ProjectId,
    pub error: Error,
}

/// Aggregated outcome of scanning a set of projects.
///
/// Failed projects are kept out of `projects`; `attempted()` and
/// `succeeded()` expose both counts.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub projects: Vec<ProjectNamespaces>,
    pub failures: Vec<ProjectScanFailure>,
}

impl ScanReport {
    /// Number of projects the scan was asked to cover.
    pub fn attempted(&self) -> usize {
        self.projects.len() + self.failures.len()
    }

    /// Number of projects scanned successfully.
    pub fn succeeded(&self) -> usize {
        self.projects.len()
    }

    /// True when at least one project failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True when projects were attempted and none succeeded.
    pub fn is_total_failure(&self) -> bool {
        self.projects.is_empty() && !self.failures.is_empty()
    }

    /// Total number of clusters across successful projects.
    pub fn cluster_count(&self) -> usize {
        self.projects.iter().map(|p| p.clusters.len()).sum()
    }
}
