//! Cluster identity and namespace location domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque identifier of a cloud project.
pub type ProjectId = String;

// ============================================================================
// ClusterIdentity
// ============================================================================

/// A cluster's encoded name: `prefix_projectId_location_clusterShortName`.
///
/// GKE names kubeconfig contexts this way (e.g. `gke_proj1_us-central1_mycluster`).
/// Project ids, locations and cluster names never contain `_`, so the encoding
/// splits cleanly into four parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterIdentity {
    pub prefix: String,
    pub project_id: ProjectId,
    pub location: String,
    pub cluster: String,
}

impl ClusterIdentity {
    /// Prefix used for GKE cluster identities.
    pub const GKE_PREFIX: &'static str = "gke";

    /// Creates a GKE cluster identity.
    pub fn gke(
        project_id: impl Into<String>,
        location: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            prefix: Self::GKE_PREFIX.to_string(),
            project_id: project_id.into(),
            location: location.into(),
            cluster: cluster.into(),
        }
    }

    /// Parses an encoded identity, failing unless it has exactly four non-empty parts.
    pub fn parse(encoded: &str) -> Result<Self> {
        let parts: Vec<&str> = encoded.split('_').collect();
        match parts.as_slice() {
            [prefix, project, location, cluster]
                if [prefix, project, location, cluster]
                    .iter()
                    .all(|p| !p.is_empty()) =>
            {
                Ok(Self {
                    prefix: prefix.to_string(),
                    project_id: project.to_string(),
                    location: location.to_string(),
                    cluster: cluster.to_string(),
                })
            }
            _ => Err(Error::InvalidClusterIdentity(encoded.to_string())),
        }
    }

    /// Returns the location for the given project under this identity.
    pub fn to_location(&self, project_id: &str) -> NamespaceLocation {
        NamespaceLocation::new(&self.cluster, project_id, &self.location)
    }
}

impl FromStr for ClusterIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClusterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.prefix, self.project_id, self.location, self.cluster
        )
    }
}

// ============================================================================
// NamespaceLocation
// ============================================================================

/// One place a namespace name was observed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceLocation {
    /// Cluster short name.
    #[serde(rename = "clusterName")]
    pub cluster: String,
    /// Project the cluster lives in.
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    /// Region or zone of the cluster.
    #[serde(rename = "clusterLocation")]
    pub location: String,
}

impl NamespaceLocation {
    pub fn new(
        cluster: impl Into<String>,
        project_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            project_id: project_id.into(),
            location: location.into(),
        }
    }

    /// Whether the location is a zone (`us-central1-b`) rather than a region.
    pub fn is_zonal(&self) -> bool {
        zone_pattern().is_match(&self.location)
    }
}

impl fmt::Display for NamespaceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cluster {} in project {} ({})",
            self.cluster, self.project_id, self.location
        )
    }
}

fn zone_pattern() -> &'static regex::Regex {
    static ZONE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    ZONE.get_or_init(|| {
        regex::Regex::new(r"^[a-z]+-[a-z]+[0-9]+-[a-z]$").expect("zone pattern is valid")
    })
}

// ============================================================================
// LocationFilter
// ============================================================================

/// Optional cluster/project constraint applied on lookup.
///
/// Both constraints use case-sensitive substring containment. When both are
/// set the cluster constraint wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub cluster: Option<String>,
    pub project: Option<String>,
}

impl LocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Builds a filter from optional CLI values, ignoring empty strings.
    pub fn from_options(cluster: Option<String>, project: Option<String>) -> Self {
        Self {
            cluster: cluster.filter(|c| !c.is_empty()),
            project: project.filter(|p| !p.is_empty()),
        }
    }

    /// Check if the filter constrains anything.
    pub fn is_active(&self) -> bool {
        self.cluster.is_some() || self.project.is_some()
    }

    /// Check if a location passes the filter.
    pub fn matches(&self, location: &NamespaceLocation) -> bool {
        match (&self.cluster, &self.project) {
            (Some(cluster), _) => location.cluster.contains(cluster.as_str()),
            (None, Some(project)) => location.project_id.contains(project.as_str()),
            (None, None) => true,
        }
    }
}
