//! Project and cluster lister ports (interfaces).

use crate::domain::{ClusterNamespaces, ProjectId};
use crate::error::Result;

/// Port for enumerating the projects to scan.
pub trait ProjectLister: Send + Sync {
    /// List known project identifiers, without duplicates.
    fn list_projects(&self) -> impl std::future::Future<Output = Result<Vec<ProjectId>>> + Send;
}

/// Port for enumerating the clusters of one project and their namespaces.
///
/// A failure on any single cluster fails the whole project.
pub trait ClusterLister: Send + Sync {
    /// List every cluster in `project` with the namespace names present in it.
    fn list_cluster_namespaces(
        &self,
        project: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ClusterNamespaces>>> + Send;
}
