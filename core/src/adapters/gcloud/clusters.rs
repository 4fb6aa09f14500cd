//! Cluster and namespace discovery for one GKE project.

use std::io::Write;

use crate::domain::{ClusterIdentity, ClusterNamespaces};
use crate::error::{Error, Result};
use crate::ports::ClusterLister;

use super::exec::Toolchain;
use super::models::{GkeCluster, Kubeconfig, NamespaceListResponse};

/// Lists clusters with gcloud and their namespaces with kubectl.
pub struct GcloudClusterLister {
    tools: Toolchain,
}

impl GcloudClusterLister {
    pub fn new(tools: Toolchain) -> Self {
        Self { tools }
    }

    async fn list_clusters(&self, project: &str) -> Result<Vec<GkeCluster>> {
        let output = self
            .tools
            .gcloud(&[
                "container",
                "clusters",
                "list",
                "--project",
                project,
                "--format",
                "json",
            ])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    async fn access_token(&self) -> Result<String> {
        let token = self.tools.gcloud(&["auth", "print-access-token"]).await?;
        Ok(token.trim().to_string())
    }

    async fn list_namespaces(
        &self,
        identity: &ClusterIdentity,
        cluster: &GkeCluster,
        token: &str,
    ) -> Result<Vec<String>> {
        let name = identity.to_string();
        let endpoint = cluster
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::Config("cluster has no endpoint".to_string()))?;
        let ca_data = cluster
            .ca_certificate()
            .ok_or_else(|| Error::Config("cluster has no CA certificate".to_string()))?;

        let kubeconfig =
            write_kubeconfig(Kubeconfig::single(&name, endpoint, ca_data, token)).await?;
        let kubeconfig_path = kubeconfig.path().to_string_lossy().into_owned();

        let output = self
            .tools
            .kubectl(&[
                "--kubeconfig",
                &kubeconfig_path,
                "get",
                "namespaces",
                "-o",
                "json",
                "--request-timeout=30s",
            ])
            .await?;

        let response: NamespaceListResponse = serde_json::from_str(&output)?;
        Ok(response.into_names())
    }
}

impl ClusterLister for GcloudClusterLister {
    async fn list_cluster_namespaces(&self, project: &str) -> Result<Vec<ClusterNamespaces>> {
        let clusters = self.list_clusters(project).await?;
        if clusters.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.access_token().await?;
        let mut result = Vec::with_capacity(clusters.len());

        for cluster in &clusters {
            // One bad cluster fails the whole project.
            let identity = cluster_identity(project, cluster)?;
            let namespaces = self
                .list_namespaces(&identity, cluster, &token)
                .await
                .map_err(|e| Error::ClusterScan {
                    cluster: identity.to_string(),
                    source: Box::new(e),
                })?;

            tracing::debug!(
                cluster = %identity,
                namespaces = namespaces.len(),
                "listed namespaces"
            );
            result.push(ClusterNamespaces::new(identity.to_string(), namespaces));
        }

        Ok(result)
    }
}

/// Identity of a listed cluster; a cluster without a location fails its project.
fn cluster_identity(project: &str, cluster: &GkeCluster) -> Result<ClusterIdentity> {
    match cluster.location().filter(|l| !l.is_empty()) {
        Some(location) => Ok(ClusterIdentity::gke(project, location, &cluster.name)),
        None => Err(Error::ClusterScan {
            cluster: format!("{}_{}_-_{}", ClusterIdentity::GKE_PREFIX, project, cluster.name),
            source: Box::new(Error::Config("cluster has no location".to_string())),
        }),
    }
}

/// Writes a kubeconfig to a private temp file that is removed on drop.
///
/// The file is written on the blocking pool.
async fn write_kubeconfig(config: Kubeconfig) -> Result<tempfile::NamedTempFile> {
    let content = serde_yaml::to_string(&config)?;
    tokio::task::spawn_blocking(move || -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("nscon-kubeconfig-")
            .suffix(".yaml")
            .tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(file)
    })
    .await
    .map_err(|e| Error::TaskFailed(format!("kubeconfig writer: {}", e)))?
}
