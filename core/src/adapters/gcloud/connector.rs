//! Switches gcloud and kubectl to a namespace location.

use crate::domain::NamespaceLocation;
use crate::error::{Error, Result};
use crate::ports::{ConnectReport, Connector};

use super::exec::Toolchain;
use super::projects::{find_profile, list_configurations};

/// Connects by activating the project's gcloud configuration and fetching
/// cluster credentials, which also switches the current kubectl context.
pub struct GcloudConnector {
    tools: Toolchain,
}

impl GcloudConnector {
    pub fn new(tools: Toolchain) -> Self {
        Self { tools }
    }
}

impl Connector for GcloudConnector {
    async fn connect(&self, location: &NamespaceLocation) -> Result<ConnectReport> {
        if cfg!(windows) {
            return Err(Error::UnsupportedPlatform(
                "switching cluster context is not supported on Windows".to_string(),
            ));
        }

        let configurations = list_configurations(&self.tools).await?;
        let profile = find_profile(&configurations, &location.project_id)
            .ok_or_else(|| Error::ProfileNotFound(location.project_id.clone()))?;

        let mut report = ConnectReport::new(profile);

        tracing::info!(project = %location.project_id, profile, "activating gcloud configuration");
        if let Err(e) = self
            .tools
            .gcloud_status(&["config", "configurations", "activate", profile])
            .await?
        {
            tracing::warn!(error = %e, "failed to activate configuration");
            report.record_failure("activate configuration", e.to_string());
        }

        tracing::info!(
            cluster = %location.cluster,
            location = %location.location,
            "fetching cluster credentials"
        );
        let owned_args = credentials_args(location);
        let args: Vec<&str> = owned_args.iter().map(String::as_str).collect();
        if let Err(e) = self.tools.gcloud_status(&args).await? {
            tracing::warn!(error = %e, "failed to get cluster credentials");
            report.record_failure("get credentials", e.to_string());
        }

        Ok(report)
    }
}

/// Arguments for `gcloud container clusters get-credentials`.
fn credentials_args(location: &NamespaceLocation) -> Vec<String> {
    let location_flag = if location.is_zonal() {
        "--zone"
    } else {
        "--region"
    };
    vec![
        "container".to_string(),
        "clusters".to_string(),
        "get-credentials".to_string(),
        location.cluster.clone(),
        location_flag.to_string(),
        location.location.clone(),
        "--project".to_string(),
        location.project_id.clone(),
    ]
}
