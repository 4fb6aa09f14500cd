//! Scan command - rebuild the namespace inventory.

use anyhow::{bail, Result};
use nscon_core::ports::ProjectLister;
use nscon_core::{
    GcloudClusterLister, GcloudProjectLister, Inventory, InventoryStore, ScanCoordinator,
    ScanOptions, Settings, Toolchain,
};

use super::{success, warning};

pub async fn run(settings: &Settings, verbose: bool, color: bool) -> Result<()> {
    success(color, "Scanning...");

    let tools = Toolchain::from_settings(settings);
    let projects = GcloudProjectLister::new(tools.clone(), settings.account_filter.clone())
        .list_projects()
        .await?;
    tracing::debug!(count = projects.len(), "discovered projects");

    let coordinator = ScanCoordinator::new(
        GcloudClusterLister::new(tools),
        ScanOptions::from_settings(settings, verbose),
    );
    let report = coordinator.scan(&projects).await;

    for failure in &report.failures {
        let message = match failure.error.failed_cluster() {
            Some(cluster) => format!(
                "Problem scanning namespaces in project {} (cluster {}): {}",
                failure.project_id, cluster, failure.error
            ),
            None => format!(
                "Problem scanning namespaces in project {}: {}",
                failure.project_id, failure.error
            ),
        };
        warning(color, &message);
    }

    if report.is_total_failure() {
        bail!(
            "none of the {} projects could be scanned, keeping the existing inventory at {}",
            report.attempted(),
            settings.inventory_location.display()
        );
    }

    let inventory = Inventory::from_scan(&report.projects)?;
    InventoryStore::new(settings.inventory_location.clone())
        .save(&inventory)
        .await?;

    if verbose || report.has_failures() {
        println!(
            "Indexed {} namespaces in {} clusters ({} of {} projects scanned)",
            inventory.namespace_count(),
            report.cluster_count(),
            report.succeeded(),
            report.attempted()
        );
    }
    success(
        color,
        &format!(
            "Inventory saved to file {}",
            settings.inventory_location.display()
        ),
    );
    Ok(())
}
