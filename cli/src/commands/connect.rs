//! Connect command - switch kubectl to the cluster hosting a namespace.

use anyhow::Result;
use nscon_core::{
    Disambiguator, ErrorKind, GcloudConnector, InventoryStore, LocateOutcome, LocateService,
    LocationFilter, Settings, Toolchain,
};

use super::{failure, hint, success, warning};

pub async fn run(
    settings: &Settings,
    namespace: &str,
    filter: &LocationFilter,
    color: bool,
) -> Result<()> {
    let store = InventoryStore::new(settings.inventory_location.clone());
    let inventory = match store.load().await {
        Ok(inventory) => inventory,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            failure(color, &e.to_string());
            hint();
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let service = LocateService::new(GcloudConnector::new(Toolchain::from_settings(settings)));
    let mut chooser = Disambiguator::stdio(settings.prompt_attempts, color);

    match service.locate(&inventory, namespace, filter, &mut chooser).await {
        Ok(LocateOutcome::NotFound) => {
            failure(color, &not_found_message(namespace, filter));
            hint();
            std::process::exit(1);
        }
        Ok(LocateOutcome::Connected { location, report }) => {
            for step in &report.failed_steps {
                warning(color, &format!("{} failed: {}", step.step, step.message));
            }
            if report.is_clean() {
                success(
                    color,
                    &format!(
                        "Switched to cluster {} in project {} ({}) using configuration {}",
                        location.cluster, location.project_id, location.location, report.profile
                    ),
                );
            }
            Ok(())
        }
        Err(e) if e.hint().is_some() => {
            failure(color, &e.to_string());
            hint();
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn not_found_message(namespace: &str, filter: &LocationFilter) -> String {
    match (&filter.cluster, &filter.project) {
        (Some(cluster), _) => format!("Can't find namespace {} in cluster {}", namespace, cluster),
        (None, Some(project)) => format!("Can't find namespace {} in project {}", namespace, project),
        (None, None) => format!("Namespace {} not found", namespace),
    }
}
