//! Concurrent project scanning.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use crate::config::Settings;
use crate::domain::{
    ClusterNamespaces, ProjectId, ProjectNamespaces, ProjectScanFailure, ScanReport,
};
use crate::error::{Error, Result};
use crate::ports::ClusterLister;

/// Scan coordinator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of projects scanned at once.
    pub concurrency: usize,
    /// Log per-project progress at info level instead of debug.
    pub verbose: bool,
}

impl ScanOptions {
    pub fn from_settings(settings: &Settings, verbose: bool) -> Self {
        Self {
            concurrency: settings.scan_concurrency,
            verbose,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            verbose: false,
        }
    }
}

/// Fans out one scan task per project and collects every result.
///
/// At most `concurrency` lister calls run at the same time. Results arrive on
/// a channel whose only consumer is [`ScanCoordinator::scan`], which returns
/// once every project has reported. There is no overall timeout: a stalled
/// lister call stalls the scan.
pub struct ScanCoordinator<L: ClusterLister> {
    lister: Arc<L>,
    options: ScanOptions,
}

impl<L: ClusterLister + 'static> ScanCoordinator<L> {
    pub fn new(lister: L, options: ScanOptions) -> Self {
        Self {
            lister: Arc::new(lister),
            options,
        }
    }

    /// Scan every project and aggregate the outcome.
    ///
    /// Failed projects are logged and reported in `ScanReport::failures`; they
    /// never stop the remaining scans.
    pub async fn scan(&self, projects: &[ProjectId]) -> ScanReport {
        let mut report = ScanReport::default();
        let total = projects.len();
        if total == 0 {
            return report;
        }

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let (tx, mut rx) = mpsc::channel::<(ProjectId, Result<Vec<ClusterNamespaces>>)>(total);

        for project in projects {
            let lister = Arc::clone(&self.lister);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let project = project.clone();
            let verbose = self.options.verbose;

            tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        if verbose {
                            tracing::info!(project = %project, "scanning project");
                        } else {
                            tracing::debug!(project = %project, "scanning project");
                        }
                        lister.list_cluster_namespaces(&project).await
                    }
                    Err(_) => Err(Error::TaskFailed(project.clone())),
                };
                let _ = tx.send((project, result)).await;
            });
        }
        drop(tx);

        // Projects that have not reported yet.
        let mut pending: Vec<ProjectId> = projects.to_vec();

        while report.attempted() < total {
            let Some((project, result)) = rx.recv().await else {
                break;
            };
            if let Some(pos) = pending.iter().position(|p| *p == project) {
                pending.swap_remove(pos);
            }
            self.record(&mut report, project, result);
        }

        // A task that panicked dropped its sender without reporting.
        for project in pending {
            tracing::warn!(project = %project, "scan task ended without a result");
            report.failures.push(ProjectScanFailure {
                error: Error::TaskFailed(project.clone()),
                project_id: project,
            });
        }

        tracing::debug!(
            attempted = report.attempted(),
            succeeded = report.succeeded(),
            "scan finished"
        );
        report
    }

    fn record(
        &self,
        report: &mut ScanReport,
        project: ProjectId,
        result: Result<Vec<ClusterNamespaces>>,
    ) {
        match result {
            Ok(clusters) => {
                if self.options.verbose {
                    tracing::info!(project = %project, clusters = clusters.len(), "indexing clusters");
                } else {
                    tracing::debug!(project = %project, clusters = clusters.len(), "indexing clusters");
                }
                report
                    .projects
                    .push(ProjectNamespaces::new(project, clusters));
            }
            Err(error) => {
                tracing::warn!(
                    project = %project,
                    cluster = error.failed_cluster().unwrap_or("-"),
                    error = %error,
                    "problem scanning namespaces in project"
                );
                report.failures.push(ProjectScanFailure {
                    project_id: project,
                    error,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock lister for testing.
    #[derive(Default)]
    struct MockLister {
        failing: HashSet<String>,
        panicking: HashSet<String>,
        delay: Duration,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    impl MockLister {
        fn failing(projects: &[&str]) -> Self {
            Self {
                failing: projects.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl ClusterLister for MockLister {
        async fn list_cluster_namespaces(&self, project: &str) -> Result<Vec<ClusterNamespaces>> {
            self.calls.lock().push(project.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panicking.contains(project) {
                panic!("lister blew up");
            }
            if self.failing.contains(project) {
                return Err(Error::ClusterScan {
                    cluster: format!("gke_{}_us-east1_bad", project),
                    source: Box::new(Error::command_failed("kubectl", "Unauthorized")),
                });
            }
            Ok(vec![ClusterNamespaces::new(
                format!("gke_{}_us-east1_main", project),
                vec!["default".to_string()],
            )])
        }
    }

    fn projects(n: usize) -> Vec<ProjectId> {
        (0..n).map(|i| format!("proj-{}", i)).collect()
    }

    #[tokio::test]
    async fn test_scan_returns_one_result_per_project() {
        for n in [0, 1, 5, 20] {
            let coordinator = ScanCoordinator::new(MockLister::default(), ScanOptions::default());
            let input = projects(n);
            let report = coordinator.scan(&input).await;

            assert_eq!(report.succeeded(), n);
            assert_eq!(report.attempted(), n);
            let ids: HashSet<&str> = report.projects.iter().map(|p| p.project_id.as_str()).collect();
            let expected: HashSet<&str> = input.iter().map(String::as_str).collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn test_scan_respects_concurrency_bound() {
        let lister = MockLister {
            delay: Duration::from_millis(20),
            ..Default::default()
        };
        let coordinator = ScanCoordinator::new(
            lister,
            ScanOptions {
                concurrency: 3,
                verbose: true,
            },
        );

        let report = coordinator.scan(&projects(10)).await;

        assert_eq!(report.succeeded(), 10);
        let max = coordinator.lister.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3, "max in flight was {}", max);
        assert!(max >= 1);
        assert_eq!(coordinator.lister.calls.lock().len(), 10);
    }

    #[tokio::test]
    async fn test_failed_projects_are_counted_not_aggregated() {
        let coordinator = ScanCoordinator::new(
            MockLister::failing(&["proj-1", "proj-3"]),
            ScanOptions::default(),
        );

        let report = coordinator.scan(&projects(5)).await;

        assert_eq!(report.attempted(), 5);
        assert_eq!(report.succeeded(), 3);
        assert!(report.projects.iter().all(|p| p.project_id != "proj-1"));

        let mut failed: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.project_id.as_str())
            .collect();
        failed.sort();
        assert_eq!(failed, vec!["proj-1", "proj-3"]);
        assert_eq!(
            report.failures[0].error.failed_cluster().map(|c| c.ends_with("_bad")),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_all_projects_failing() {
        let coordinator =
            ScanCoordinator::new(MockLister::failing(&["only"]), ScanOptions::default());
        let report = coordinator.scan(&["only".to_string()]).await;
        assert!(report.is_total_failure());
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported_as_failure() {
        let lister = MockLister {
            panicking: ["proj-2".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let coordinator = ScanCoordinator::new(lister, ScanOptions::default());

        let report = coordinator.scan(&projects(4)).await;

        assert_eq!(report.attempted(), 4);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].project_id, "proj-2");
        assert!(matches!(report.failures[0].error, Error::TaskFailed(_)));
    }

    #[test]
    fn test_options_from_settings() {
        let mut settings = Settings::with_base_dir(std::path::Path::new("/tmp"));
        settings.scan_concurrency = 4;
        let options = ScanOptions::from_settings(&settings, true);
        assert_eq!(options.concurrency, 4);
        assert!(options.verbose);
    }
}
