//! End-to-end flow with in-memory collaborators:
//! scan -> build -> save -> load -> locate.

use std::collections::HashMap;
use std::io::Cursor;

use nscon_core::ports::{ClusterLister, ConnectReport, Connector};
use nscon_core::{
    ClusterNamespaces, Disambiguator, Error, Inventory, InventoryStore, LocateOutcome,
    LocateService, LocationFilter, NamespaceLocation, Result, ScanCoordinator, ScanOptions,
};
use parking_lot::Mutex;

/// Cluster lister serving a fixed layout; projects missing from it fail.
struct FakeCloud {
    layout: HashMap<String, Vec<ClusterNamespaces>>,
}

impl FakeCloud {
    fn new() -> Self {
        let mut layout = HashMap::new();
        layout.insert(
            "proj1".to_string(),
            vec![
                ClusterNamespaces::new(
                    "gke_proj1_us-central1_webapp-1",
                    vec!["payments".into(), "default".into()],
                ),
                ClusterNamespaces::new(
                    "gke_proj1_us-central1-a_billing",
                    vec!["payments".into(), "invoices".into()],
                ),
            ],
        );
        layout.insert(
            "proj2".to_string(),
            vec![ClusterNamespaces::new(
                "gke_proj2_europe-west1_search",
                vec!["default".into(), "search".into()],
            )],
        );
        Self { layout }
    }
}

impl ClusterLister for FakeCloud {
    async fn list_cluster_namespaces(&self, project: &str) -> Result<Vec<ClusterNamespaces>> {
        self.layout.get(project).cloned().ok_or_else(|| Error::ClusterScan {
            cluster: format!("gke_{}_us-east1_broken", project),
            source: Box::new(Error::command_failed("kubectl", "Forbidden")),
        })
    }
}

#[derive(Default)]
struct RecordingConnector {
    connected: Mutex<Vec<NamespaceLocation>>,
}

impl Connector for RecordingConnector {
    async fn connect(&self, location: &NamespaceLocation) -> Result<ConnectReport> {
        self.connected.lock().push(location.clone());
        Ok(ConnectReport::new(location.project_id.clone()))
    }
}

fn chooser(input: &str) -> Disambiguator<Cursor<Vec<u8>>, Vec<u8>> {
    Disambiguator::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 3)
}

#[tokio::test]
async fn scan_save_load_and_locate() {
    let dir = tempfile::tempdir().unwrap();
    let store = InventoryStore::new(dir.path().join("namespaces.yaml"));

    let projects = vec![
        "proj1".to_string(),
        "proj2".to_string(),
        "proj3".to_string(),
    ];
    let coordinator = ScanCoordinator::new(
        FakeCloud::new(),
        ScanOptions {
            concurrency: 2,
            verbose: false,
        },
    );
    let report = coordinator.scan(&projects).await;

    assert_eq!(report.attempted(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failures[0].project_id, "proj3");
    assert_eq!(
        report.failures[0].error.failed_cluster(),
        Some("gke_proj3_us-east1_broken")
    );

    let inventory = Inventory::from_scan(&report.projects).unwrap();
    store.save(&inventory).await.unwrap();
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded.namespace_count(), inventory.namespace_count());
    assert_eq!(loaded.lookup("payments").len(), 2);
    assert_eq!(loaded.lookup("default").len(), 2);
    assert!(loaded.lookup("nonexistent-namespace").is_empty());

    let service = LocateService::new(RecordingConnector::default());

    // Unique namespace connects without prompting.
    let mut no_input = chooser("");
    let outcome = service
        .locate(&loaded, "search", &LocationFilter::new(), &mut no_input)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        LocateOutcome::Connected { ref location, .. } if location.cluster == "search"
    ));

    // Cluster filter narrows the ambiguous namespace.
    let filter = LocationFilter::new().with_cluster("web");
    let outcome = service
        .locate(&loaded, "payments", &filter, &mut no_input)
        .await
        .unwrap();
    let LocateOutcome::Connected { location, .. } = outcome else {
        panic!("expected a connection");
    };
    assert_eq!(location.cluster, "webapp-1");
    assert_eq!(location.location, "us-central1");

    // Ambiguous namespace goes through the prompt, bad answer first.
    let mut prompt = chooser("9\n1\n");
    let outcome = service
        .locate(&loaded, "default", &LocationFilter::new(), &mut prompt)
        .await
        .unwrap();
    let LocateOutcome::Connected { location, .. } = outcome else {
        panic!("expected a connection");
    };
    let candidates = loaded.lookup("default");
    assert_eq!(location, candidates[1]);

    // Unknown namespace never reaches the connector.
    let before = service.connector().connected.lock().len();
    let outcome = service
        .locate(&loaded, "missing", &LocationFilter::new(), &mut no_input)
        .await
        .unwrap();
    assert_eq!(outcome, LocateOutcome::NotFound);
    assert_eq!(service.connector().connected.lock().len(), before);
}
