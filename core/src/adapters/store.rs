//! Inventory persistence.
//!
//! Stores the namespace inventory as YAML, by default in `~/.nscon/namespaces.yaml`.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::Inventory;
use crate::error::{Error, Result};
use crate::util::{persistence, write_atomic};

/// File-backed store for the namespace inventory.
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the inventory from disk.
    ///
    /// A missing file is `InventoryNotFound`; an empty file is an empty inventory.
    pub async fn load(&self) -> Result<Inventory> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::InventoryNotFound(self.path.clone()));
            }
            Err(e) => return Err(persistence(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Inventory::new());
        }

        serde_yaml::from_str(&content).map_err(|e| Error::InventoryParse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Replaces the file with `inventory`.
    pub async fn save(&self, inventory: &Inventory) -> Result<()> {
        let content = serde_yaml::to_string(inventory)?;
        write_atomic(&self.path, &content).await?;

        tracing::debug!(
            path = %self.path.display(),
            namespaces = inventory.namespace_count(),
            "saved inventory"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClusterNamespaces, NamespaceLocation, ProjectNamespaces};
    use tempfile::tempdir;

    fn sorted(locations: &[NamespaceLocation]) -> Vec<NamespaceLocation> {
        let mut v = locations.to_vec();
        v.sort();
        v
    }

    fn sample() -> Inventory {
        Inventory::from_scan(&[
            ProjectNamespaces::new(
                "proj1",
                vec![
                    ClusterNamespaces::new(
                        "gke_proj1_us-central1_webapp-1",
                        vec!["payments".into(), "default".into()],
                    ),
                    ClusterNamespaces::new(
                        "gke_proj1_us-central1_billing",
                        vec!["payments".into()],
                    ),
                ],
            ),
            ProjectNamespaces::new(
                "proj2",
                vec![ClusterNamespaces::new(
                    "gke_proj2_europe-west1_edge",
                    vec!["default".into()],
                )],
            ),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("namespaces.yaml"));
        let inventory = sample();

        store.save(&inventory).await.unwrap();
        let loaded = store.load().await.unwrap();

        let keys: Vec<&str> = loaded.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["default", "payments"]);
        for (name, locations) in inventory.iter() {
            assert_eq!(sorted(loaded.lookup(name)), sorted(locations));
        }
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("namespaces.yaml"));

        store.save(&sample()).await.unwrap();
        store.save(&Inventory::new()).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_format() {
        let dir = tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("namespaces.yaml"));
        store.save(&sample()).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("default:\n"));
        assert!(content.contains("- clusterName: webapp-1\n  projectId: proj1\n  clusterLocation: us-central1\n"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("absent.yaml"));
        assert!(matches!(
            store.load().await,
            Err(Error::InventoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_load_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("namespaces.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert!(InventoryStore::new(path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("namespaces.yaml");
        std::fs::write(&path, "payments:\n  - clusterName: [1, 2]\n").unwrap();
        assert!(matches!(
            InventoryStore::new(path).load().await,
            Err(Error::InventoryParse { .. })
        ));
    }
}
