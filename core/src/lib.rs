//! nscon Core Library
//!
//! Finds which GKE cluster hosts a Kubernetes namespace and switches the local
//! kubectl context to it. Provides functionality to:
//! - Scan every gcloud project for clusters and their namespaces
//! - Persist the namespace inventory as YAML
//! - Resolve a namespace to one location, asking the operator when ambiguous
//! - Activate the matching gcloud configuration and fetch cluster credentials
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS and Linux: Uses the `gcloud` and `kubectl` commands
//! - Windows: scanning works, connecting is not supported

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;
mod util;

// Re-export domain types (primary API)
pub use domain::{
    ClusterIdentity, ClusterNamespaces, Inventory, LocationFilter, NamespaceLocation, ProjectId,
    ProjectNamespaces, ProjectScanFailure, ScanReport,
};

// Re-export other commonly used types
pub use adapters::{
    GcloudClusterLister, GcloudConnector, GcloudProjectLister, InventoryStore, Toolchain,
};
pub use application::{Disambiguator, LocateOutcome, LocateService, ScanCoordinator, ScanOptions};
pub use config::{ConfigStore, Settings};
pub use error::{Error, ErrorKind, Result, RESCAN_HINT};
