//! Domain layer - Pure data models for namespace discovery.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod inventory;
mod location;
mod scan;

// Re-export all domain types
pub use inventory::Inventory;
pub use location::{ClusterIdentity, LocationFilter, NamespaceLocation, ProjectId};
pub use scan::{ClusterNamespaces, ProjectNamespaces, ProjectScanFailure, ScanReport};
