//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`
//! and the file-backed inventory store.

pub mod gcloud;
pub mod store;

// Re-export main types for convenience
pub use gcloud::{GcloudClusterLister, GcloudConnector, GcloudProjectLister, Toolchain};
pub use store::InventoryStore;
