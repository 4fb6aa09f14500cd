//! gcloud/kubectl adapters.
//!
//! Implements the lister and connector ports by shelling out to the Google
//! Cloud SDK and kubectl, which own all credentials.

mod clusters;
mod connector;
mod exec;
mod models;
mod projects;

pub use clusters::GcloudClusterLister;
pub use connector::GcloudConnector;
pub use exec::Toolchain;
pub use projects::GcloudProjectLister;
