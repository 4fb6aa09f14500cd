//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod chooser;
mod connector;
mod lister;

pub use chooser::LocationChooser;
pub use connector::{ConnectReport, Connector, StepFailure};
pub use lister::{ClusterLister, ProjectLister};
