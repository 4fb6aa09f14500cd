//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod locate_service;
mod resolver;
mod scan_service;

pub use locate_service::{LocateOutcome, LocateService};
pub use resolver::{parse_choice, resolve, Disambiguator, Resolution};
pub use scan_service::{ScanCoordinator, ScanOptions};
