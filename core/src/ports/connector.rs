//! Connector port (interface).

use crate::domain::NamespaceLocation;
use crate::error::Result;

/// A connection step that completed unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: &'static str,
    pub message: String,
}

/// What happened while switching to a location.
///
/// Step failures are best-effort: they are reported, not raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectReport {
    /// Name of the authentication profile that was activated.
    pub profile: String,
    pub failed_steps: Vec<StepFailure>,
}

impl ConnectReport {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            failed_steps: Vec::new(),
        }
    }

    /// Record a failed step.
    pub fn record_failure(&mut self, step: &'static str, message: impl Into<String>) {
        self.failed_steps.push(StepFailure {
            step,
            message: message.into(),
        });
    }

    /// True when every step completed successfully.
    pub fn is_clean(&self) -> bool {
        self.failed_steps.is_empty()
    }
}

/// Port for switching the active cluster context.
pub trait Connector: Send + Sync {
    /// Select the auth profile for the location's project and switch to its cluster.
    ///
    /// Fails only when no profile matches the project (or the platform is
    /// unsupported); command failures end up in the report.
    fn connect(
        &self,
        location: &NamespaceLocation,
    ) -> impl std::future::Future<Output = Result<ConnectReport>> + Send;
}
