//! Error types for the nscon-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for nscon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hint shown next to errors that a fresh scan would fix.
pub const RESCAN_HINT: &str = "Check if data you provided is correct. \
If you are sure namespace exists use --scan flag to update namespace inventory";

/// Errors that can occur while scanning, persisting and resolving namespaces.
#[derive(Error, Debug)]
pub enum Error {
    /// An external command exited unsuccessfully.
    #[error("{program} failed: {message}")]
    CommandFailed { program: String, message: String },

    /// A required external tool could not be located.
    #[error("{0} not found. Please install it or set its path in the configuration")]
    ToolNotFound(&'static str),

    /// An external command did not finish in time.
    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    /// Scanning one cluster failed, which aborts the whole project.
    #[error("failed to scan cluster {cluster}: {source}")]
    ClusterScan {
        cluster: String,
        #[source]
        source: Box<Error>,
    },

    /// A scan task ended without reporting a result.
    #[error("scan task for project {0} ended unexpectedly")]
    TaskFailed(String),

    /// A cluster identity did not follow `prefix_project_location_cluster`.
    #[error("invalid cluster identity '{0}': expected prefix_project_location_cluster")]
    InvalidClusterIdentity(String),

    /// The inventory file does not exist.
    #[error("namespace inventory not found at {}", .0.display())]
    InventoryNotFound(PathBuf),

    /// The inventory file does not match the expected structure.
    #[error("failed to parse namespace inventory {}: {message}", .path.display())]
    InventoryParse { path: PathBuf, message: String },

    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No gcloud configuration points at the project.
    #[error("configuration name for project {0} not found")]
    ProfileNotFound(String),

    /// The operator's disambiguation input was not a valid choice.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Input ended before a choice was made.
    #[error("no location selected")]
    NoSelection,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cloud, auth or API failure while talking to gcloud/kubectl.
    Collaborator,
    /// Reading or writing durable state failed.
    Persistence,
    /// Malformed inventory or cluster identity.
    Parse,
    /// A lookup missed (inventory file, gcloud configuration).
    NotFound,
    /// Bad disambiguation input.
    Input,
    /// Invalid configuration or environment.
    Config,
}

impl Error {
    /// Creates a `CommandFailed` error from a program name and its stderr.
    pub fn command_failed(program: impl Into<String>, stderr: &str) -> Self {
        let message = stderr.trim();
        Error::CommandFailed {
            program: program.into(),
            message: if message.is_empty() {
                "exited with non-zero status".to_string()
            } else {
                message.to_string()
            },
        }
    }

    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CommandFailed { .. }
            | Error::ToolNotFound(_)
            | Error::Timeout { .. }
            | Error::ClusterScan { .. }
            | Error::TaskFailed(_) => ErrorKind::Collaborator,
            Error::Persistence { .. } | Error::Io(_) => ErrorKind::Persistence,
            Error::InvalidClusterIdentity(_)
            | Error::InventoryParse { .. }
            | Error::Json(_)
            | Error::Yaml(_) => ErrorKind::Parse,
            Error::InventoryNotFound(_) | Error::ProfileNotFound(_) => ErrorKind::NotFound,
            Error::InvalidChoice(_) | Error::NoSelection => ErrorKind::Input,
            Error::Config(_) | Error::UnsupportedPlatform(_) => ErrorKind::Config,
        }
    }

    /// Remediation hint for the operator, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::NotFound => Some(RESCAN_HINT),
            _ => None,
        }
    }

    /// Returns the cluster that aborted a project scan, if any.
    pub fn failed_cluster(&self) -> Option<&str> {
        match self {
            Error::ClusterScan { cluster, .. } => Some(cluster),
            _ => None,
        }
    }
}
