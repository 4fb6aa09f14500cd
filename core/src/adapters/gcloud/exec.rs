//! Locating and running the gcloud and kubectl executables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::config::Settings;
use crate::error::{Error, Result};

/// Default paths to search for gcloud.
const GCLOUD_PATHS: &[&str] = &[
    "/opt/homebrew/bin/gcloud",               // Apple Silicon
    "/usr/local/bin/gcloud",                  // Intel Mac / Homebrew
    "/usr/bin/gcloud",                        // System package
    "/snap/bin/gcloud",                       // Snap
    "/usr/lib/google-cloud-sdk/bin/gcloud",   // Debian/Ubuntu apt
];

/// Default paths to search for kubectl.
const KUBECTL_PATHS: &[&str] = &[
    "/opt/homebrew/bin/kubectl", // Apple Silicon
    "/usr/local/bin/kubectl",    // Intel Mac / Homebrew
    "/usr/bin/kubectl",          // System
    "/snap/bin/kubectl",         // Snap
];

/// Paths and timeout for the external command line tools.
#[derive(Debug, Clone)]
pub struct Toolchain {
    gcloud_path: Option<PathBuf>,
    kubectl_path: Option<PathBuf>,
    timeout: Duration,
}

impl Toolchain {
    /// Creates a toolchain from settings, searching well-known locations and
    /// `PATH` for tools the settings leave unset.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gcloud_path: settings
                .gcloud_path
                .clone()
                .or_else(|| find_executable("gcloud", GCLOUD_PATHS)),
            kubectl_path: settings
                .kubectl_path
                .clone()
                .or_else(|| find_executable("kubectl", KUBECTL_PATHS)),
            timeout: Duration::from_secs(settings.command_timeout_secs),
        }
    }

    /// Creates a toolchain with explicit paths.
    pub fn with_paths(
        gcloud_path: Option<PathBuf>,
        kubectl_path: Option<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            gcloud_path,
            kubectl_path,
            timeout,
        }
    }

    /// Runs gcloud and returns its stdout.
    pub async fn gcloud(&self, args: &[&str]) -> Result<String> {
        let path = self.gcloud_path.as_ref().ok_or(Error::ToolNotFound("gcloud"))?;
        self.execute("gcloud", path, args).await
    }

    /// Runs gcloud and reports whether it exited successfully, with its stderr.
    pub async fn gcloud_status(&self, args: &[&str]) -> Result<std::result::Result<(), Error>> {
        match self.gcloud(args).await {
            Ok(_) => Ok(Ok(())),
            Err(e @ (Error::CommandFailed { .. } | Error::Timeout { .. })) => Ok(Err(e)),
            Err(e) => Err(e),
        }
    }

    /// Runs kubectl and returns its stdout.
    pub async fn kubectl(&self, args: &[&str]) -> Result<String> {
        let path = self
            .kubectl_path
            .as_ref()
            .ok_or(Error::ToolNotFound("kubectl"))?;
        self.execute("kubectl", path, args).await
    }

    /// Executes a command and returns the output.
    async fn execute(&self, program: &str, path: &Path, args: &[&str]) -> Result<String> {
        tracing::debug!(program, ?args, "running command");

        let result = timeout(self.timeout, async {
            let output = Command::new(path)
                .args(args)
                .kill_on_drop(true)
                .output()
                .await?;

            Ok::<_, std::io::Error>((output.status, output.stdout, output.stderr))
        })
        .await;

        match result {
            Ok(Ok((status, stdout, stderr))) => {
                if status.success() {
                    String::from_utf8(stdout).map_err(|e| Error::CommandFailed {
                        program: program.to_string(),
                        message: format!("output is not valid UTF-8: {}", e),
                    })
                } else {
                    Err(Error::command_failed(
                        program,
                        &String::from_utf8_lossy(&stderr),
                    ))
                }
            }
            Ok(Err(e)) => Err(Error::CommandFailed {
                program: program.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(Error::Timeout {
                program: program.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

/// Finds an executable in the given paths, then on `PATH`.
fn find_executable(name: &str, paths: &[&str]) -> Option<PathBuf> {
    paths
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| {
            std::env::var_os("PATH").and_then(|path| {
                std::env::split_paths(&path)
                    .map(|dir| dir.join(name))
                    .find(|p| p.is_file())
            })
        })
}
