//! Switching the operator's active org/space.

use std::future::Future;
use std::io;

use thiserror::Error;
use tokio::process::Command;

/// Errors raised while switching the active org/space.
#[derive(Debug, Error)]
pub enum ContextSwitchError {
    /// The CLI could not be started.
    #[error("failed to run '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    /// The CLI ran but rejected the target.
    #[error("'{binary} target' failed ({status}): {message}")]
    Rejected {
        binary: String,
        status: String,
        message: String,
    },
}

/// Capability to make an org/space the operator's active context.
pub trait ContextSwitcher: Send + Sync {
    fn set_active(
        &self,
        organization: &str,
        space: &str,
    ) -> impl Future<Output = Result<(), ContextSwitchError>> + Send;
}

/// Targets through the CF CLI: `cf target -o ORG -s SPACE`.
#[derive(Debug, Clone)]
pub struct CfCliTarget {
    binary: String,
}

impl CfCliTarget {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl ContextSwitcher for CfCliTarget {
    async fn set_active(&self, organization: &str, space: &str) -> Result<(), ContextSwitchError> {
        tracing::debug!(binary = %self.binary, organization, space, "Switching target");

        let output = Command::new(&self.binary)
            .args(["target", "-o", organization, "-s", space])
            .output()
            .await
            .map_err(|source| ContextSwitchError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        // the CF CLI reports most failures on stdout
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = if stderr.trim().is_empty() { stdout } else { stderr };

        Err(ContextSwitchError::Rejected {
            binary: self.binary.clone(),
            status: output.status.to_string(),
            message: message.trim().to_string(),
        })
    }
}
