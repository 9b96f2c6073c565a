//! Error types for dcos-net-setup.
//!
//! Non-zero exits of wrapped commands are not errors here; they travel as
//! plain exit codes. `SetupError` covers failures of the wrapper itself.

use crate::exit_codes;
use std::path::Path;
use thiserror::Error;

/// Failures raised by the wrapper rather than by the commands it runs.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The invocation is malformed or names nothing to run.
    #[error("{0}")]
    UserError(String),

    /// A child process could not be started.
    #[error("failed to execute `{command}`: {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed.
    #[error("{0}")]
    IoError(String),
}

impl SetupError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::UserError(_) => exit_codes::USER_ERROR,
            SetupError::SpawnError { .. } => exit_codes::SPAWN_FAILURE,
            SetupError::IoError(_) => exit_codes::IO_FAILURE,
        }
    }

    /// Build an `IoError` that names the operation and path involved.
    pub fn io(action: &str, path: &Path, err: std::io::Error) -> Self {
        SetupError::IoError(format!("failed to {} '{}': {}", action, path.display(), err))
    }
}

/// Result type alias for dcos-net-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
