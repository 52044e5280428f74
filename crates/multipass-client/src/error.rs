//! Error types for multipass-client

use std::time::Duration;

use thiserror::Error;

/// Errors from talking to Multipass or probing the host OS.
#[derive(Error, Debug)]
pub enum MultipassError {
    /// Binary not found on PATH
    #[error("please install {binary} (not found in PATH)")]
    NotInstalled { binary: String },

    /// Command ran but exited unsuccessfully
    #[error("failed to run {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Command did not finish in time
    #[error("{command} did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// `multipass list` output could not be decoded
    #[error("invalid multipass list output: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for multipass-client operations.
pub type Result<T> = std::result::Result<T, MultipassError>;
