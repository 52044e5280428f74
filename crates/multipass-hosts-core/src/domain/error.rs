//! Error taxonomy for the I/O around the hosts block.
//!
//! The block operations themselves are total; these errors come from
//! loading configuration and touching the hosts file.

use std::path::PathBuf;

/// multipass-hosts errors.
#[derive(Debug, thiserror::Error)]
pub enum HostsError {
    #[error("could not determine home directory (HOME is not set)")]
    HomeDirMissing,

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read hosts file {path}: {source}")]
    HostsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write hosts to {path}: {source}")]
    HostsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for multipass-hosts operations.
pub type Result<T> = std::result::Result<T, HostsError>;
