use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a directory walk or the manifest write.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot list directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write manifest {}: {source}", path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Terminal failures of a remote listing call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid repository reference {0:?}")]
    InvalidRepo(String),

    #[error("invalid API base URL {0:?}")]
    InvalidApiBase(String),

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("GET {url} returned an unexpected body: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FaultError {
    #[error("fault recorder is already installed")]
    AlreadyInstalled,
}
