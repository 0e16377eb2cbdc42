//! Error types for clause-core

use std::fmt;
use std::path::PathBuf;

use crate::host::HostError;

/// Result type for clause-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of a reconciliation pass that talks to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Read batch: paint the document unmanaged, read tagged regions
    Snapshot,
    /// First write batch: region-wide markers
    Apply,
    /// Second write batch: drift markers on pending insertions
    Overlay,
    /// Clearing every marker
    Reset,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Snapshot => "snapshot",
            Self::Apply => "apply",
            Self::Overlay => "overlay",
            Self::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in clause-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A host batch failed; the pass was aborted at this phase
    #[error("Reconciliation failed during {phase} phase: {source}")]
    HostTransaction {
        phase: Phase,
        #[source]
        source: HostError,
    },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parsed but is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn host(phase: Phase) -> impl FnOnce(HostError) -> Self {
        move |source| Self::HostTransaction { phase, source }
    }
}
