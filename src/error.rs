//! Error types for stub generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using StubError.
pub type Result<T> = std::result::Result<T, StubError>;

/// Errors that stop stub generation for a single header.
#[derive(Error, Debug)]
pub enum StubError {
    /// Header does not exist.
    #[error("File '{path}' not found")]
    InputNotFound { path: PathBuf },

    /// Failed to read the header.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the generated definitions.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output path would overwrite the header itself.
    #[error("output for '{path}' would overwrite the input")]
    OutputIsInput { path: PathBuf },

    /// Failed to read the configuration file.
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has unknown keys.
    #[error("invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl StubError {
    /// Create a Read error, mapping a missing file to InputNotFound.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound { path },
            _ => Self::Read { path, source },
        }
    }

    /// Create a Write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
