//! Error types for the content store and metadata resolver

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while listing or resolving content items.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is absent. Fatal for the whole operation.
    #[error("missing configuration: {0}")]
    Configuration(String),

    /// A directory or file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The identifier does not match any content item.
    #[error("no content item named `{0}`")]
    NotFound(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
