use std::path::PathBuf;

use thiserror::Error;

/// Errors raised around the outline core: reading sources, parsing them,
/// and serializing results. The core tree walk itself never fails.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed source; position of the first error node (1-based).
    #[error("parse error at line {line}, column {column}")]
    Parse { line: usize, column: usize },

    #[error("failed to set language: {0}")]
    Language(String),

    #[error("src path {0} does not exist")]
    NotFound(PathBuf),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl OutlineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
