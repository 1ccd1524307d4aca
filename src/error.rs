//! Error types for the etymology pipeline.
//!
//! Only file-level problems are errors. Unrecognized tags, unmatched
//! conjugation patterns and unresolved headwords degrade locally and never
//! surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtymError {
    /// Reading a source file or writing an output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below the input root.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A record could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The tables file is missing or malformed.
    #[error("Invalid tables file {path}: {message}")]
    Tables { path: PathBuf, message: String },

    /// `init_tables` was called after the tables were already in use.
    #[error("Tables already initialized")]
    TablesAlreadyInitialized,

    /// A custom transformer name that no built-in transformer answers to.
    #[error("Unknown transformer: {0}")]
    UnknownTransformer(String),
}

impl EtymError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtymError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtymError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let err = EtymError::io(
            "words/ewer.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("words/ewer.txt"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn unknown_transformer_message() {
        let err = EtymError::UnknownTransformer("plural".to_string());
        assert_eq!(err.to_string(), "Unknown transformer: plural");
    }
}
