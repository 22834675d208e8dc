// File: src/errors.rs
use std::path::PathBuf;

/// Result type used throughout the aligner.
pub type Result<T, E = AlignError> = std::result::Result<T, E>;

/// Everything that can abort an alignment run.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch line that does not name both a source and a target file.
    #[error("Malformed input in '{path}' at line {line}: {reason}")]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Translation lexicon '{0}' not found (expected a file named <source>_<target>)")]
    LexiconNotFound(PathBuf),

    #[error("Lexicon snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AlignError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
