//! Error types for corpus loading and phrase substitution.

use std::path::PathBuf;
use thiserror::Error;

/// A single `i-j` link that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    /// The link does not contain exactly one `-`
    #[error("link {0:?} must have the form i-j")]
    MissingSeparator(String),

    /// One side of the link is not a non-negative integer
    #[error("link {0:?} has a non-integer index")]
    BadIndex(String),
}

/// Main error type for the joint dropout pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error with file context
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for `Config`
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parallel files do not have the same number of lines
    #[error("{path} has {found} lines, expected {expected}")]
    LineCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// Alignment record could not be parsed
    #[error("{path}:{line}: malformed alignment: {source}")]
    MalformedAlignment {
        path: PathBuf,
        line: usize,
        #[source]
        source: AlignmentError,
    },

    /// Alignment link points past the end of one of its sentences
    #[error(
        "{path}:{line}: link {}-{} out of range for sentence lengths {source_len}/{target_len}",
        link.0,
        link.1
    )]
    AlignmentOutOfRange {
        path: PathBuf,
        line: usize,
        link: (usize, usize),
        source_len: usize,
        target_len: usize,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
