//! Error types for mddifflib

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a comparison a root directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRole {
    Source,
    Target,
}

impl fmt::Display for RootRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootRole::Source => write!(f, "source"),
            RootRole::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur while collecting, diffing or reporting
#[derive(Error, Debug)]
pub enum MddiffError {
    /// A root argument does not exist or is not a directory
    #[error("invalid {role} directory '{path}': {reason}")]
    InvalidRoot {
        role: RootRole,
        path: PathBuf,
        reason: &'static str,
    },

    /// Failure while walking a directory tree
    #[error("failed to scan '{root}': {source}")]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    /// Entry name that cannot be represented as a relative path key
    #[error("path is not valid UTF-8: '{path}'")]
    NonUtf8Path { path: PathBuf },

    /// Invalid glob pattern in the ignore list
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Config file could not be read or parsed
    #[error("invalid config file '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// Output format name outside the recognized set
    #[error("unknown format: {0} (want table|json|markdown)")]
    UnknownFormat(String),

    /// Structured dump encode/decode failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
