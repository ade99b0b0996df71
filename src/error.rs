use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for semtag operations
#[derive(Error, Debug)]
pub enum SemtagError {
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Cannot read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest {} is not valid JSON: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {} is invalid: {reason}", path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Cannot write manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tag creation failed: {0}")]
    TagCreation(String),

    #[error("git command failed: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// Convenience type alias for Results in semtag
pub type Result<T> = std::result::Result<T, SemtagError>;

impl SemtagError {
    /// Raised whenever the version control tool cannot be run at all
    pub fn git_not_installed() -> Self {
        SemtagError::Environment("git is not installed".to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        SemtagError::Validation(msg.into())
    }

    pub fn tag_creation(msg: impl Into<String>) -> Self {
        SemtagError::TagCreation(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        SemtagError::Command(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SemtagError::Config(msg.into())
    }

    pub fn invalid_manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SemtagError::ManifestInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
