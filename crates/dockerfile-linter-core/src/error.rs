use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, parsing or configuring a lint run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Dockerfile not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No FROM instruction found; cannot resolve a base image")]
    MissingFrom,

    #[error("FROM instruction on line {line} does not name an image")]
    EmptyBaseImage { line: usize },

    #[error("Failed to load config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl LintError {
    /// Whether this is the "recipe file is missing" condition, which is
    /// reported separately from every other failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LintError::NotFound { .. })
    }
}
