//! Top-level error type for the command line binary.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type surfaced by [`crate::cli::run`]
#[derive(Error, Debug)]
pub enum BundlerError {
    /// IO errors, usually from writing to the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

impl BundlerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundlerError::Bundler(e) => e.exit_code(),
            BundlerError::Io(_) => 1,
        }
    }
}
