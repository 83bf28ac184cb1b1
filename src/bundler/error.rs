//! Error types for packaging and archiving operations.

use std::path::{Path, PathBuf};

use super::settings::Arch;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the packaging pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form error, usually produced by [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),

    /// Raw IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO error tied to a filesystem path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Operation that failed
        context: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },

    /// A child process could not be spawned or waited on.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Underlying error
        error: std::io::Error,
    },

    /// An external program is not on the search path.
    #[error("`{name}` not found: {source}")]
    ToolNotFound {
        /// Program name
        name: String,
        /// Lookup error
        source: which::Error,
    },

    /// The packaging tool exited unsuccessfully.
    #[error("packaging failed for {environment} ({arch}) with exit code {code}")]
    PackagerFailed {
        /// Environment identifier
        environment: String,
        /// Concrete architecture
        arch: Arch,
        /// Exit code, 1 when the process was killed by a signal
        code: i32,
    },

    /// `nvm use` exited unsuccessfully.
    #[error("switching to Node.js {version} failed with exit code {code}")]
    RuntimeSwitchFailed {
        /// Requested Node.js version
        version: String,
        /// Exit code of `nvm`
        code: i32,
    },
}

impl Error {
    /// Process exit code this error maps to.
    ///
    /// Failures of external tools propagate the tool's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PackagerFailed { code, .. } | Error::RuntimeSwitchFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation and path that produced it.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with an [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Map a process exit status to a code, using 1 for signal termination.
pub(crate) fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
