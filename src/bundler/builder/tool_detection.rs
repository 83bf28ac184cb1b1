//! External tool detection and availability checking.
//!
//! Every external program (packager, runtime manager, compressors) is
//! resolved through a [`ToolLocator`], so tests can point the whole pipeline
//! at a directory of stand-in scripts.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::bundler::error::{Error, Result};

/// Resolves program names to executables.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    /// Explicit search path; `None` means the process `PATH`.
    search_path: Option<OsString>,
}

impl ToolLocator {
    /// Locator backed by the process `PATH`.
    pub fn system() -> Self {
        Self { search_path: None }
    }

    /// Locator restricted to an explicit, `PATH`-formatted list of directories.
    pub fn with_search_path(path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(path.into()),
        }
    }

    /// Resolve `name` to an executable path.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let found = match &self.search_path {
            None => which::which(name),
            Some(paths) => {
                let cwd = std::env::current_dir()?;
                which::which_in(name, Some(paths), cwd)
            }
        };

        found.map_err(|source| Error::ToolNotFound {
            name: name.to_string(),
            source,
        })
    }

    /// Check that `name` exists and that its version query exits successfully.
    ///
    /// Never cached: each call probes afresh.
    pub async fn is_available(&self, name: &str, version_args: &[&str]) -> bool {
        let path = match self.locate(name) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("{} not available: {}", name, e);
                return false;
            }
        };

        match Command::new(&path)
            .args(version_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) if status.success() => {
                log::debug!("✓ {} available at {}", name, path.display());
                true
            }
            Ok(status) => {
                log::debug!(
                    "{} found at {} but `{} {}` failed (exit code: {:?})",
                    name,
                    path.display(),
                    name,
                    version_args.join(" "),
                    status.code()
                );
                false
            }
            Err(e) => {
                log::debug!(
                    "{} found at {} but failed to execute: {}",
                    name,
                    path.display(),
                    e
                );
                false
            }
        }
    }
}

#[cfg(all(test, unix))]
pub(crate) mod test_support {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable `/bin/sh` script named `name` into `dir`.
    pub fn fake_tool(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
