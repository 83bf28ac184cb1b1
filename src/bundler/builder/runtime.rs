//! Node.js runtime version switching through `nvm`.
//!
//! The packager needs a pinned Node.js major version. [`RuntimeSwitch`]
//! records the active version, switches with `nvm use`, and puts the
//! recorded version back when the run ends, whichever way it ends.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use semver::Version;
use tokio::process::Command;

use super::tool_detection::ToolLocator;
use crate::bundler::error::{Error, Result, status_code};

/// Guard over an `nvm use` switch.
///
/// Call [`RuntimeSwitch::restore`] when the build finishes. A guard dropped
/// without being restored restores synchronously in `Drop`.
#[derive(Debug)]
pub struct RuntimeSwitch {
    nvm: Option<PathBuf>,
    original: Option<Version>,
    restored: bool,
}

impl RuntimeSwitch {
    /// A switch that did nothing and restores nothing.
    pub fn disabled() -> Self {
        Self {
            nvm: None,
            original: None,
            restored: true,
        }
    }

    /// Record the current Node.js version and switch to `target`.
    ///
    /// A missing `nvm` is not fatal: the run continues on whatever Node.js
    /// is active. A failing `nvm use` is.
    pub async fn acquire(locator: &ToolLocator, target: &str) -> Result<Self> {
        let original = current_node_version(locator).await;
        match &original {
            Some(version) => log::info!("Current Node.js version: v{}", version),
            None => log::info!("Current Node.js version could not be determined"),
        }

        let nvm = match locator.locate("nvm") {
            Ok(path) => path,
            Err(e) => {
                log::warn!(
                    "{}; building with the active Node.js instead of v{}",
                    e,
                    target
                );
                return Ok(Self::disabled());
            }
        };

        log::info!("Switching to Node.js v{}...", target);
        nvm_use(&nvm, target).await?;

        Ok(Self {
            nvm: Some(nvm),
            original,
            restored: false,
        })
    }

    /// Version recorded before switching.
    pub fn original(&self) -> Option<&Version> {
        self.original.as_ref()
    }

    /// Switch back to the recorded version.
    ///
    /// Does nothing when no switch happened or the version is unknown.
    pub async fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let (Some(nvm), Some(original)) = (&self.nvm, &self.original) else {
            return Ok(());
        };

        let version = original.to_string();
        log::info!("Switching back to Node.js v{}...", version);
        nvm_use(nvm, &version).await?;
        log::info!("✓ Restored Node.js v{}", version);
        Ok(())
    }
}

impl Drop for RuntimeSwitch {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        let (Some(nvm), Some(original)) = (&self.nvm, &self.original) else {
            return;
        };

        let version = original.to_string();
        match std::process::Command::new(nvm).args(["use", &version]).status() {
            Ok(status) if status.success() => log::info!("✓ Restored Node.js v{}", version),
            Ok(status) => log::error!(
                "Restoring Node.js v{} failed with exit code {}",
                version,
                status_code(status)
            ),
            Err(e) => log::error!("Restoring Node.js v{} failed: {}", version, e),
        }
    }
}

async fn nvm_use(nvm: &Path, version: &str) -> Result<()> {
    let status = Command::new(nvm)
        .args(["use", version])
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "nvm".to_string(),
            error,
        })?;

    if !status.success() {
        let code = status_code(status);
        log::error!("nvm use {} failed with exit code {}", version, code);
        return Err(Error::RuntimeSwitchFailed {
            version: version.to_string(),
            code,
        });
    }
    Ok(())
}

/// Active Node.js version from `node --version`, if it can be read.
pub async fn current_node_version(locator: &ToolLocator) -> Option<Version> {
    let node = locator.locate("node").ok()?;
    let output = Command::new(node)
        .arg("--version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }
    parse_node_version(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `node --version` output such as `v18.17.0`.
pub fn parse_node_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}
