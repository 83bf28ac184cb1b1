//! Archive dispatcher.
//!
//! Compresses a packager output directory into a single file. The backend is
//! picked from an ordered candidate list per format (see [`backend`]): the
//! requested format's own tool first, then the host's zip policy. Every
//! candidate tool is probed right before use; nothing is cached.
//!
//! [`Archiver::archive`] never fails: probe and process errors are logged
//! and reported as `false`.

pub mod backend;

use std::path::Path;

use tokio::process::Command;

use crate::bundler::builder::ToolLocator;
use crate::bundler::settings::{ArchiveFormat, Platform};

pub use backend::{Backend, Tool};

/// Runs compression backends through a [`ToolLocator`].
#[derive(Debug, Clone)]
pub struct Archiver<'a> {
    locator: &'a ToolLocator,
    host: Platform,
}

impl<'a> Archiver<'a> {
    /// Archiver for the given host platform.
    ///
    /// The host only decides the zip policy; production code passes
    /// [`Platform::host()`].
    pub fn new(locator: &'a ToolLocator, host: Platform) -> Self {
        Self { locator, host }
    }

    /// Pick the first available backend for `format`.
    pub async fn select_backend(&self, format: ArchiveFormat) -> Option<Backend> {
        backend::select(format, self.host, |tool| {
            self.locator.is_available(tool.program(), tool.version_args())
        })
        .await
    }

    /// Archive `source` into `output`.
    ///
    /// `output` is used as given, even when a fallback backend writes a
    /// different container format than its extension suggests.
    ///
    /// # Returns
    ///
    /// `true` only when a backend ran and exited 0.
    pub async fn archive(&self, source: &Path, output: &Path, format: ArchiveFormat) -> bool {
        log::info!("Packing {} as {}...", source.display(), format);

        let Some(backend) = self.select_backend(format).await else {
            log::warn!("⚠️  No compression tool available for {}", format);
            return false;
        };

        if backend.produces() != format {
            log::warn!(
                "⚠️  {} is not available, writing {} content instead",
                format,
                backend.produces()
            );
        }

        let ok = self.run_backend(backend, source, output).await;
        if ok {
            log::info!("✅ {} archive created: {}", backend.produces(), output.display());
        } else {
            log::warn!(
                "⚠️  Build output left in {}; it can be packed manually",
                source.display()
            );
        }
        ok
    }

    async fn run_backend(&self, backend: Backend, source: &Path, output: &Path) -> bool {
        let program = match self.locator.locate(backend.program()) {
            Ok(path) => path,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };

        let args = backend.args(source, output);
        log::info!(
            "Running: {}",
            crate::bundler::builder::display_command(backend.program(), &args)
        );

        match Command::new(&program).args(&args).status().await {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::warn!(
                    "⚠️  {} failed with exit code {:?}",
                    backend.program(),
                    status.code()
                );
                false
            }
            Err(e) => {
                log::warn!("⚠️  {} could not be started: {}", backend.program(), e);
                false
            }
        }
    }
}
