//! Main build orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the packaging
//! tool for every task of a [`BuildPlan`] and archives each build.

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

use super::packager::{display_command, packager_args, run_packager};
use super::tool_detection::ToolLocator;
use crate::{
    bail,
    bundler::{
        Result,
        archive::Archiver,
        error::ErrorExt,
        settings::{BuildPlan, PackageSettings, Platform},
        utils::fs,
    },
};

/// Counters reported once the whole plan has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Packaging runs that exited 0
    pub built: usize,
    /// Archives written
    pub archived: usize,
    /// Builds whose expected app directory was missing
    pub skipped: usize,
    /// Archive attempts that reported failure
    pub archive_failures: usize,
    /// Absolute output root
    pub output_root: PathBuf,
}

/// Main build orchestrator.
///
/// Runs strictly one packaging process at a time: the packager shares caches
/// and output directories between runs and is not safe to run concurrently.
///
/// # Failure policy
///
/// - A packaging failure (non-zero exit or spawn error) aborts the run and is
///   returned as the error; no further tasks start.
/// - A missing app directory after a successful build skips archiving for
///   that task only.
/// - Archiving failures are counted in [`BuildSummary`] and never abort.
#[derive(Debug)]
pub struct Bundler {
    settings: PackageSettings,
    locator: ToolLocator,
    root: PathBuf,
    host: Platform,
}

impl Bundler {
    /// Creates a bundler writing under `root`, resolved to an absolute path.
    pub fn new(
        settings: PackageSettings,
        locator: ToolLocator,
        root: impl AsRef<Path>,
    ) -> Result<Self> {
        let root = root.as_ref();
        let root = root
            .absolutize()
            .fs_context("resolving output directory", root)?
            .into_owned();

        Ok(Self {
            settings,
            locator,
            root,
            host: Platform::host(),
        })
    }

    /// Overrides the host platform the archiver picks its zip backend for.
    pub fn with_host(mut self, host: Platform) -> Self {
        self.host = host;
        self
    }

    /// Absolute output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &PackageSettings {
        &self.settings
    }

    /// Executes every task of `plan` in order.
    pub async fn run(&self, plan: &BuildPlan) -> Result<BuildSummary> {
        if plan.environments.is_empty() || plan.widths.is_empty() {
            bail!("Build plan is empty: no environment or architecture selected");
        }

        if fs::ensure_dir(&self.root).await? {
            log::info!("Created output directory: {}", self.root.display());
        }

        let archiver = Archiver::new(&self.locator, self.host);
        let mut summary = BuildSummary {
            output_root: self.root.clone(),
            ..Default::default()
        };

        for task in plan.tasks() {
            let arch_dir = task.arch_dir(&self.root);
            if fs::ensure_dir(&arch_dir).await? {
                log::info!("Created architecture directory: {}", arch_dir.display());
            }

            let args = packager_args(&self.settings, &task, plan.platform, &arch_dir);
            log::info!("Running {} build...", self.settings.packager);
            log::info!("  Environment: {}", task.environment.id);
            log::info!("  Platform:    {}", plan.platform);
            log::info!("  Arch:        {}-bit ({})", task.width, task.arch);
            log::info!("  App name:    {}", task.environment.name);
            log::info!("  URL:         {}", task.environment.url);
            log::info!("  Output:      {}", arch_dir.display());
            log::info!("  Command:     {}", display_command(&self.settings.packager, &args));

            if let Err(e) =
                run_packager(&self.locator, &self.settings, &task, plan.platform, &arch_dir).await
            {
                log::error!("❌ {}", e);
                return Err(e);
            }

            log::info!(
                "✓ Build succeeded: {} {}-bit ({})",
                task.environment.id,
                task.width,
                task.arch
            );
            summary.built += 1;

            let app_dir = task.app_dir(&self.root);
            if !fs::is_dir(&app_dir).await {
                log::warn!(
                    "⚠️  Build directory not found: {}, skipping archive",
                    app_dir.display()
                );
                summary.skipped += 1;
                continue;
            }

            let archive_path = task.archive_path(&self.root, plan.format);
            if archiver.archive(&app_dir, &archive_path, plan.format).await {
                summary.archived += 1;
            } else {
                summary.archive_failures += 1;
            }
        }

        Ok(summary)
    }
}
