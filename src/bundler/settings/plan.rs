//! Resolved build plan and the per-iteration build task.

use std::path::{Path, PathBuf};

use super::{Arch, ArchiveFormat, BitWidth, Environment, Platform};

/// Platform segment the packager bakes into its output directory name.
///
/// The packager is assumed to always emit `<name>-win32-<arch>`, whichever
/// `--platform` was requested.
pub const OUTPUT_PLATFORM_SUFFIX: &str = "win32";

/// Everything one invocation builds.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    pub environments: Vec<&'static Environment>,
    pub widths: Vec<BitWidth>,
    pub platform: Platform,
    pub format: ArchiveFormat,
}

impl BuildPlan {
    /// Tasks in build order: environment, then bit width, then concrete arch.
    pub fn tasks(&self) -> impl Iterator<Item = BuildTask> + '_ {
        self.environments.iter().flat_map(move |environment| {
            self.widths.iter().flat_map(move |width| {
                width.arches().iter().map(move |arch| BuildTask {
                    environment: *environment,
                    width: *width,
                    arch: *arch,
                })
            })
        })
    }

    /// Concrete architectures the plan touches, without duplicates.
    pub fn arches(&self) -> Vec<Arch> {
        let mut arches = Vec::new();
        for arch in self.widths.iter().flat_map(|w| w.arches()) {
            if !arches.contains(arch) {
                arches.push(*arch);
            }
        }
        arches
    }
}

/// One packaging run: an environment built for one concrete architecture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildTask {
    pub environment: &'static Environment,
    pub width: BitWidth,
    pub arch: Arch,
}

impl BuildTask {
    /// `<root>/<arch>`: the packager's output directory.
    pub fn arch_dir(&self, root: &Path) -> PathBuf {
        root.join(self.arch.as_str())
    }

    /// Directory name the packager is expected to produce.
    pub fn app_dir_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.environment.name, OUTPUT_PLATFORM_SUFFIX, self.arch
        )
    }

    /// `<root>/<arch>/<name>-win32-<arch>`
    pub fn app_dir(&self, root: &Path) -> PathBuf {
        self.arch_dir(root).join(self.app_dir_name())
    }

    /// `<root>/<arch>/<name>-win32-<arch>.<format>`, next to the app directory.
    pub fn archive_path(&self, root: &Path, format: ArchiveFormat) -> PathBuf {
        self.arch_dir(root)
            .join(format!("{}.{}", self.app_dir_name(), format.extension()))
    }
}
