//! Packaging pipeline.
//!
//! - [`settings`] - Environments, architectures, formats, and the build plan
//! - [`builder`] - The [`Bundler`] orchestrator, packager invocation, runtime switching
//! - [`archive`] - The archive dispatcher and its compression backends
//! - [`utils`] - Filesystem helpers

pub mod archive;
pub mod builder;
pub mod error;
pub mod settings;
pub mod utils;

pub use archive::{Archiver, Backend, Tool};
pub use builder::{BuildSummary, Bundler, RuntimeSwitch, ToolLocator};
pub use error::{Error, ErrorExt, Result};
pub use settings::{
    Arch, ArchiveFormat, BitWidth, BuildPlan, BuildTask, Environment, PackageSettings, Platform,
};
