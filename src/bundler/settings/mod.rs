//! Configuration structures for packaging runs.
//!
//! This module holds the static data model: deployment environments, the
//! bit-width to architecture table, archive formats, target platforms,
//! packager settings, and the resolved build plan.

mod arch;
mod environment;
mod format;
mod package;
mod plan;
mod platform;

// Re-export all public types
pub use arch::{Arch, BitWidth};
pub use environment::{ENVIRONMENTS, Environment};
pub use format::ArchiveFormat;
pub use package::{DEFAULT_ELECTRON_MIRROR, PackageSettings};
pub use plan::{BuildPlan, BuildTask, OUTPUT_PLATFORM_SUFFIX};
pub use platform::Platform;
