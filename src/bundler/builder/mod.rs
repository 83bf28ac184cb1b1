//! Build orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that walks a
//! [`BuildPlan`](crate::bundler::BuildPlan), runs the packaging tool once per
//! task, and hands every successful build to the
//! [`Archiver`](crate::bundler::Archiver).
//!
//! # Example
//!
//! ```no_run
//! use webapp_bundler::bundler::{
//!     ArchiveFormat, BitWidth, BuildPlan, Bundler, Environment, PackageSettings, Platform,
//!     ToolLocator,
//! };
//!
//! # async fn example() -> webapp_bundler::bundler::Result<()> {
//! let plan = BuildPlan {
//!     environments: Environment::all(),
//!     widths: BitWidth::ALL.to_vec(),
//!     platform: Platform::Windows,
//!     format: ArchiveFormat::Zip,
//! };
//!
//! let bundler = Bundler::new(PackageSettings::default(), ToolLocator::system(), "apps")?;
//! let summary = bundler.run(&plan).await?;
//! println!("{} builds, {} archives", summary.built, summary.archived);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Bundler`] struct and the build loop
//! - [`packager`] - Packaging tool argument construction and execution
//! - [`runtime`] - Node.js version switching around a run
//! - [`tool_detection`] - External tool lookup and availability checking

mod orchestrator;
mod packager;
mod runtime;
pub(crate) mod tool_detection;

pub use orchestrator::{BuildSummary, Bundler};
pub use packager::{ELECTRON_MIRROR_VAR, display_command, packager_args, run_packager};
pub use runtime::{RuntimeSwitch, current_node_version, parse_node_version};
pub use tool_detection::ToolLocator;
