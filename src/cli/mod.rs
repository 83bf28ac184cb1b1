//! Command line interface for the batch packager.
//!
//! This module wires argument resolution, the Node.js runtime switch, and
//! the [`Bundler`](crate::bundler::Bundler) together, and turns the outcome
//! into a process exit code.

mod args;
mod output;

pub use args::{Args, Resolution, ResolveWarning, RuntimeConfig, resolve_plan};
pub use output::OutputManager;

use crate::bundler::{BuildPlan, BuildSummary, Bundler, Platform, RuntimeSwitch, ToolLocator};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Run a full build for already-parsed arguments and return the exit code.
///
/// Exit code precedence: packaging failure, then runtime restore failure.
pub async fn execute(args: &Args) -> Result<i32> {
    let config = RuntimeConfig::from(args);

    let resolution = args.resolve(Platform::host());
    for warning in &resolution.warnings {
        log::debug!("argument warning: {:?}", warning);
        config.warn(&warning.to_string())?;
    }
    let plan = resolution.plan;
    print_plan(&config, &plan)?;
    config.verbose_println(&format!(
        "  Packager: {} (Electron {})",
        args.packager, args.electron_version
    ))?;

    let locator = ToolLocator::system();
    let bundler = Bundler::new(args.package_settings(), locator.clone(), &args.output_dir)?;

    config.progress("Preparing build...")?;
    let mut runtime = if args.skip_node_switch {
        RuntimeSwitch::disabled()
    } else {
        match RuntimeSwitch::acquire(&locator, &args.node_version).await {
            Ok(runtime) => runtime,
            Err(e) => {
                config.error(&e.to_string())?;
                return Ok(e.exit_code());
            }
        }
    };

    let outcome = bundler.run(&plan).await;
    let restored = runtime.restore().await;

    match outcome {
        Ok(summary) => {
            print_summary(&config, &summary)?;
            match restored {
                Ok(()) => Ok(0),
                Err(e) => {
                    config.error(&e.to_string())?;
                    Ok(e.exit_code())
                }
            }
        }
        Err(e) => {
            config.error(&format!("Build failed: {e}"))?;
            if let Err(restore_err) = restored {
                config.error(&restore_err.to_string())?;
            }
            Ok(e.exit_code())
        }
    }
}

fn print_plan(config: &RuntimeConfig, plan: &BuildPlan) -> std::io::Result<()> {
    let environments: Vec<_> = plan.environments.iter().map(|e| e.id).collect();
    let arches: Vec<_> = plan.arches().iter().map(|a| a.as_str()).collect();

    config.section("Build plan")?;
    config.indent(&format!("Environments: {}", environments.join(", ")))?;
    config.indent(&format!("Architectures: {}", arches.join(", ")))?;
    config.indent(&format!("Platform: {}", plan.platform))?;
    config.indent(&format!("Archive format: {}", plan.format))
}

fn print_summary(config: &RuntimeConfig, summary: &BuildSummary) -> std::io::Result<()> {
    config.section("All environments built")?;
    config.indent(&format!("Builds: {}", summary.built))?;
    config.indent(&format!("Archives: {}", summary.archived))?;
    if summary.skipped > 0 {
        config.warn(&format!(
            "{} build(s) had no output directory and were not archived",
            summary.skipped
        ))?;
    }
    if summary.archive_failures > 0 {
        config.warn(&format!(
            "{} archive(s) failed; the raw builds are still in place",
            summary.archive_failures
        ))?;
    }
    config.success(&format!(
        "Build and packaging finished. Output: {}",
        summary.output_root.display()
    ))
}
