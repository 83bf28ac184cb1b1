//! Packaging tool invocation.
//!
//! Builds the packager's argument vector for one [`BuildTask`] and runs it
//! with inherited standard streams so the operator sees live progress.

use std::ffi::OsString;
use std::path::Path;

use tokio::process::Command;

use super::tool_detection::ToolLocator;
use crate::bundler::error::{Error, Result, status_code};
use crate::bundler::settings::{BuildTask, PackageSettings, Platform};

/// Environment variable the packager reads its Electron mirror from.
pub const ELECTRON_MIRROR_VAR: &str = "ELECTRON_MIRROR";

/// Argument vector for one packaging run.
///
/// The URL and output directory are positional and follow `--`.
pub fn packager_args(
    settings: &PackageSettings,
    task: &BuildTask,
    platform: Platform,
    out_dir: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(24);
    let mut flag = |name: &str, value: OsString| {
        args.push(name.into());
        args.push(value);
    };

    flag("--name", task.environment.name.into());
    flag("--icon", settings.icon.clone().into_os_string());
    flag("--inject", settings.inject.clone().into_os_string());
    flag("--electron-version", settings.electron_version.as_str().into());
    flag("--app-copyright", settings.copyright.as_str().into());

    args.extend(
        [
            "--disable-dev-tools",
            "--clear-cache",
            "--always-on-top",
            "--full-screen",
        ]
        .map(OsString::from),
    );

    args.push("--platform".into());
    args.push(platform.as_str().into());
    args.push("--arch".into());
    args.push(task.arch.as_str().into());
    args.push("--verbose".into());
    args.push("--".into());
    args.push(task.environment.url.into());
    args.push(out_dir.as_os_str().to_owned());
    args
}

/// Render a command line for logging.
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run the packager for `task`, writing into `out_dir`.
///
/// # Returns
///
/// * `Ok(())` - The packager exited 0
/// * `Err(Error::PackagerFailed)` - Non-zero exit, carrying the exit code
/// * `Err(Error::ToolNotFound | Error::CommandFailed)` - The packager could not be started
pub async fn run_packager(
    locator: &ToolLocator,
    settings: &PackageSettings,
    task: &BuildTask,
    platform: Platform,
    out_dir: &Path,
) -> Result<()> {
    let program = locator.locate(&settings.packager)?;
    let args = packager_args(settings, task, platform, out_dir);

    let status = Command::new(&program)
        .args(&args)
        .env(ELECTRON_MIRROR_VAR, &settings.electron_mirror)
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: settings.packager.clone(),
            error,
        })?;

    if !status.success() {
        return Err(Error::PackagerFailed {
            environment: task.environment.id.to_string(),
            arch: task.arch,
            code: status_code(status),
        });
    }

    Ok(())
}
