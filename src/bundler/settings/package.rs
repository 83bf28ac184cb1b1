//! Packaging tool configuration.

use std::path::PathBuf;

/// Default Electron download mirror exported as `ELECTRON_MIRROR`.
pub const DEFAULT_ELECTRON_MIRROR: &str = "https://npmmirror.com/mirrors/electron/";

/// Settings shared by every packaging invocation of a run.
///
/// Per-task values (app name, URL, architecture, output directory) come from
/// the [`BuildTask`](super::BuildTask); everything else lives here.
///
/// # Examples
///
/// ```no_run
/// use webapp_bundler::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     electron_version: "22.3.0".into(),
///     ..Default::default()
/// };
/// assert_eq!(settings.packager, "nativefier");
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Packaging tool program name or path.
    pub packager: String,

    /// Application icon handed to `--icon`.
    pub icon: PathBuf,

    /// Script injected into every page via `--inject`.
    pub inject: PathBuf,

    /// Electron version pin.
    pub electron_version: String,

    /// Copyright string embedded in the app metadata.
    pub copyright: String,

    /// Mirror the packager downloads Electron binaries from.
    pub electron_mirror: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            packager: "nativefier".into(),
            icon: PathBuf::from("/assets/logo.ico"),
            inject: PathBuf::from("/inject/zoom.js"),
            electron_version: "19.1.4".into(),
            copyright: "xxx公司".into(),
            electron_mirror: DEFAULT_ELECTRON_MIRROR.into(),
        }
    }
}
