//! Command line argument parsing and build plan resolution.
//!
//! Parsing uses clap. The four plan flags (`--env`, `--arch`, `--format`,
//! `--platform`) are taken as raw strings and resolved leniently: invalid
//! values never abort the run, they fall back to defaults and produce a
//! [`ResolveWarning`].

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::bundler::settings::{
    ArchiveFormat, BitWidth, BuildPlan, DEFAULT_ELECTRON_MIRROR, Environment, PackageSettings,
    Platform,
};

/// Batch desktop-app packager
#[derive(Parser, Debug)]
#[command(
    name = "webapp_bundler",
    version,
    about = "Packages web apps with nativefier for every environment and architecture, then archives each build",
    long_about = "Runs nativefier once per (environment, architecture) pair, strictly one at a time,
and compresses every produced app directory into a single archive.

Usage:
  webapp_bundler
  webapp_bundler --env sit,uat --arch 64 --format tar.gz
  webapp_bundler --platform windows --format 7z

Invalid --env/--arch/--format/--platform values fall back to defaults with a warning.
Exit code 0 = every build succeeded; a failing build exits with the packager's code."
)]
pub struct Args {
    /// Environments to build, comma separated (prod, uat, sit). Default: all
    #[arg(long, value_name = "ENVS", num_args = 0..=1, default_missing_value = "")]
    pub env: Option<String>,

    /// Bit widths to build, comma separated (32, 64). Default: 32,64
    #[arg(
        long,
        value_name = "WIDTHS",
        num_args = 0..=1,
        default_missing_value = "",
        allow_negative_numbers = true
    )]
    pub arch: Option<String>,

    /// Archive format: zip, 7z, tar, tar.gz, tar.bz2, tar.xz. Default: zip
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "")]
    pub format: Option<String>,

    /// Target platform: windows, darwin, linux. Default: host platform
    #[arg(long, value_name = "PLATFORM", num_args = 0..=1, default_missing_value = "")]
    pub platform: Option<String>,

    /// Output root; builds land in <DIR>/<arch>/
    #[arg(
        long,
        value_name = "DIR",
        env = "WEBAPP_BUNDLER_OUTPUT_DIR",
        default_value = "apps"
    )]
    pub output_dir: PathBuf,

    /// Packaging tool to run
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "WEBAPP_BUNDLER_PACKAGER",
        default_value = "nativefier"
    )]
    pub packager: String,

    /// App icon passed to the packager
    #[arg(
        long,
        value_name = "PATH",
        env = "WEBAPP_BUNDLER_ICON",
        default_value = "/assets/logo.ico"
    )]
    pub icon: PathBuf,

    /// Script injected into the app
    #[arg(
        long,
        value_name = "PATH",
        env = "WEBAPP_BUNDLER_INJECT",
        default_value = "/inject/zoom.js"
    )]
    pub inject: PathBuf,

    /// Electron version pin
    #[arg(
        long,
        value_name = "VERSION",
        env = "WEBAPP_BUNDLER_ELECTRON_VERSION",
        default_value = "19.1.4"
    )]
    pub electron_version: String,

    /// Copyright string embedded in the app
    #[arg(
        long,
        value_name = "TEXT",
        env = "WEBAPP_BUNDLER_COPYRIGHT",
        default_value = "xxx公司"
    )]
    pub copyright: String,

    /// Mirror the packager downloads Electron from
    #[arg(
        long,
        value_name = "URL",
        env = "ELECTRON_MIRROR",
        default_value = DEFAULT_ELECTRON_MIRROR
    )]
    pub electron_mirror: String,

    /// Node.js version to switch to with nvm for the duration of the build
    #[arg(
        long,
        value_name = "VERSION",
        env = "WEBAPP_BUNDLER_NODE_VERSION",
        default_value = "16"
    )]
    pub node_version: String,

    /// Build with the active Node.js, without calling nvm
    #[arg(long, env = "WEBAPP_BUNDLER_SKIP_NODE_SWITCH")]
    pub skip_node_switch: bool,

    /// Print extra detail such as the packager settings
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors on the console
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve the plan flags against `host`.
    pub fn resolve(&self, host: Platform) -> Resolution {
        resolve_plan(
            self.env.as_deref(),
            self.arch.as_deref(),
            self.format.as_deref(),
            self.platform.as_deref(),
            host,
        )
    }

    /// Packager settings shared by every task.
    pub fn package_settings(&self) -> PackageSettings {
        PackageSettings {
            packager: self.packager.clone(),
            icon: self.icon.clone(),
            inject: self.inject.clone(),
            electron_version: self.electron_version.clone(),
            copyright: self.copyright.clone(),
            electron_mirror: self.electron_mirror.clone(),
        }
    }
}

/// A plan flag value that was replaced or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    UnknownEnvironment(String),
    NoValidEnvironment,
    InvalidWidth(String),
    NoValidWidth,
    UnsupportedFormat(String),
    UnsupportedPlatform { given: String, fallback: Platform },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::UnknownEnvironment(env) => {
                write!(f, "Unknown environment {env:?}, ignored")
            }
            ResolveWarning::NoValidEnvironment => {
                write!(f, "No valid environment given, building all: prod,uat,sit")
            }
            ResolveWarning::InvalidWidth(width) => {
                write!(f, "Invalid architecture {width:?}, ignored")
            }
            ResolveWarning::NoValidWidth => {
                write!(f, "Invalid architecture argument, using default: 32,64")
            }
            ResolveWarning::UnsupportedFormat(format) => {
                write!(f, "Unsupported archive format {format:?}, using default: zip")
            }
            ResolveWarning::UnsupportedPlatform { given, fallback } => {
                write!(f, "Unsupported platform {given:?}, using default: {fallback}")
            }
        }
    }
}

/// A resolved plan plus everything that was corrected on the way.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub plan: BuildPlan,
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve raw flag values into a [`BuildPlan`].
///
/// `None` means the flag was absent and yields the default silently. A
/// present but unusable value yields the default and a warning.
pub fn resolve_plan(
    env: Option<&str>,
    arch: Option<&str>,
    format: Option<&str>,
    platform: Option<&str>,
    host: Platform,
) -> Resolution {
    let mut warnings = Vec::new();
    let plan = BuildPlan {
        environments: resolve_environments(env, &mut warnings),
        widths: resolve_widths(arch, &mut warnings),
        format: resolve_format(format, &mut warnings),
        platform: resolve_platform(platform, host, &mut warnings),
    };
    Resolution { plan, warnings }
}

fn comma_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn resolve_environments(
    raw: Option<&str>,
    warnings: &mut Vec<ResolveWarning>,
) -> Vec<&'static Environment> {
    let Some(raw) = raw else {
        return Environment::all();
    };

    let mut selected: Vec<&'static Environment> = Vec::new();
    for id in comma_list(raw) {
        match Environment::lookup(id) {
            Some(env) if !selected.iter().any(|s| s.id == env.id) => selected.push(env),
            Some(_) => {}
            None => warnings.push(ResolveWarning::UnknownEnvironment(id.to_string())),
        }
    }

    if selected.is_empty() {
        warnings.push(ResolveWarning::NoValidEnvironment);
        return Environment::all();
    }
    selected
}

fn resolve_widths(raw: Option<&str>, warnings: &mut Vec<ResolveWarning>) -> Vec<BitWidth> {
    let Some(raw) = raw else {
        return BitWidth::ALL.to_vec();
    };

    let mut selected = Vec::new();
    for item in comma_list(raw) {
        match item.parse::<BitWidth>() {
            Ok(width) if !selected.contains(&width) => selected.push(width),
            Ok(_) => {}
            Err(_) => warnings.push(ResolveWarning::InvalidWidth(item.to_string())),
        }
    }

    if selected.is_empty() {
        warnings.push(ResolveWarning::NoValidWidth);
        return BitWidth::ALL.to_vec();
    }
    selected
}

fn resolve_format(raw: Option<&str>, warnings: &mut Vec<ResolveWarning>) -> ArchiveFormat {
    match raw {
        None => ArchiveFormat::default(),
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warnings.push(ResolveWarning::UnsupportedFormat(raw.to_string()));
            ArchiveFormat::default()
        }),
    }
}

fn resolve_platform(
    raw: Option<&str>,
    host: Platform,
    warnings: &mut Vec<ResolveWarning>,
) -> Platform {
    match raw {
        None => host,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warnings.push(ResolveWarning::UnsupportedPlatform {
                given: raw.to_string(),
                fallback: host,
            });
            host
        }),
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Whether console chatter is suppressed
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
