//! Compression backends and the per-format priority lists.

use std::ffi::OsString;
use std::path::Path;

use crate::bundler::settings::{ArchiveFormat, Platform};

/// External compression program that must be probed before use.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tool {
    Zip,
    SevenZip,
    Tar,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Tool::Zip => "zip",
            Tool::SevenZip => "7z",
            Tool::Tar => "tar",
        }
    }

    /// Arguments of the tool's version query, used as the availability probe.
    pub fn version_args(self) -> &'static [&'static str] {
        match self {
            Tool::Zip => &["-v"],
            Tool::SevenZip => &["i"],
            Tool::Tar => &["--version"],
        }
    }
}

/// A concrete way of producing an archive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    /// PowerShell `Compress-Archive`. Windows hosts only; never probed.
    PowerShell,
    /// `zip -r`
    Zip,
    /// `7z a -t7z`
    SevenZip,
    /// `7z a -tzip`
    SevenZipAsZip,
    /// `tar -c -f` with an optional compression flag.
    Tar(ArchiveFormat),
}

impl Backend {
    /// Tool that must pass its probe, `None` when the backend is assumed present.
    pub fn required_tool(self) -> Option<Tool> {
        match self {
            Backend::PowerShell => None,
            Backend::Zip => Some(Tool::Zip),
            Backend::SevenZip | Backend::SevenZipAsZip => Some(Tool::SevenZip),
            Backend::Tar(_) => Some(Tool::Tar),
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Backend::PowerShell => "powershell",
            Backend::Zip => "zip",
            Backend::SevenZip | Backend::SevenZipAsZip => "7z",
            Backend::Tar(_) => "tar",
        }
    }

    /// Container format the backend actually writes.
    pub fn produces(self) -> ArchiveFormat {
        match self {
            Backend::PowerShell | Backend::Zip | Backend::SevenZipAsZip => ArchiveFormat::Zip,
            Backend::SevenZip => ArchiveFormat::SevenZ,
            Backend::Tar(format) => format,
        }
    }

    /// Arguments that archive `source` into `output`.
    pub fn args(self, source: &Path, output: &Path) -> Vec<OsString> {
        let source = source.as_os_str().to_owned();
        let output = output.as_os_str().to_owned();

        match self {
            Backend::PowerShell => vec![
                "-NoProfile".into(),
                "-NonInteractive".into(),
                "-Command".into(),
                powershell_script(&source, &output).into(),
            ],
            Backend::Zip => vec!["-r".into(), output, source],
            Backend::SevenZip => vec!["a".into(), "-t7z".into(), output, source],
            Backend::SevenZipAsZip => vec!["a".into(), "-tzip".into(), output, source],
            Backend::Tar(format) => {
                let mut args: Vec<OsString> = vec!["-c".into(), "-f".into(), output];
                // keep previously produced archives out of the new one
                for pattern in ["*.tar*", "*.zip", "*.7z"] {
                    args.push("--exclude".into());
                    args.push(pattern.into());
                }
                if let Some(flag) = format.tar_compression_flag() {
                    args.push(flag.into());
                }
                args.push(source);
                args
            }
        }
    }
}

/// `Compress-Archive` wrapped in try/catch so any failure exits 1.
fn powershell_script(source: &std::ffi::OsStr, output: &std::ffi::OsStr) -> String {
    format!(
        "try {{ Compress-Archive -Path '{}' -DestinationPath '{}' -Force -ErrorAction Stop; exit 0 }} \
         catch {{ Write-Host \"zip failed: $($_.Exception.Message)\"; exit 1 }}",
        quote_single(source),
        quote_single(output)
    )
}

/// Escape for a PowerShell single-quoted string.
fn quote_single(value: &std::ffi::OsStr) -> String {
    value.to_string_lossy().replace('\'', "''")
}

/// Ordered candidates for `format` on `host`; the first available one wins.
pub fn candidates(format: ArchiveFormat, host: Platform) -> Vec<Backend> {
    let mut list = match format {
        ArchiveFormat::SevenZ => vec![Backend::SevenZip],
        format if format.is_tar() => vec![Backend::Tar(format)],
        _ => Vec::new(),
    };
    list.extend(zip_policy(host));
    list
}

/// Zip candidates, also the fallback for every other format.
pub fn zip_policy(host: Platform) -> Vec<Backend> {
    if host.is_windows() {
        vec![Backend::PowerShell]
    } else {
        vec![Backend::Zip, Backend::SevenZipAsZip]
    }
}

/// Walk the candidates for `format`, probing each required tool in order.
pub async fn select<F, Fut>(format: ArchiveFormat, host: Platform, mut available: F) -> Option<Backend>
where
    F: FnMut(Tool) -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for backend in candidates(format, host) {
        let Some(tool) = backend.required_tool() else {
            return Some(backend);
        };
        if available(tool).await {
            return Some(backend);
        }
        log::warn!(
            "⚠️  {} is not available, trying the next option",
            tool.program()
        );
    }
    None
}
