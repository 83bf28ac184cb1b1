//! Archive formats the dispatcher can produce.

use std::fmt;
use std::str::FromStr;

/// Requested archive format. The textual form doubles as file extension.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArchiveFormat {
    #[default]
    Zip,
    SevenZ,
    Tar,
    TarGz,
    TarBz2,
    TarXz,
}

impl ArchiveFormat {
    /// All supported formats.
    pub const ALL: [ArchiveFormat; 6] = [
        ArchiveFormat::Zip,
        ArchiveFormat::SevenZ,
        ArchiveFormat::Tar,
        ArchiveFormat::TarGz,
        ArchiveFormat::TarBz2,
        ArchiveFormat::TarXz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::SevenZ => "7z",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarBz2 => "tar.bz2",
            ArchiveFormat::TarXz => "tar.xz",
        }
    }

    /// File extension appended to archive names.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Whether the format is produced by `tar`.
    pub fn is_tar(self) -> bool {
        matches!(
            self,
            ArchiveFormat::Tar | ArchiveFormat::TarGz | ArchiveFormat::TarBz2 | ArchiveFormat::TarXz
        )
    }

    /// `tar` compression flag, `None` for plain tar and non-tar formats.
    pub fn tar_compression_flag(self) -> Option<&'static str> {
        match self {
            ArchiveFormat::TarGz => Some("-z"),
            ArchiveFormat::TarBz2 => Some("-j"),
            ArchiveFormat::TarXz => Some("-J"),
            _ => None,
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArchiveFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("unsupported archive format: {s}"))
    }
}
