//! CPU architecture types and the bit-width lookup table.

use std::fmt;
use std::str::FromStr;

/// Concrete CPU architecture as understood by the packaging tool.
///
/// The textual form (`ia32`, `x64`, `arm64`) is passed verbatim to the
/// packager's `--arch` flag and names the per-architecture output directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// 32-bit x86
    Ia32,
    /// x86_64 / AMD64
    X64,
    /// AArch64 / ARM64
    Arm64,
}

impl Arch {
    /// Identifier used on the packager command line and in output paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Ia32 => "ia32",
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse architecture selector given on the command line (`32` or `64`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BitWidth {
    /// `32`
    Bits32,
    /// `64`
    Bits64,
}

impl BitWidth {
    /// Default selection when `--arch` is absent or yields nothing valid.
    pub const ALL: [BitWidth; 2] = [BitWidth::Bits32, BitWidth::Bits64];

    /// Concrete architectures built for this width, in build order.
    pub fn arches(self) -> &'static [Arch] {
        match self {
            BitWidth::Bits32 => &[Arch::Ia32],
            BitWidth::Bits64 => &[Arch::X64, Arch::Arm64],
        }
    }

    /// Numeric form (`32` or `64`).
    pub fn bits(self) -> u32 {
        match self {
            BitWidth::Bits32 => 32,
            BitWidth::Bits64 => 64,
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for BitWidth {
    type Err = String;

    /// Accepts a plain unsigned integer equal to 32 or 64.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(32) => Ok(BitWidth::Bits32),
            Ok(64) => Ok(BitWidth::Bits64),
            Ok(other) => Err(format!("unsupported bit width: {other}")),
            Err(_) => Err(format!("not a number: {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_map_to_concrete_arches() {
        assert_eq!(BitWidth::Bits32.arches(), &[Arch::Ia32]);
        assert_eq!(BitWidth::Bits64.arches(), &[Arch::X64, Arch::Arm64]);
    }

    #[test]
    fn parses_only_known_widths() {
        assert_eq!(" 64 ".parse::<BitWidth>(), Ok(BitWidth::Bits64));
        assert_eq!("32".parse::<BitWidth>(), Ok(BitWidth::Bits32));
        assert!("16".parse::<BitWidth>().is_err());
        assert!("64bit".parse::<BitWidth>().is_err());
        assert!("".parse::<BitWidth>().is_err());
        assert!("-32".parse::<BitWidth>().is_err());
    }
}
