//! Terminal output for the command line layer.
//!
//! Status markers and headings are colored when the target stream supports
//! it; piped output and `NO_COLOR` get plain text.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
    pub const SUCCESS: &str = "✅";
    pub const WARNING: &str = "⚠️";
    pub const ERROR: &str = "❌";
    pub const ARROW: &str = "→";
}

/// Console printer with verbose and quiet switches.
///
/// Informational lines go to stdout; warnings and errors go to stderr and
/// are never silenced by `quiet`.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Detail line, shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout().lock(),
            "{}",
            message.if_supports_color(Stream::Stdout, |s| s.dimmed())
        )
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout().lock(),
            "{} {}",
            symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
            message
        )
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stdout().lock(),
            "{} {}",
            symbols::SUCCESS,
            message.if_supports_color(Stream::Stdout, |s| s.green())
        )
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "  {message}")
    }

    /// Blank line, title, underline.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let rule = "─".repeat(title.chars().count());
        let mut out = io::stdout().lock();
        writeln!(out)?;
        writeln!(out, "{}", title.if_supports_color(Stream::Stdout, |s| s.bold()))?;
        writeln!(out, "{}", rule.if_supports_color(Stream::Stdout, |s| s.dimmed()))
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{}  {}",
            symbols::WARNING,
            message.if_supports_color(Stream::Stderr, |s| s.yellow())
        )
    }

    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{} {}",
            symbols::ERROR,
            message.if_supports_color(Stream::Stderr, |s| s.red())
        )
    }
}
