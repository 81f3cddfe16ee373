//! Colored terminal output for packaging runs.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Manager for user-facing terminal output.
///
/// Log-level diagnostics go through the `log` crate; this type covers the
/// progress lines an operator watches during a packaging run.
#[derive(Clone, Debug)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

#[allow(dead_code)] // Public API - not every helper is used by the CLI itself
impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        writeln!(stdout, "{}", message)
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.info(message)
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Cyan, "→", message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Green, "✓", message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Yellow, "⚠", message)
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stderr, "✗ ")?;
        stderr.reset()?;
        writeln!(stderr, "{}", message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "\n{}", title)?;
        stdout.reset()?;
        writeln!(stdout, "{}", "─".repeat(title.chars().count()))
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        writeln!(stdout, "  {}", message)
    }

    fn colored(&self, color: Color, prefix: &str, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stdout, "{} ", prefix)?;
        stdout.reset()?;
        writeln!(stdout, "{}", message)
    }
}
