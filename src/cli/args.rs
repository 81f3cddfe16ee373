//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Platform-tagged package builder for the eC SDK toolchain
#[derive(Parser, Debug)]
#[command(
    name = "ecdev_packager",
    version,
    about = "Platform-tagged package builder for the eC SDK toolchain",
    long_about = "Builds the eC native toolchain with its own build system, collects the \
resulting binaries, libraries and headers into a canonical staging tree, and packages them \
into a platform-tagged archive installers can select for the running host.

Usage:
  ecdev_packager --mode binary
  ecdev_packager --mode binary --toolchain eC --output-dir dist --jobs 8
  ecdev_packager --mode source
  ecdev_packager --mode binary --dry-run

Exit code 0 = the requested archive exists in the output directory."
)]
pub struct Args {
    /// Packaging mode: binary (platform-tagged build artifacts) or source
    /// (installer-agnostic project tree)
    #[arg(short, long, value_name = "MODE")]
    pub mode: String,

    /// Toolchain root directory; the external build runs here
    #[arg(short, long, value_name = "DIR", default_value = "eC")]
    pub toolchain: PathBuf,

    /// Staging root; artifacts land under a per-platform subdirectory
    #[arg(long, value_name = "DIR", default_value = "artifacts")]
    pub staging: PathBuf,

    /// Directory produced archives are written into
    #[arg(short = 'o', long, value_name = "DIR", default_value = "dist")]
    pub output_dir: PathBuf,

    /// Build parallelism (defaults to the host CPU core count)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Project root containing README.md
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Continue without emitting an archive when the host platform cannot
    /// be resolved to a distribution tag (local builds only)
    #[arg(long)]
    pub allow_unresolved_platform: bool,

    /// Resolve platform, layout and tag, print the plan as JSON, and exit
    /// without building or writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        use crate::packager::PackageMode;

        self.mode.parse::<PackageMode>()?;

        if self.jobs == Some(0) {
            return Err("Build parallelism must be at least 1".to_string());
        }

        Ok(())
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
        // Machine-readable plan output suppresses progress chatter.
        let output = super::OutputManager::new(true, args.dry_run);

        Self { output }
    }
}

#[allow(dead_code)] // Public API - preserved for external consumers
impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
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
