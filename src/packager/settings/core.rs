//! Core Settings struct and implementations.

use super::{PackageMode, PackageSettings};
use crate::packager::platform::PlatformDescriptor;
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Central configuration for the orchestrator, constructed via
/// [`super::SettingsBuilder`]. Holds the mode, the directories the run
/// works in, and the test seams (platform and build-program overrides).
///
/// # Examples
///
/// ```no_run
/// use ecdev_packager::packager::{SettingsBuilder, PackageMode};
///
/// # fn example() -> ecdev_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .mode(PackageMode::Binary)
///     .toolchain_dir("eC")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Packaging mode for this run.
    mode: PackageMode,

    /// Root of the toolchain tree (the external build runs here).
    toolchain_dir: PathBuf,

    /// Root of the staging area; artifacts land under a per-platform
    /// subdirectory of it.
    staging_root: PathBuf,

    /// Directory produced archives are written into.
    output_dir: PathBuf,

    /// Build parallelism override.
    ///
    /// None means use the host CPU core count.
    jobs: Option<usize>,

    /// Whether a run may continue past an unresolvable platform.
    ///
    /// Degraded escape hatch for local, never-published builds.
    allow_unresolved_platform: bool,

    /// Synthetic platform descriptor, test seam.
    platform_override: Option<PlatformDescriptor>,

    /// External build program override, test seam.
    build_program_override: Option<PathBuf>,
}

impl Settings {
    /// Returns the package name.
    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the package metadata.
    pub fn package_settings(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the packaging mode.
    pub fn mode(&self) -> PackageMode {
        self.mode
    }

    /// Returns the toolchain root directory.
    pub fn toolchain_dir(&self) -> &Path {
        &self.toolchain_dir
    }

    /// Returns the staging root directory.
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Returns the archive output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the build parallelism: the explicit override, or the host
    /// CPU core count.
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get)
    }

    /// Whether the run may continue with an unresolved platform.
    pub fn allow_unresolved_platform(&self) -> bool {
        self.allow_unresolved_platform
    }

    /// Resolves the platform for this run: the synthetic override when one
    /// was injected, otherwise the running host.
    pub fn platform(&self) -> PlatformDescriptor {
        self.platform_override
            .clone()
            .unwrap_or_else(crate::packager::platform::host)
    }

    /// Returns the build program override, if one was injected.
    pub fn build_program_override(&self) -> Option<&Path> {
        self.build_program_override.as_deref()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        mode: PackageMode,
        toolchain_dir: PathBuf,
        staging_root: PathBuf,
        output_dir: PathBuf,
        jobs: Option<usize>,
        allow_unresolved_platform: bool,
        platform_override: Option<PlatformDescriptor>,
        build_program_override: Option<PathBuf>,
    ) -> Self {
        Self {
            package,
            mode,
            toolchain_dir,
            staging_root,
            output_dir,
            jobs,
            allow_unresolved_platform,
            platform_override,
            build_program_override,
        }
    }
}
