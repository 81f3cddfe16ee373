//! Builder for constructing Settings.

use super::{PackageMode, PackageSettings, Settings};
use crate::packager::platform::PlatformDescriptor;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API with validation of required fields.
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
///     .staging_root("artifacts")
///     .output_dir("dist")
///     .jobs(8)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    mode: Option<PackageMode>,
    toolchain_dir: Option<PathBuf>,
    staging_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    jobs: Option<usize>,
    allow_unresolved_platform: bool,
    platform_override: Option<PlatformDescriptor>,
    build_program_override: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package metadata.
    ///
    /// Default: the eC SDK defaults ([`PackageSettings::default`])
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the packaging mode.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn mode(mut self, mode: PackageMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the toolchain root directory (where the external build runs).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn toolchain_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.toolchain_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging root directory.
    ///
    /// Default: `artifacts`
    pub fn staging_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the archive output directory.
    ///
    /// Default: `dist`
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the build parallelism.
    ///
    /// Default: host CPU core count
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Allows the run to continue when the platform cannot be resolved.
    ///
    /// Default: false (an unresolved platform aborts the run)
    pub fn allow_unresolved_platform(mut self, allow: bool) -> Self {
        self.allow_unresolved_platform = allow;
        self
    }

    /// Injects a synthetic platform descriptor instead of resolving the
    /// running host. Test seam; also usable for layout inspection.
    pub fn platform_override(mut self, descriptor: PlatformDescriptor) -> Self {
        self.platform_override = Some(descriptor);
        self
    }

    /// Replaces the detected build program with an explicit one. Test seam.
    pub fn build_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.build_program_override = Some(program.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `mode`
    /// - `toolchain_dir`
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        Ok(Settings::new(
            self.package_settings.unwrap_or_default(),
            self.mode.context("mode is required")?,
            self.toolchain_dir.context("toolchain_dir is required")?,
            self.staging_root.unwrap_or_else(|| PathBuf::from("artifacts")),
            self.output_dir.unwrap_or_else(|| PathBuf::from("dist")),
            self.jobs,
            self.allow_unresolved_platform,
            self.platform_override,
            self.build_program_override,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_staging_and_output_directories() {
        let settings = SettingsBuilder::new()
            .mode(PackageMode::Binary)
            .toolchain_dir("eC")
            .build()
            .unwrap();
        assert_eq!(settings.staging_root(), Path::new("artifacts"));
        assert_eq!(settings.output_dir(), Path::new("dist"));
        assert!(!settings.allow_unresolved_platform());
    }

    #[test]
    fn mode_is_required() {
        let err = SettingsBuilder::new().toolchain_dir("eC").build().unwrap_err();
        assert!(err.to_string().contains("mode is required"));
    }

    #[test]
    fn toolchain_dir_is_required() {
        let err = SettingsBuilder::new()
            .mode(PackageMode::Source)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("toolchain_dir is required"));
    }
}
