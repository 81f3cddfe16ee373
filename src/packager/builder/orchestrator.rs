//! Main packaging orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that runs the
//! packaging pipeline: platform resolution, external build invocation,
//! artifact collection, layout assembly, tag derivation, archive emission.

use super::collector::collect;
use super::invoker::{self, BuildCommand};
use super::layout::{PackageLayout, assemble};
use super::manifest::toolchain_manifest;
use crate::packager::archive;
use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::platform::{DistributionTag, PlatformDescriptor, distribution_tag};
use crate::packager::settings::{PackageMode, Settings};
use serde::Serialize;
use std::path::PathBuf;

/// One produced archive with its release metadata.
#[derive(Clone, Debug)]
pub struct PackagedArtifact {
    /// Path of the produced archive.
    pub path: PathBuf,

    /// Archive size in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 of the archive.
    pub checksum: String,
}

/// The resolved plan of a run, for `--dry-run` inspection.
#[derive(Debug, Serialize)]
pub struct PackagePlan {
    /// Packaging mode.
    pub mode: PackageMode,

    /// Resolved platform descriptor.
    pub platform: PlatformDescriptor,

    /// Distribution tag (absent in source mode, which is untagged).
    pub tag: Option<DistributionTag>,

    /// Assembled package layout.
    pub layout: PackageLayout,
}

/// Main packaging orchestrator.
///
/// Runs the pipeline strictly sequentially; each step's output feeds the
/// next and every failure aborts the whole run with a single diagnostic.
/// The platform descriptor is resolved once and threaded through as a
/// parameter, never stored globally.
///
/// # Examples
///
/// ```no_run
/// use ecdev_packager::packager::{Packager, PackageMode, SettingsBuilder};
///
/// # async fn example() -> ecdev_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .mode(PackageMode::Binary)
///     .toolchain_dir("eC")
///     .build()?;
///
/// let packager = Packager::new(settings);
/// if let Some(artifact) = packager.package().await? {
///     println!("created {} ({} bytes)", artifact.path.display(), artifact.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a new packager with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Executes the packaging run for the configured mode.
    ///
    /// Returns `Ok(None)` only on the degraded path: an unresolvable
    /// platform with `allow_unresolved_platform` set, where artifacts are
    /// collected but no archive can be tagged and emitted.
    pub async fn package(&self) -> Result<Option<PackagedArtifact>> {
        match self.settings.mode() {
            PackageMode::Binary => self.package_binary().await,
            PackageMode::Source => self.package_source().await.map(Some),
        }
    }

    /// Resolves the run without side effects: platform, layout, and tag,
    /// with no build, no collection, and no archive.
    pub fn plan(&self) -> Result<PackagePlan> {
        let descriptor = self.settings.platform();
        let mode = self.settings.mode();
        let root = match mode {
            PackageMode::Binary => self.staging_dir(&descriptor),
            PackageMode::Source => self.settings.toolchain_dir().to_path_buf(),
        };
        let layout = assemble(mode, &descriptor, &root)?;
        let tag = match mode {
            PackageMode::Binary => Some(distribution_tag(&descriptor)),
            PackageMode::Source => None,
        };
        Ok(PackagePlan {
            mode,
            platform: descriptor,
            tag,
            layout,
        })
    }

    async fn package_binary(&self) -> Result<Option<PackagedArtifact>> {
        let descriptor = self.settings.platform();
        log::info!(
            "packaging binary distribution for {:?}/{}",
            descriptor.family,
            descriptor.arch_name
        );

        // Build first: a failed build must prevent collection, assembly,
        // and tagging entirely.
        let command = self.build_command(&descriptor)?;
        let result = invoker::invoke(&command, self.settings.jobs()).await?;
        invoker::check(&command, result)?;

        let staging = self.staging_dir(&descriptor);
        let manifest = toolchain_manifest(self.settings.toolchain_dir(), &descriptor)?;
        collect(&manifest, &staging).await?;

        let layout = assemble(PackageMode::Binary, &descriptor, &staging)?;
        let tag = distribution_tag(&descriptor);

        if tag.platform_tag.is_none() {
            if !self.settings.allow_unresolved_platform() {
                return Err(Error::UnresolvedPlatform);
            }
            log::warn!(
                "platform unresolved; artifacts staged at {} but no archive emitted",
                staging.display()
            );
            return Ok(None);
        }

        let wheel = archive::write_wheel(
            &layout,
            &tag,
            self.settings.package_settings(),
            &staging,
            self.settings.output_dir(),
        )
        .await?;

        self.finish(wheel).await.map(Some)
    }

    async fn package_source(&self) -> Result<PackagedArtifact> {
        let descriptor = self.settings.platform();
        log::info!("packaging source distribution");

        let layout = assemble(
            PackageMode::Source,
            &descriptor,
            self.settings.toolchain_dir(),
        )?;
        let sdist = archive::write_sdist(
            &layout,
            self.settings.toolchain_dir(),
            self.settings.package_settings(),
            self.settings.output_dir(),
        )
        .await?;

        self.finish(sdist).await
    }

    /// Stamps a produced archive with its size and checksum.
    async fn finish(&self, path: PathBuf) -> Result<PackagedArtifact> {
        let metadata = tokio::fs::metadata(&path)
            .await
            .fs_context("reading archive metadata", &path)?;
        let checksum = super::checksum::calculate_sha256(&path).await?;

        Ok(PackagedArtifact {
            path,
            size: metadata.len(),
            checksum,
        })
    }

    /// Per-platform staging directory under the staging root.
    fn staging_dir(&self, descriptor: &PlatformDescriptor) -> PathBuf {
        self.settings
            .staging_root()
            .join(descriptor.family.obj_label())
    }

    /// Resolves the external build command: the injected override, or the
    /// family's make program looked up on `PATH`.
    fn build_command(&self, descriptor: &PlatformDescriptor) -> Result<BuildCommand> {
        let program = match self.settings.build_program_override() {
            Some(program) => program.to_path_buf(),
            None => invoker::find_build_program(invoker::build_tool_name(descriptor.family))?,
        };
        Ok(BuildCommand::new(
            program,
            self.settings.toolchain_dir().to_path_buf(),
        ))
    }
}
