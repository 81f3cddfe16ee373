//! Core packaging pipeline.
//!
//! Resolves the host platform, drives the external toolchain build,
//! collects its artifacts into a canonical staging tree, and emits a
//! platform-tagged archive that installers can select by tag.

pub mod archive;
pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{PackagePlan, PackagedArtifact, Packager};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::{DistributionTag, Family, PlatformDescriptor};
pub use settings::{PackageMode, PackageSettings, Settings, SettingsBuilder};
