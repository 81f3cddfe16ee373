//! Packaging pipeline orchestration.
//!
//! # Overview
//!
//! The orchestrator:
//! 1. Resolves the host platform into a descriptor
//! 2. Invokes the external toolchain build
//! 3. Collects the declared artifact manifest into the staging tree
//! 4. Assembles the package layout for the configured mode
//! 5. Derives the distribution tag and emits the archive
//!
//! # Module Organization
//!
//! - [`manifest`] - The declared (source, destination) artifact table
//! - [`invoker`] - External build invocation and tool lookup
//! - [`collector`] - Manifest collection into the staging tree
//! - [`layout`] - Package layout assembly and dynamic-library placement
//! - [`checksum`] - SHA256 checksum calculation for produced archives
//! - [`orchestrator`] - Main [`Packager`] struct and pipeline

pub mod collector;
pub mod invoker;
pub mod layout;
pub mod manifest;

mod checksum;
mod orchestrator;

pub use checksum::calculate_sha256;
pub use orchestrator::{PackagePlan, PackagedArtifact, Packager};
