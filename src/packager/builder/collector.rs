//! Artifact collection into the staging tree.
//!
//! Copies every manifest entry verbatim into the staging root, creating
//! parent directories as needed. A missing source is a fatal build/manifest
//! mismatch: a partially-built toolchain must never produce a silently
//! incomplete package.

use super::manifest::ArtifactManifest;
use crate::packager::error::{Error, Result};
use crate::packager::utils::fs::copy_file;
use std::path::Path;

/// Copies all manifest entries into `staging_root`.
///
/// Entries are independent and copied in declaration order; re-running over
/// an already-populated staging tree simply overwrites, so the operation is
/// idempotent.
///
/// # Errors
///
/// [`Error::MissingArtifact`] if any source path does not exist; the run
/// aborts without reporting success for any scheduled destination. Other
/// filesystem errors (permissions, disk full) propagate as fatal.
pub async fn collect(manifest: &ArtifactManifest, staging_root: &Path) -> Result<()> {
    for entry in manifest.entries() {
        if !entry.source.exists() {
            return Err(Error::MissingArtifact {
                path: entry.source.clone(),
            });
        }

        let destination = staging_root.join(&entry.destination);
        log::debug!(
            "collecting {} -> {}",
            entry.source.display(),
            destination.display()
        );
        copy_file(&entry.source, &destination).await?;
    }

    log::info!(
        "collected {} artifacts into {}",
        manifest.len(),
        staging_root.display()
    );
    Ok(())
}
