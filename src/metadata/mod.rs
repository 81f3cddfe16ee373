//! Distribution metadata for the packaged SDK.

use crate::error::{CliError, PackagerError, Result};
use crate::packager::PackageSettings;
use std::path::Path;

/// Distribution name; also the package directory inside archives.
const PKG_NAME: &str = "ecdev";

/// Distribution version.
const PKG_VERSION: &str = "0.0.1";

/// One-line summary embedded in archive metadata.
const PKG_DESCRIPTION: &str = "eC SDK development toolchain";

/// Loads the package settings for a packaging run.
///
/// Name, version, and summary are fixed for this distribution; the long
/// description is read from the project's `README.md`, which archive
/// metadata embeds verbatim.
///
/// # Errors
///
/// Fails when the README cannot be read, since the metadata file the
/// archive carries embeds it.
pub fn load_package_settings(project_root: &Path) -> Result<PackageSettings> {
    let readme_path = project_root.join("README.md");
    let long_description = std::fs::read_to_string(&readme_path).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_readme".to_string(),
            reason: format!("Failed to read {}: {}", readme_path.display(), e),
        })
    })?;

    Ok(PackageSettings {
        name: PKG_NAME.to_string(),
        version: PKG_VERSION.to_string(),
        description: PKG_DESCRIPTION.to_string(),
        long_description: Some(long_description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_readme_as_long_description() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# The eC SDK\n").unwrap();

        let settings = load_package_settings(dir.path()).unwrap();
        assert_eq!(settings.name, "ecdev");
        assert_eq!(settings.version, "0.0.1");
        assert_eq!(settings.long_description.as_deref(), Some("# The eC SDK\n"));
    }

    #[test]
    fn missing_readme_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_package_settings(dir.path()).unwrap_err();
        assert!(err.to_string().contains("README.md"));
    }
}
