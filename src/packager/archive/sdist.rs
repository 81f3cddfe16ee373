//! Source archive emission.
//!
//! The source package is installer-agnostic: a gzipped tar of the full
//! project tree, with no build step and no platform tag.

use crate::packager::builder::layout::PackageLayout;
use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::settings::PackageSettings;
use std::path::{Path, PathBuf};

/// Writes the source archive for an assembled source layout.
///
/// Each layout file is read from `source_root` and stored under
/// `<name>-<version>/<name>/` so the archive unpacks into a versioned
/// directory containing the package tree.
pub async fn write_sdist(
    layout: &PackageLayout,
    source_root: &Path,
    package: &PackageSettings,
    output_dir: &Path,
) -> Result<PathBuf> {
    let archive_name = format!("{}-{}.tar.gz", package.name, package.version);
    let archive_path = output_dir.join(&archive_name);
    let prefix = PathBuf::from(format!("{}-{}", package.name, package.version)).join(&package.name);

    tokio::fs::create_dir_all(output_dir)
        .await
        .fs_context("creating output directory", output_dir)?;

    let files: Vec<PathBuf> = layout.files().map(|(_, rel)| rel).collect();
    let source_root = source_root.to_path_buf();
    let path_for_task = archive_path.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::create(&path_for_task)
            .fs_context("creating source archive", &path_for_task)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for rel in &files {
            let source = source_root.join(rel);
            builder
                .append_path_with_name(&source, prefix.join(rel))
                .fs_context("archiving source file", &source)?;
        }

        builder
            .into_inner()
            .fs_context("finishing source archive", &path_for_task)?
            .finish()
            .fs_context("finishing source archive", &path_for_task)?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("source archive task panicked: {}", e)))??;

    log::info!("wrote {}", archive_path.display());
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::builder::layout::assemble;
    use crate::packager::platform::resolve;
    use crate::packager::settings::PackageMode;

    #[tokio::test]
    async fn archives_the_whole_tree_under_a_versioned_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("eC");
        std::fs::create_dir_all(tree.join("compiler")).unwrap();
        std::fs::write(tree.join("Makefile"), "all:\n").unwrap();
        std::fs::write(tree.join("compiler/pass1.ec"), "class Pass1 {}\n").unwrap();

        let desc = resolve("linux", "x86_64");
        let layout = assemble(PackageMode::Source, &desc, &tree).unwrap();
        let package = PackageSettings::default();

        let archive = write_sdist(&layout, &tree, &package, &dir.path().join("dist"))
            .await
            .unwrap();
        assert_eq!(
            archive.file_name().unwrap().to_str().unwrap(),
            "ecdev-0.0.1.tar.gz"
        );

        let file = std::fs::File::open(&archive).unwrap();
        let decoder = flate2::read::GzDecoder::new(file);
        let mut reader = tar::Archive::new(decoder);
        let names: Vec<String> = reader
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();

        assert!(names.contains(&"ecdev-0.0.1/ecdev/Makefile".to_string()));
        assert!(names.contains(&"ecdev-0.0.1/ecdev/compiler/pass1.ec".to_string()));
    }
}
