//! Wheel archive emission for binary packages.
//!
//! A wheel is a zip archive whose name carries the distribution tag:
//! `<name>-<version>-<runtime>-<abi>-<platform>.whl`. The payload lands
//! under the package directory; a `.dist-info/` tree carries `METADATA`,
//! `WHEEL`, and a `RECORD` listing every archived file with its digest.

use crate::packager::builder::layout::{LayoutGroup, PackageLayout};
use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::platform::DistributionTag;
use crate::packager::settings::PackageSettings;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the wheel archive for an assembled binary layout.
///
/// Files are read from `staging_root` (where the collector placed them) and
/// stored under `<package name>/` inside the archive. Entries are written
/// in sorted order so identical inputs produce identical archives.
///
/// # Errors
///
/// Refuses to emit anything from a tag whose platform part is unresolved
/// ([`Error::UnresolvedPlatform`]); filesystem and zip errors are fatal.
pub async fn write_wheel(
    layout: &PackageLayout,
    tag: &DistributionTag,
    package: &PackageSettings,
    staging_root: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let wheel_tag = tag.wheel_tag()?;
    let wheel_name = format!("{}-{}-{}.whl", package.name, package.version, wheel_tag);
    let wheel_path = output_dir.join(&wheel_name);

    tokio::fs::create_dir_all(output_dir)
        .await
        .fs_context("creating output directory", output_dir)?;

    // (archive path, source path, executable) triples, sorted for
    // deterministic output.
    let mut entries: Vec<(String, PathBuf, bool)> = layout
        .files()
        .map(|(group, rel)| {
            (
                format!("{}/{}", package.name, zip_path(&rel)),
                staging_root.join(&rel),
                group == LayoutGroup::Binary,
            )
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let dist_info = format!("{}-{}.dist-info", package.name, package.version);
    let metadata_text = render_metadata(package);
    let wheel_text = render_wheel_file(&wheel_tag);

    let path_for_task = wheel_path.clone();
    tokio::task::spawn_blocking(move || {
        write_archive(&path_for_task, &entries, &dist_info, &metadata_text, &wheel_text)
    })
    .await
    .map_err(|e| Error::GenericError(format!("wheel write task panicked: {}", e)))??;

    log::info!("wrote {}", wheel_path.display());
    Ok(wheel_path)
}

fn write_archive(
    wheel_path: &Path,
    entries: &[(String, PathBuf, bool)],
    dist_info: &str,
    metadata_text: &str,
    wheel_text: &str,
) -> Result<()> {
    use zip::CompressionMethod;
    use zip::write::SimpleFileOptions;

    let file = std::fs::File::create(wheel_path).fs_context("creating wheel", wheel_path)?;
    let mut writer = zip::ZipWriter::new(file);

    let mut record: Vec<String> = Vec::new();

    for (archive_path, source, executable) in entries {
        let data = std::fs::read(source).fs_context("reading staged artifact", source)?;
        let mode = if *executable { 0o755 } else { 0o644 };
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(mode);

        writer
            .start_file(archive_path.as_str(), options)
            .map_err(zip_error)?;
        writer.write_all(&data).fs_context("writing wheel entry", wheel_path)?;
        record.push(record_line(archive_path, &data));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, text) in [("METADATA", metadata_text), ("WHEEL", wheel_text)] {
        let archive_path = format!("{}/{}", dist_info, name);
        writer
            .start_file(archive_path.as_str(), options)
            .map_err(zip_error)?;
        writer
            .write_all(text.as_bytes())
            .fs_context("writing wheel entry", wheel_path)?;
        record.push(record_line(&archive_path, text.as_bytes()));
    }

    // RECORD lists itself last, with no digest.
    record.push(format!("{}/RECORD,,", dist_info));
    let record_text = record.join("\n") + "\n";
    writer
        .start_file(format!("{}/RECORD", dist_info), options)
        .map_err(zip_error)?;
    writer
        .write_all(record_text.as_bytes())
        .fs_context("writing wheel entry", wheel_path)?;

    writer.finish().map_err(zip_error)?;
    Ok(())
}

fn record_line(archive_path: &str, data: &[u8]) -> String {
    let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(data));
    format!("{},sha256={},{}", archive_path, digest, data.len())
}

fn render_metadata(package: &PackageSettings) -> String {
    let mut text = format!(
        "Metadata-Version: 2.1\nName: {}\nVersion: {}\nSummary: {}\n",
        package.name, package.version, package.description
    );
    if let Some(long) = &package.long_description {
        text.push_str("Description-Content-Type: text/markdown\n\n");
        text.push_str(long);
    }
    text
}

fn render_wheel_file(wheel_tag: &str) -> String {
    format!(
        "Wheel-Version: 1.0\nGenerator: ecdev_packager {}\nRoot-Is-Purelib: false\nTag: {}\n",
        env!("CARGO_PKG_VERSION"),
        wheel_tag
    )
}

/// Renders a relative path with forward slashes for archive entry names.
fn zip_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::GenericError(format!("zip error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::builder::layout::assemble;
    use crate::packager::platform::{distribution_tag, resolve};
    use crate::packager::settings::PackageMode;

    fn stage_linux_artifacts(staging: &Path) {
        for rel in [
            "crossplatform.mk",
            "default.cf",
            "lib/libecrtStatic.a",
            "lib/libecrt.so",
            "lib/libectp.so",
            "bin/ecp",
            "bin/ecc",
            "bin/ecs",
            "bin/ear",
            "include/cffi-ecrt.h",
        ] {
            let path = staging.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, rel).unwrap();
        }
    }

    #[tokio::test]
    async fn wheel_is_named_from_the_distribution_tag() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("staging");
        stage_linux_artifacts(&staging);

        let desc = resolve("linux-gnu", "x86_64");
        let layout = assemble(PackageMode::Binary, &desc, &staging).unwrap();
        let tag = distribution_tag(&desc);
        let package = PackageSettings::default();

        let wheel = write_wheel(&layout, &tag, &package, &staging, &dir.path().join("dist"))
            .await
            .unwrap();

        assert_eq!(
            wheel.file_name().unwrap().to_str().unwrap(),
            "ecdev-0.0.1-py3-none-manylinux1_x86_64.whl"
        );
        assert!(wheel.exists());
    }

    #[tokio::test]
    async fn record_lists_every_archived_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("staging");
        stage_linux_artifacts(&staging);

        let desc = resolve("linux-gnu", "x86_64");
        let layout = assemble(PackageMode::Binary, &desc, &staging).unwrap();
        let tag = distribution_tag(&desc);
        let package = PackageSettings::default();

        let wheel = write_wheel(&layout, &tag, &package, &staging, &dir.path().join("dist"))
            .await
            .unwrap();

        let file = std::fs::File::open(&wheel).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut record_text = String::new();
        {
            use std::io::Read;
            let mut record = archive
                .by_name("ecdev-0.0.1.dist-info/RECORD")
                .unwrap();
            record.read_to_string(&mut record_text).unwrap();
        }

        // 10 payload files + METADATA + WHEEL + RECORD itself.
        let lines: Vec<_> = record_text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.starts_with("ecdev/bin/ecc,"))
                .count(),
            1
        );
        assert!(lines.last().unwrap().ends_with("RECORD,,"));

        // Payload paths sit under the package directory.
        assert!(archive.by_name("ecdev/lib/libecrt.so").is_ok());
        assert!(archive.by_name("ecdev/crossplatform.mk").is_ok());
    }

    #[tokio::test]
    async fn refuses_an_unresolved_platform_tag() {
        let dir = tempfile::tempdir().unwrap();
        let desc = resolve("plan9", "unknownarch");
        let layout = assemble(PackageMode::Binary, &desc, dir.path()).unwrap();
        let tag = distribution_tag(&desc);

        let err = write_wheel(
            &layout,
            &tag,
            &PackageSettings::default(),
            dir.path(),
            &dir.path().join("dist"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvedPlatform));
    }
}
