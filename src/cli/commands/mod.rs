//! Command execution for packaging runs.

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::packager::{PackageMode, Packager, SettingsBuilder};

/// Runs the packaging pipeline described by the parsed arguments.
///
/// Returns the process exit code; any error propagates to `main`, which
/// prints the diagnostic and exits 1.
pub async fn package(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    // validate() ran before this point.
    let mode: PackageMode = args
        .mode
        .parse()
        .map_err(|reason| crate::error::CliError::InvalidArguments { reason })?;

    let mut builder = SettingsBuilder::new()
        .mode(mode)
        .toolchain_dir(&args.toolchain)
        .staging_root(&args.staging)
        .output_dir(&args.output_dir)
        .allow_unresolved_platform(args.allow_unresolved_platform);

    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs);
    }

    if !args.dry_run {
        builder = builder.package_settings(crate::metadata::load_package_settings(
            &args.project_root,
        )?);
    }

    let packager = Packager::new(builder.build()?);

    if args.dry_run {
        let plan = packager.plan()?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(0);
    }

    config.section(&format!("Packaging {} distribution", mode))?;
    config.progress(&format!(
        "toolchain: {}",
        packager.settings().toolchain_dir().display()
    ))?;

    match packager.package().await? {
        Some(artifact) => {
            config.success(&format!("created {}", artifact.path.display()))?;
            config.indent(&format!("size:   {} bytes", artifact.size))?;
            config.indent(&format!("sha256: {}", artifact.checksum))?;
        }
        None => {
            config.warn(
                "platform unresolved: artifacts staged, no archive emitted \
                 (this package must not be published)",
            )?;
        }
    }

    Ok(0)
}
