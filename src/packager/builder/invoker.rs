//! External build invocation.
//!
//! Runs the toolchain's own build system as a black-box subprocess: start,
//! wait, check the exit code. The invoker knows nothing about what the
//! build produces; it only reports whether the build ran to completion.

use crate::packager::error::{Error, Result};
use std::path::PathBuf;

/// Outcome of one external build invocation.
///
/// Owned by the invoker and consumed once by the orchestrator to decide
/// whether the run proceeds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildResult {
    /// Whether the tool exited with status 0.
    pub succeeded: bool,

    /// Raw exit code (-1 when the process was terminated by a signal).
    pub exit_code: i32,
}

/// The resolved external build command.
#[derive(Clone, Debug)]
pub struct BuildCommand {
    /// Program to run (absolute path or bare name).
    pub program: PathBuf,

    /// Directory the build runs in (the toolchain root).
    pub build_dir: PathBuf,
}

impl BuildCommand {
    /// Creates a build command running `program` inside `build_dir`.
    pub fn new<P: Into<PathBuf>, D: Into<PathBuf>>(program: P, build_dir: D) -> Self {
        Self {
            program: program.into(),
            build_dir: build_dir.into(),
        }
    }
}

/// Runs the external build with the given parallelism.
///
/// The tool is always passed `-j<parallelism>` and `SKIP_SONAME=y`; the
/// latter suppresses soname-style versioned shared-library names so the
/// collector can rely on predictable output filenames. Output streams are
/// inherited, so build noise lands on the operator's terminal.
///
/// A non-zero exit is reported in the returned [`BuildResult`], not mapped
/// to an error here; aborting the run is the orchestrator's call.
pub async fn invoke(command: &BuildCommand, parallelism: usize) -> Result<BuildResult> {
    log::info!(
        "running {} -j{} SKIP_SONAME=y in {}",
        command.program.display(),
        parallelism,
        command.build_dir.display()
    );

    let status = tokio::process::Command::new(&command.program)
        .arg(format!("-j{}", parallelism))
        .arg("SKIP_SONAME=y")
        .current_dir(&command.build_dir)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: command.program.display().to_string(),
            error: e,
        })?;

    Ok(BuildResult {
        succeeded: status.success(),
        exit_code: status.code().unwrap_or(-1),
    })
}

/// Convenience wrapper turning a failed [`BuildResult`] into the fatal
/// [`Error::BuildFailed`] the orchestrator aborts with.
pub fn check(command: &BuildCommand, result: BuildResult) -> Result<()> {
    if result.succeeded {
        return Ok(());
    }
    Err(Error::BuildFailed {
        command: command.program.display().to_string(),
        exit_code: result.exit_code,
    })
}

/// Looks up a build program on `PATH`, erroring before any build is
/// attempted when the tool is absent.
pub fn find_build_program(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("found {} at {}", tool, path.display());
            Ok(path)
        }
        Err(e) => Err(Error::ToolNotFound {
            tool: tool.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Returns the build program name for a platform family.
///
/// The toolchain builds with GNU make everywhere; Windows hosts ship it as
/// `mingw32-make`.
pub fn build_tool_name(family: crate::packager::platform::Family) -> &'static str {
    if family == crate::packager::platform::Family::Windows {
        "mingw32-make"
    } else {
        "make"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::platform::Family;

    #[test]
    fn build_tool_is_mingw32_make_only_on_windows() {
        assert_eq!(build_tool_name(Family::Windows), "mingw32-make");
        for family in [Family::MacOs, Family::Linux, Family::FreeBsd, Family::Unknown] {
            assert_eq!(build_tool_name(family), "make");
        }
    }

    #[test]
    fn check_passes_success_through() {
        let command = BuildCommand::new("make", ".");
        let result = BuildResult {
            succeeded: true,
            exit_code: 0,
        };
        assert!(check(&command, result).is_ok());
    }

    #[test]
    fn check_maps_failure_to_build_failed() {
        let command = BuildCommand::new("make", ".");
        let result = BuildResult {
            succeeded: false,
            exit_code: 2,
        };
        let err = check(&command, result).unwrap_err();
        match err {
            Error::BuildFailed { exit_code, .. } => assert_eq!(exit_code, 2),
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn invoke_reports_the_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-make");
        std::fs::write(&script, "#!/bin/sh\nexit 2\n").unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let command = BuildCommand::new(&script, dir.path());
        let result = invoke(&command, 2).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.exit_code, 2);
    }

    #[tokio::test]
    async fn invoke_surfaces_spawn_failures() {
        let command = BuildCommand::new("definitely-not-a-real-build-tool", ".");
        let err = invoke(&command, 1).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
