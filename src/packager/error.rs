//! Error types for packaging operations.
//!
//! Every failure in a packaging run is fatal: the run either succeeds or
//! aborts with a single clear diagnostic. Nothing here is retried.

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, building, collecting, or archiving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic error with a preformatted message (see [`crate::bail!`])
    #[error("{0}")]
    GenericError(String),

    /// IO errors without path context
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// IO errors annotated with the operation and path that failed
    #[error("error {context} ({path}): {source}")]
    FsError {
        /// What the packager was doing
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The external build command could not be spawned
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        error: io::Error,
    },

    /// The external build command ran and exited non-zero
    #[error("build command `{command}` failed with exit code {exit_code}")]
    BuildFailed {
        /// Command that was invoked
        command: String,
        /// Exit code reported by the tool (-1 if terminated by signal)
        exit_code: i32,
    },

    /// A manifest source path was absent after a nominally successful build
    #[error("missing build artifact: {path} (build/manifest mismatch)")]
    MissingArtifact {
        /// The absent source path
        path: PathBuf,
    },

    /// The host platform did not resolve to a known family
    #[error(
        "platform could not be resolved to a distribution tag; \
         refusing to emit an archive (pass --allow-unresolved-platform to override)"
    )]
    UnresolvedPlatform,

    /// The external build tool is not installed
    #[error("build tool `{tool}` not found: {reason}")]
    ToolNotFound {
        /// Program name that was looked up
        tool: String,
        /// Lookup failure detail
        reason: String,
    },

    /// A declared layout or manifest repeats a destination path
    #[error("duplicate destination path in {table}: {path}")]
    DuplicateDestination {
        /// Which declaration table repeated the path
        table: String,
        /// The repeated relative path
        path: PathBuf,
    },
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::packager::Error::GenericError($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

/// Extension trait attaching operation/path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::FsError`] with the given context.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::FsError {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait turning absent options into errors.
pub trait Context<T> {
    /// Converts `None` into a [`Error::GenericError`] with the given message.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}
