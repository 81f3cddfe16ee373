//! Package build orchestrator for the eC SDK native toolchain.
//!
//! This library drives the sequence installers depend on:
//! - resolve the host platform's naming conventions
//! - invoke the toolchain's external build
//! - collect the built artifacts into a canonical staging tree
//! - derive the distribution tag and emit a platform-tagged archive
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
