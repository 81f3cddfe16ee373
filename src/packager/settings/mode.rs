//! Packaging mode selection.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What kind of distribution the run produces.
///
/// Binary mode builds the toolchain and packages its artifacts with a
/// platform-specific tag; source mode packages the project tree verbatim
/// with no build and no platform specificity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageMode {
    /// Platform-tagged package of pre-built toolchain artifacts.
    Binary,
    /// Installer-agnostic source archive of the full project tree.
    Source,
}

impl PackageMode {
    /// All modes accepted on the command line.
    pub fn all() -> &'static [&'static str] {
        &["binary", "source"]
    }
}

impl FromStr for PackageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(PackageMode::Binary),
            "source" => Ok(PackageMode::Source),
            other => Err(format!(
                "Invalid mode: {}. Valid modes: {}",
                other,
                PackageMode::all().join(", ")
            )),
        }
    }
}

impl fmt::Display for PackageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageMode::Binary => write!(f, "binary"),
            PackageMode::Source => write!(f, "source"),
        }
    }
}
