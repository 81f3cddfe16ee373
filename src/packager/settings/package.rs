//! Package metadata and configuration.

/// Package metadata embedded in produced archives.
///
/// # Examples
///
/// ```no_run
/// use ecdev_packager::packager::PackageSettings;
///
/// let settings = PackageSettings {
///     name: "ecdev".into(),
///     version: "0.0.1".into(),
///     description: "eC SDK development toolchain".into(),
///     long_description: None,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Distribution name; also the package directory inside archives.
    pub name: String,

    /// Version string.
    pub version: String,

    /// Brief description, used as the metadata summary.
    pub description: String,

    /// Long description (typically the project README).
    ///
    /// Default: None
    pub long_description: Option<String>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            name: "ecdev".to_string(),
            version: "0.0.1".to_string(),
            description: "eC SDK development toolchain".to_string(),
            long_description: None,
        }
    }
}
