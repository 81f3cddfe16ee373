//! Distribution tag derivation.
//!
//! Installers pick a package variant by its three-part compatibility tag:
//! runtime compatibility, ABI, and platform. The native artifacts in these
//! packages are invoked as external processes and libraries rather than
//! loaded as runtime extension modules, so the first two parts are fixed;
//! only the platform part varies with the host.

use super::descriptor::{Family, PlatformDescriptor};
use crate::packager::error::{Error, Result};
use serde::Serialize;

/// Runtime compatibility token: any runtime major version 3 or later.
const RUNTIME_COMPAT: &str = "py3";

/// ABI token: the artifacts carry no runtime ABI constraint.
const ABI_NONE: &str = "none";

/// Three-part compatibility tag handed to the packaging layer.
///
/// `platform_tag` is `None` only for an unresolved host platform. That state
/// is transient by design: [`DistributionTag::wheel_tag`] refuses to render
/// a tag string from it, so a degraded descriptor can never silently name a
/// published archive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DistributionTag {
    /// Language-runtime compatibility token (always "py3").
    pub runtime_compat: &'static str,

    /// ABI token (always "none").
    pub abi: &'static str,

    /// Platform token, or `None` when the host family is unresolved.
    pub platform_tag: Option<String>,
}

impl DistributionTag {
    /// Renders the full `<runtime>-<abi>-<platform>` tag string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedPlatform`] when `platform_tag` is `None`.
    pub fn wheel_tag(&self) -> Result<String> {
        let platform = self
            .platform_tag
            .as_deref()
            .ok_or(Error::UnresolvedPlatform)?;
        Ok(format!("{}-{}-{}", self.runtime_compat, self.abi, platform))
    }
}

/// Derives the distribution tag for a resolved platform descriptor.
///
/// An `Unknown` family emits a warning diagnostic and yields a `None`
/// platform tag rather than failing outright; the orchestrator decides
/// whether that degraded state is acceptable for the run.
pub fn distribution_tag(descriptor: &PlatformDescriptor) -> DistributionTag {
    let platform_tag = match descriptor.family {
        Family::Windows => Some(if descriptor.arch_name == "x86_64" {
            "win_amd64".to_string()
        } else {
            "win32".to_string()
        }),
        Family::MacOs => Some(format!("macosx_10_15_{}", descriptor.arch_name)),
        Family::Linux => Some(format!("manylinux1_{}", descriptor.arch_name)),
        Family::FreeBsd => Some(format!("freebsd_{}", descriptor.arch_name)),
        Family::Unknown => {
            log::warn!("platform not detected; no distribution tag can be derived");
            None
        }
    };

    DistributionTag {
        runtime_compat: RUNTIME_COMPAT,
        abi: ABI_NONE,
        platform_tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::platform::resolve;

    #[test]
    fn windows_amd64_tag() {
        let tag = distribution_tag(&resolve("win32", "AMD64"));
        assert_eq!(tag.platform_tag.as_deref(), Some("win_amd64"));
        assert_eq!(tag.wheel_tag().unwrap(), "py3-none-win_amd64");
    }

    #[test]
    fn windows_32bit_tag() {
        let tag = distribution_tag(&resolve("win32", "x86"));
        assert_eq!(tag.platform_tag.as_deref(), Some("win32"));
    }

    #[test]
    fn macos_tags() {
        let arm = distribution_tag(&resolve("darwin", "arm64"));
        let plat = arm.platform_tag.unwrap();
        assert!(plat.starts_with("macosx_10_15_"));
        assert!(plat.ends_with("arm64"));

        let intel = distribution_tag(&resolve("darwin", "x86_64"));
        assert_eq!(intel.platform_tag.as_deref(), Some("macosx_10_15_x86_64"));
    }

    #[test]
    fn linux_tag() {
        let tag = distribution_tag(&resolve("linux-gnu", "x86_64"));
        assert_eq!(tag.platform_tag.as_deref(), Some("manylinux1_x86_64"));
    }

    #[test]
    fn freebsd_tag() {
        let tag = distribution_tag(&resolve("freebsd14", "amd64"));
        assert_eq!(tag.platform_tag.as_deref(), Some("freebsd_x86_64"));
    }

    #[test]
    fn runtime_and_abi_are_fixed() {
        let tag = distribution_tag(&resolve("linux", "x86_64"));
        assert_eq!(tag.runtime_compat, "py3");
        assert_eq!(tag.abi, "none");
    }

    #[test]
    fn unknown_platform_yields_null_tag() {
        let tag = distribution_tag(&resolve("plan9", "unknownarch"));
        assert_eq!(tag.platform_tag, None);
        assert!(matches!(
            tag.wheel_tag(),
            Err(Error::UnresolvedPlatform)
        ));
    }
}
