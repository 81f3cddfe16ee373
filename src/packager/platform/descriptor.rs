//! Host platform detection and naming conventions.
//!
//! Everything the packager needs to know about a platform (shared library
//! prefix/extension, executable extension, which directory dynamic libraries
//! live in) is derived once from two raw host signals and carried in a
//! [`PlatformDescriptor`] that the rest of the pipeline receives as a plain
//! parameter.

use serde::Serialize;

/// Normalized operating-system family driving naming and layout conventions.
///
/// `Unknown` is a degraded state: the packager keeps linux-like filesystem
/// conventions for it, but no distribution tag can be derived from it (see
/// [`super::tag::distribution_tag`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Windows (win32/win64)
    Windows,
    /// macOS / Darwin
    MacOs,
    /// Linux
    Linux,
    /// FreeBSD - linux-like conventions, its own distribution tag
    FreeBsd,
    /// Unresolved host platform
    Unknown,
}

impl Family {
    /// Label of the toolchain's per-platform object directory (`obj/<label>`).
    ///
    /// The external build tool only distinguishes three platforms; FreeBSD
    /// and unresolved hosts share the linux tree.
    pub fn obj_label(&self) -> &'static str {
        match self {
            Family::Windows => "win32",
            Family::MacOs => "apple",
            Family::Linux | Family::FreeBsd | Family::Unknown => "linux",
        }
    }
}

/// Platform identity and filesystem naming conventions.
///
/// Computed once per packaging run by [`resolve`] (or [`host`]) and immutable
/// afterwards. Every field is a deterministic function of the two raw inputs,
/// which keeps the whole pipeline testable with synthetic descriptors.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlatformDescriptor {
    /// Normalized operating-system family.
    pub family: Family,

    /// Normalized CPU architecture name (e.g. "x86_64", "arm64").
    pub arch_name: String,

    /// Shared library filename prefix ("lib" everywhere but Windows).
    pub dylib_prefix: &'static str,

    /// Shared library extension, dot included (".dll", ".dylib", ".so").
    pub dylib_ext: &'static str,

    /// Executable extension, dot included (".exe" on Windows, empty elsewhere).
    pub exe_ext: &'static str,

    /// Directory the toolchain emits shared libraries into ("bin" on Windows,
    /// "lib" elsewhere).
    pub dylib_dir: &'static str,
}

/// Resolves raw host signals into a [`PlatformDescriptor`].
///
/// Pure and deterministic: identical inputs always yield identical
/// descriptors. The only degraded outcome is `family: Unknown` for an OS
/// identifier that matches no known family; there is no failure mode.
///
/// # Arguments
///
/// * `os` - Raw OS identifier (e.g. "linux", "darwin", "win32", "macos")
/// * `machine` - Raw machine/architecture string (e.g. "x86_64", "AMD64", "arm64")
pub fn resolve(os: &str, machine: &str) -> PlatformDescriptor {
    let os = os.to_ascii_lowercase();

    let family = if os.starts_with("win") {
        Family::Windows
    } else if os.starts_with("darwin") || os.starts_with("macos") {
        Family::MacOs
    } else if os.starts_with("linux") {
        Family::Linux
    } else if os.starts_with("freebsd") {
        Family::FreeBsd
    } else {
        Family::Unknown
    };

    let arch_name = normalize_arch(family, machine);

    match family {
        Family::Windows => PlatformDescriptor {
            family,
            arch_name,
            dylib_prefix: "",
            dylib_ext: ".dll",
            exe_ext: ".exe",
            dylib_dir: "bin",
        },
        Family::MacOs => PlatformDescriptor {
            family,
            arch_name,
            dylib_prefix: "lib",
            dylib_ext: ".dylib",
            exe_ext: "",
            dylib_dir: "lib",
        },
        // Anything that is not Windows or macOS gets linux-like conventions,
        // including FreeBSD and unresolved hosts.
        Family::Linux | Family::FreeBsd | Family::Unknown => PlatformDescriptor {
            family,
            arch_name,
            dylib_prefix: "lib",
            dylib_ext: ".so",
            exe_ext: "",
            dylib_dir: "lib",
        },
    }
}

/// Resolves the descriptor for the running host.
pub fn host() -> PlatformDescriptor {
    resolve(std::env::consts::OS, std::env::consts::ARCH)
}

/// Normalizes a raw machine string for a given family.
///
/// amd64/x86_64 spellings collapse to "x86_64" everywhere. macOS knows
/// exactly two architectures, so anything arm-flavored becomes "arm64" and
/// everything else "x86_64". Other families pass unrecognized machines
/// through lower-cased so the tag still names the hardware.
fn normalize_arch(family: Family, machine: &str) -> String {
    let machine = machine.to_ascii_lowercase();

    if family == Family::MacOs {
        return if machine.contains("arm") || machine.contains("aarch64") {
            "arm64".to_string()
        } else {
            "x86_64".to_string()
        };
    }

    if machine.contains("amd64") || machine.contains("x86_64") {
        "x86_64".to_string()
    } else {
        machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_deterministic() {
        for (os, machine) in [
            ("linux-gnu", "x86_64"),
            ("darwin", "arm64"),
            ("win32", "AMD64"),
            ("freebsd14", "amd64"),
            ("plan9", "unknownarch"),
        ] {
            assert_eq!(resolve(os, machine), resolve(os, machine));
        }
    }

    #[test]
    fn windows_conventions() {
        let desc = resolve("win32", "AMD64");
        assert_eq!(desc.family, Family::Windows);
        assert_eq!(desc.arch_name, "x86_64");
        assert_eq!(desc.dylib_prefix, "");
        assert_eq!(desc.dylib_ext, ".dll");
        assert_eq!(desc.exe_ext, ".exe");
        assert_eq!(desc.dylib_dir, "bin");
        assert_eq!(desc.family.obj_label(), "win32");
    }

    #[test]
    fn macos_conventions() {
        let desc = resolve("darwin", "arm64");
        assert_eq!(desc.family, Family::MacOs);
        assert_eq!(desc.arch_name, "arm64");
        assert_eq!(desc.dylib_prefix, "lib");
        assert_eq!(desc.dylib_ext, ".dylib");
        assert_eq!(desc.exe_ext, "");
        assert_eq!(desc.dylib_dir, "lib");
        assert_eq!(desc.family.obj_label(), "apple");
    }

    #[test]
    fn macos_normalizes_non_arm_to_x86_64() {
        assert_eq!(resolve("darwin", "i386").arch_name, "x86_64");
        assert_eq!(resolve("macos", "aarch64").arch_name, "arm64");
    }

    #[test]
    fn linux_conventions() {
        let desc = resolve("linux-gnu", "amd64");
        assert_eq!(desc.family, Family::Linux);
        assert_eq!(desc.arch_name, "x86_64");
        assert_eq!(desc.dylib_ext, ".so");
        assert_eq!(desc.dylib_dir, "lib");
        assert_eq!(desc.family.obj_label(), "linux");
    }

    #[test]
    fn linux_passes_unrecognized_machines_through_lowercased() {
        assert_eq!(resolve("linux", "RISCV64").arch_name, "riscv64");
    }

    #[test]
    fn freebsd_is_linux_like_except_for_family() {
        let desc = resolve("freebsd14", "x86_64");
        assert_eq!(desc.family, Family::FreeBsd);
        assert_eq!(desc.dylib_ext, ".so");
        assert_eq!(desc.family.obj_label(), "linux");
    }

    #[test]
    fn unrecognized_os_degrades_to_unknown() {
        let desc = resolve("plan9", "unknownarch");
        assert_eq!(desc.family, Family::Unknown);
        assert_eq!(desc.arch_name, "unknownarch");
        // Degraded hosts keep linux-like conventions.
        assert_eq!(desc.dylib_ext, ".so");
    }
}
