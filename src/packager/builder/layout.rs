//! Package layout assembly.
//!
//! Decides which files belong in the final package and under which logical
//! group. The one genuine piece of platform-conditional business logic in
//! the whole tool lives here: Windows resolves shared libraries through the
//! executable search path, so its dynamic libraries ship in the binary
//! group; every other family ships them in the library group. That rule is
//! a declarative per-family table, consulted exactly once.

use crate::packager::error::{Error, Result};
use crate::packager::platform::{Family, PlatformDescriptor};
use crate::packager::settings::PackageMode;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Logical grouping of files inside the final package.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutGroup {
    /// Top-level auxiliary build-configuration files.
    Root,
    /// Static link archive and (off Windows) the dynamic libraries.
    Library,
    /// Toolchain executables and (on Windows) the dynamic libraries.
    Binary,
    /// Public headers for downstream consumers embedding the runtime.
    Include,
    /// The entire project tree, source-package mode only.
    Source,
}

impl LayoutGroup {
    /// Nested directory the group's files live under ("" for top level).
    pub fn dir_name(&self) -> &'static str {
        match self {
            LayoutGroup::Root | LayoutGroup::Source => "",
            LayoutGroup::Library => "lib",
            LayoutGroup::Binary => "bin",
            LayoutGroup::Include => "include",
        }
    }
}

/// Which group receives the dynamic libraries, per family.
///
/// Windows loads shared libraries from the executable search path; a
/// package that put them under `lib/` there would install fine and fail at
/// link time, which is why this table exists instead of scattered
/// conditionals.
const DYLIB_PLACEMENT: &[(Family, LayoutGroup)] = &[
    (Family::Windows, LayoutGroup::Binary),
    (Family::MacOs, LayoutGroup::Library),
    (Family::Linux, LayoutGroup::Library),
    (Family::FreeBsd, LayoutGroup::Library),
    (Family::Unknown, LayoutGroup::Library),
];

/// Looks up the dynamic-library group for a family.
pub fn dylib_group(family: Family) -> LayoutGroup {
    DYLIB_PLACEMENT
        .iter()
        .find(|(f, _)| *f == family)
        .map(|(_, group)| *group)
        // The table covers every Family variant.
        .unwrap_or(LayoutGroup::Library)
}

/// One group of the assembled layout: the group and its files, relative to
/// the group's nested directory.
#[derive(Clone, Debug, Serialize)]
pub struct LayoutEntry {
    /// Logical group.
    pub group: LayoutGroup,

    /// File paths relative to the group's directory.
    pub files: Vec<PathBuf>,
}

/// The declared file tree handed to the packaging layer.
///
/// Groups partition the final artifact tree: construction rejects any
/// relative path that would appear under two groups.
#[derive(Clone, Debug, Serialize)]
pub struct PackageLayout {
    groups: Vec<LayoutEntry>,
}

impl PackageLayout {
    fn new(groups: Vec<LayoutEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &groups {
            for file in &entry.files {
                let rel = Path::new(entry.group.dir_name()).join(file);
                if !seen.insert(rel.clone()) {
                    return Err(Error::DuplicateDestination {
                        table: "package layout".to_string(),
                        path: rel,
                    });
                }
            }
        }
        Ok(Self { groups })
    }

    /// Returns the layout groups in declaration order.
    pub fn groups(&self) -> &[LayoutEntry] {
        &self.groups
    }

    /// Iterates every file as (group, path relative to the package root).
    pub fn files(&self) -> impl Iterator<Item = (LayoutGroup, PathBuf)> + '_ {
        self.groups.iter().flat_map(|entry| {
            entry
                .files
                .iter()
                .map(move |file| (entry.group, Path::new(entry.group.dir_name()).join(file)))
        })
    }

    /// Returns the file list of one group, if the group is present.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn group_files(&self, group: LayoutGroup) -> Option<&[PathBuf]> {
        self.groups
            .iter()
            .find(|entry| entry.group == group)
            .map(|entry| entry.files.as_slice())
    }
}

/// Assembles the package layout for a mode, platform, and source tree.
///
/// In binary mode the layout is a pure function of the descriptor (the
/// collector has already guaranteed the staging tree matches the manifest).
/// In source mode the layout is the project tree under `root`, walked in
/// sorted order, with no build and no platform specificity.
pub fn assemble(
    mode: PackageMode,
    descriptor: &PlatformDescriptor,
    root: &Path,
) -> Result<PackageLayout> {
    match mode {
        PackageMode::Binary => assemble_binary(descriptor),
        PackageMode::Source => assemble_source(root),
    }
}

fn assemble_binary(descriptor: &PlatformDescriptor) -> Result<PackageLayout> {
    let dylibs: Vec<PathBuf> = ["ecrt", "ectp"]
        .iter()
        .map(|lib| {
            PathBuf::from(format!(
                "{}{}{}",
                descriptor.dylib_prefix, lib, descriptor.dylib_ext
            ))
        })
        .collect();

    let mut library: Vec<PathBuf> = vec![PathBuf::from("libecrtStatic.a")];
    let mut binary: Vec<PathBuf> = ["ecp", "ecc", "ecs", "ear"]
        .iter()
        .map(|tool| PathBuf::from(format!("{}{}", tool, descriptor.exe_ext)))
        .collect();

    match dylib_group(descriptor.family) {
        LayoutGroup::Binary => binary.extend(dylibs),
        _ => library.extend(dylibs),
    }

    PackageLayout::new(vec![
        LayoutEntry {
            group: LayoutGroup::Root,
            files: vec![
                PathBuf::from("crossplatform.mk"),
                PathBuf::from("default.cf"),
            ],
        },
        LayoutEntry {
            group: LayoutGroup::Library,
            files: library,
        },
        LayoutEntry {
            group: LayoutGroup::Binary,
            files: binary,
        },
        LayoutEntry {
            group: LayoutGroup::Include,
            files: vec![PathBuf::from("cffi-ecrt.h")],
        },
    ])
}

fn assemble_source(root: &Path) -> Result<PackageLayout> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => crate::bail!("failed to walk {}: {}", root.display(), e),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(e) => crate::bail!("path outside source tree: {}", e),
        };
        files.push(rel.to_path_buf());
    }

    // Sorted for deterministic archives.
    files.sort();

    PackageLayout::new(vec![LayoutEntry {
        group: LayoutGroup::Source,
        files,
    }])
}
