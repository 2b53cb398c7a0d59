//! File system scanner for discovering group folders.
//!
//! Every directory that directly contains a flag file (`.ifl`) or a
//! schematic file (`.ish`) is a group. Groups are named by their path
//! relative to the source directory, joined with `/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::group::FLAG_EXTENSION;
use crate::schematic::SCHEMATIC_EXTENSION;

use super::manifest::Manifest;

/// The kind of file found in a group folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Flags,
    Schematic,
}

/// A discovered group folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSource {
    /// Group name, e.g. `trees/oak`.
    pub name: String,
    /// Directory holding the group's files.
    pub path: PathBuf,
}

/// Result of scanning for group folders.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered groups, sorted by name.
    pub groups: Vec<GroupSource>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Merge another scan result into this one, keeping names sorted.
    /// A later source does not replace a group already found.
    pub fn merge(&mut self, other: ScanResult) {
        for group in other.groups {
            if !self.groups.iter().any(|g| g.name == group.name) {
                self.groups.push(group);
            }
        }
        self.groups.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn get(&self, name: &str) -> Option<&GroupSource> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Scan a source directory for group folders.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

    if !root.exists() {
        return ScanResult::new();
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || manifest.is_excluded(path) {
            continue;
        }

        if detect_asset_kind(path).is_none() {
            continue;
        }

        let Some(folder) = path.parent() else {
            continue;
        };

        // Loose files in the source root do not belong to a group
        if let Some(name) = group_name(root, folder) {
            found.entry(name).or_insert_with(|| folder.to_path_buf());
        }
    }

    ScanResult {
        groups: found
            .into_iter()
            .map(|(name, path)| GroupSource { name, path })
            .collect(),
    }
}

/// Scan multiple source paths.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

/// Detect the asset kind from a file path based on its extension.
pub fn detect_asset_kind(path: &Path) -> Option<AssetKind> {
    match path.extension()?.to_str()? {
        FLAG_EXTENSION => Some(AssetKind::Flags),
        SCHEMATIC_EXTENSION => Some(AssetKind::Schematic),
        _ => None,
    }
}

fn group_name(root: &Path, folder: &Path) -> Option<String> {
    let relative = folder.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
