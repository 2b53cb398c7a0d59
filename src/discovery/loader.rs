//! Group loader - reads a group folder into an [`ObjectGroup`].
//!
//! Flag files contribute their lines as flags, schematic files are decoded
//! with [`Schematic::load`]. Files are visited in file name order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GroupError, Result};
use crate::group::ObjectGroup;
use crate::schematic::Schematic;

use super::scanner::{detect_asset_kind, AssetKind, ScanResult};

/// Loads groups by name from a pack directory.
#[derive(Debug, Clone)]
pub struct GroupLoader {
    root: PathBuf,
}

impl GroupLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the group stored in `<root>/<name>`.
    ///
    /// Returns `Ok(None)` if the folder does not exist or cannot be listed.
    pub fn load<S: Schematic>(&self, name: &str) -> Result<Option<ObjectGroup<S>>> {
        load_group(&self.root.join(name), name)
    }
}

/// Load every scanned group, in scan order.
///
/// Groups whose folder vanished since the scan are skipped.
pub fn load_groups<S: Schematic>(scan: &ScanResult) -> Result<Vec<ObjectGroup<S>>> {
    let mut groups = Vec::with_capacity(scan.total());

    for source in &scan.groups {
        if let Some(group) = load_group(&source.path, &source.name)? {
            groups.push(group);
        }
    }

    Ok(groups)
}

/// Load a group from `folder`, naming it `name`.
///
/// A missing or unreadable folder yields `Ok(None)`. A flag file that
/// cannot be read or a schematic that fails to decode aborts the load.
pub fn load_group<S: Schematic>(folder: &Path, name: &str) -> Result<Option<ObjectGroup<S>>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(_) => return Ok(None),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut group = ObjectGroup::new(name);

    for path in &files {
        match detect_asset_kind(path) {
            Some(AssetKind::Flags) => {
                group.extend_flags(read_flag_lines(path)?);
            }
            Some(AssetKind::Schematic) => {
                let schematic = S::load(path).map_err(|source| GroupError::SchematicLoad {
                    group: name.to_string(),
                    file: file_name(path),
                    source,
                })?;
                group.push_schematic(schematic);
            }
            None => {}
        }
    }

    Ok(Some(group))
}

/// Read a flag file as lines. Trailing blank lines are dropped.
fn read_flag_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| GroupError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read flag file: {}", e),
    })?;

    let mut lines: Vec<String> = content
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    Ok(lines)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
