//! Group discovery and asset loading for object packs.
//!
//! A pack is a directory of group folders, optionally described by a
//! `pack.yaml` manifest. This module finds the group folders and loads
//! them into [`ObjectGroup`]s.
//!
//! # Example
//!
//! ```ignore
//! use objgroup::discovery::discover;
//! use objgroup::Structure;
//!
//! let result = discover("./objects")?;
//! println!("Found {} groups", result.scan.total());
//!
//! let groups = result.load_groups::<Structure>()?;
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::group::ObjectGroup;
use crate::schematic::Schematic;

pub use loader::{load_group, load_groups, GroupLoader};
pub use manifest::Manifest;
pub use scanner::{detect_asset_kind, scan_directory, scan_sources, AssetKind, GroupSource, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "pack.yaml";

/// Result of discovering groups in a pack.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The pack root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no pack.yaml found).
    pub manifest: Manifest,

    /// Whether a pack.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered group folders.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Load every discovered group.
    pub fn load_groups<S: Schematic>(&self) -> Result<Vec<ObjectGroup<S>>> {
        load_groups(&self.scan)
    }

    /// Where the bundle is written, resolved against the pack root.
    pub fn output_path(&self) -> PathBuf {
        if self.manifest.output.is_absolute() {
            self.manifest.output.clone()
        } else {
            self.root.join(&self.manifest.output)
        }
    }
}

/// Discover group folders in a pack directory.
///
/// Looks for a `pack.yaml` manifest in the root directory. If found, scans
/// the manifest's source paths. Otherwise, scans the root itself.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}
