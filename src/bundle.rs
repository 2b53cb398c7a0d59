//! Bundle files: many groups in one stream.
//!
//! A bundle is a group count (i32) followed by each group in the single
//! group format. Loading a bundle skips folder discovery entirely.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{GroupError, Result};
use crate::group::ObjectGroup;
use crate::schematic::Schematic;
use crate::stream::{read_count, write_count};

/// Write `groups` to `writer`.
///
/// `progress` receives the overall fraction written, counting each group as
/// an equal share. An empty bundle reports `1.0` once.
pub fn write_bundle<S: Schematic, W: Write + ?Sized>(
    groups: &[ObjectGroup<S>],
    writer: &mut W,
    mut progress: Option<&mut dyn FnMut(f64)>,
) -> Result<()> {
    write_count(writer, groups.len())?;

    if groups.is_empty() {
        if let Some(report) = progress.as_deref_mut() {
            report(1.0);
        }
        return Ok(());
    }

    let total = groups.len() as f64;
    for (index, group) in groups.iter().enumerate() {
        match progress.as_deref_mut() {
            Some(report) => {
                let mut scaled = |fraction: f64| report((index as f64 + fraction) / total);
                group.write_to(writer, Some(&mut scaled))?;
            }
            None => group.write_to(writer, None)?,
        }
    }

    Ok(())
}

/// Read every group from `reader`.
pub fn read_bundle<S: Schematic, R: Read + ?Sized>(reader: &mut R) -> Result<Vec<ObjectGroup<S>>> {
    let count = read_count(reader)?;
    let mut groups = Vec::with_capacity(count.min(1024));

    for _ in 0..count {
        groups.push(ObjectGroup::decode(reader)?);
    }

    Ok(groups)
}

/// Write a bundle file, creating parent directories as needed.
pub fn save_bundle<S: Schematic>(
    groups: &[ObjectGroup<S>],
    path: &Path,
    progress: Option<&mut dyn FnMut(f64)>,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GroupError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let file = File::create(path).map_err(|e| GroupError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create bundle: {}", e),
    })?;

    let mut writer = BufWriter::new(file);
    write_bundle(groups, &mut writer, progress)?;
    writer.flush()?;
    Ok(())
}

/// Read a bundle file.
pub fn open_bundle<S: Schematic>(path: &Path) -> Result<Vec<ObjectGroup<S>>> {
    let file = File::open(path).map_err(|e| GroupError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open bundle: {}", e),
    })?;

    read_bundle(&mut BufReader::new(file))
}
