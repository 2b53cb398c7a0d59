//! Placeable structure schematics.
//!
//! A group treats its schematics through the [`Schematic`] trait: it never
//! looks at voxel data, it only asks schematics to serialize themselves,
//! rotate, recompute their mount point and apply filters. [`Structure`] is
//! the voxel implementation the `objgroup` binary packs.

mod structure;

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

pub use structure::{Block, BlockPos, Structure};

/// File extension of schematic assets inside a group folder.
pub const SCHEMATIC_EXTENSION: &str = "ish";

/// Horizontal facing of a schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Rotation targets generated for every authored (north-facing) schematic.
    pub const VARIANTS: [Direction; 3] = [Direction::East, Direction::South, Direction::West];

    fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Number of clockwise quarter turns needed to face `to` from `self`.
    pub fn quarter_turns_to(self, to: Direction) -> u8 {
        (to.index() + 4 - self.index()) % 4
    }
}

/// A placeable structure stored inside an object group.
pub trait Schematic: Clone {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Decode one schematic record.
    fn read_from<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;

    /// Encode one schematic record.
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()>;

    /// Load a schematic asset file.
    fn load(path: &Path) -> io::Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Rotate the schematic so that what faced `from` now faces `to`.
    fn rotate(&mut self, from: Direction, to: Direction);

    /// Recompute the offset used to mount the schematic on terrain.
    fn recalculate_mount_shift(&mut self);

    /// Apply one group flag line. Lines the schematic does not understand
    /// are ignored.
    fn compute_flag(&mut self, flag: &str);

    fn apply_lush_filter(&mut self, factor: f64);

    fn apply_snow_filter(&mut self, factor: i32);

    /// Release block data held by the schematic.
    fn dispose(&mut self);
}
