//! Sparse voxel structure, the schematic format packed by `objgroup`.
//!
//! Blocks use legacy numeric ids with a data nibble. Only the ids the
//! filters care about have named constants.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read, Write};

use crate::stream::{
    read_count, read_i32, read_u16, read_u8, read_utf, write_count, write_i32, write_u16,
    write_u8, write_utf,
};

use super::{Direction, Schematic};

/// Maximum stacked snow layers in one block.
const MAX_SNOW_LAYERS: i32 = 8;

/// Position of a block inside a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    fn above(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    fn below(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }
}

/// A block id with its data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: u16,
    pub data: u8,
}

impl Block {
    pub const STONE: Block = Block::new(1);
    pub const GRASS: Block = Block::new(2);
    pub const DIRT: Block = Block::new(3);
    pub const LOG: Block = Block::new(17);
    pub const LEAVES: Block = Block::new(18);
    pub const SNOW_ID: u16 = 78;
    pub const VINE: Block = Block::new(106);

    pub const fn new(id: u16) -> Self {
        Self { id, data: 0 }
    }

    pub const fn with_data(id: u16, data: u8) -> Self {
        Self { id, data }
    }

    /// Snow cover with the given number of layers.
    pub fn snow(layers: u8) -> Self {
        Self::with_data(Self::SNOW_ID, layers)
    }

    /// Whether the block can carry snow or terrain on top of it.
    pub fn is_solid(&self) -> bool {
        self.id != Self::SNOW_ID && self.id != Self::VINE.id
    }
}

/// A structure fragment with a bounding box and sparse block storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    name: String,
    width: i32,
    height: i32,
    depth: i32,
    sink: i32,
    blocks: BTreeMap<BlockPos, Block>,
    mount: BlockPos,
}

impl Structure {
    /// Create an empty structure with the given bounding box.
    pub fn new(name: impl Into<String>, width: i32, height: i32, depth: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            depth,
            sink: 0,
            blocks: BTreeMap::new(),
            mount: BlockPos::default(),
        }
    }

    /// Get the bounding box as (width, height, depth).
    pub fn size(&self) -> (i32, i32, i32) {
        (self.width, self.height, self.depth)
    }

    fn contains(&self, pos: BlockPos) -> bool {
        (0..self.width).contains(&pos.x)
            && (0..self.height).contains(&pos.y)
            && (0..self.depth).contains(&pos.z)
    }

    /// Place a block. Returns false if the position is outside the bounding box.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.blocks.insert(pos, block);
        true
    }

    pub fn get(&self, pos: BlockPos) -> Option<Block> {
        self.blocks.get(&pos).copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockPos, Block)> + '_ {
        self.blocks.iter().map(|(pos, block)| (*pos, *block))
    }

    /// Offset added to block positions when the structure is placed.
    pub fn mount(&self) -> BlockPos {
        self.mount
    }

    /// How many blocks the structure is sunk into the ground.
    pub fn sink(&self) -> i32 {
        self.sink
    }

    /// Lowest occupied layer, never negative since blocks are bounds checked.
    fn floor(&self) -> i32 {
        self.blocks.keys().map(|pos| pos.y).min().unwrap_or(0)
    }

    fn rotate_clockwise(&mut self) {
        let depth = self.depth;
        let blocks = std::mem::take(&mut self.blocks);
        self.blocks = blocks
            .into_iter()
            .map(|(pos, block)| (BlockPos::new(depth - 1 - pos.z, pos.y, pos.x), block))
            .collect();
        std::mem::swap(&mut self.width, &mut self.depth);
    }
}

/// Deterministic roll in [0, 1) for a block position.
fn position_roll(pos: BlockPos) -> f64 {
    // splitmix64 over the packed coordinates
    let mut z = ((pos.x as u32 as u64) << 42)
        ^ ((pos.y as u32 as u64) << 21)
        ^ (pos.z as u32 as u64);
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

impl Schematic for Structure {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let name = read_utf(reader)?;
        let width = read_i32(reader)?;
        let height = read_i32(reader)?;
        let depth = read_i32(reader)?;
        let sink = read_i32(reader)?;
        let count = read_count(reader)?;

        let mut structure = Structure::new(name, width, height, depth);
        structure.sink = sink;

        for _ in 0..count {
            let pos = BlockPos::new(read_i32(reader)?, read_i32(reader)?, read_i32(reader)?);
            let block = Block::with_data(read_u16(reader)?, read_u8(reader)?);
            if !structure.set_block(pos, block) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "block at {},{},{} lies outside {}x{}x{}",
                        pos.x, pos.y, pos.z, width, height, depth
                    ),
                ));
            }
        }

        if (-structure.floor()).checked_sub(sink).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("sink {} is out of range", sink),
            ));
        }

        structure.recalculate_mount_shift();
        Ok(structure)
    }

    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_utf(writer, &self.name)?;
        write_i32(writer, self.width)?;
        write_i32(writer, self.height)?;
        write_i32(writer, self.depth)?;
        write_i32(writer, self.sink)?;
        write_count(writer, self.blocks.len())?;

        for (pos, block) in &self.blocks {
            write_i32(writer, pos.x)?;
            write_i32(writer, pos.y)?;
            write_i32(writer, pos.z)?;
            write_u16(writer, block.id)?;
            write_u8(writer, block.data)?;
        }

        Ok(())
    }

    fn rotate(&mut self, from: Direction, to: Direction) {
        for _ in 0..from.quarter_turns_to(to) {
            self.rotate_clockwise();
        }
    }

    fn recalculate_mount_shift(&mut self) {
        let y = (-self.floor()).saturating_sub(self.sink);
        self.mount = BlockPos::new(-(self.width / 2), y, -(self.depth / 2));
    }

    fn compute_flag(&mut self, flag: &str) {
        let mut parts = flag.split(' ');
        let sink = match (parts.next(), parts.next().map(str::parse::<i32>)) {
            (Some("sink"), Some(Ok(n))) => n,
            (Some("raise"), Some(Ok(n))) => match n.checked_neg() {
                Some(n) => n,
                None => return,
            },
            _ => return,
        };
        self.sink = sink;
        self.recalculate_mount_shift();
    }

    fn apply_lush_filter(&mut self, factor: f64) {
        let mut changes = Vec::new();

        for (&pos, &block) in &self.blocks {
            if position_roll(pos) >= factor {
                continue;
            }

            if block == Block::DIRT && !self.blocks.contains_key(&pos.above()) {
                changes.push((pos, Block::GRASS));
            } else if block == Block::LEAVES {
                let below = pos.below();
                if below.y >= 0 && !self.blocks.contains_key(&below) {
                    changes.push((below, Block::VINE));
                }
            }
        }

        self.blocks.extend(changes);
    }

    fn apply_snow_filter(&mut self, factor: i32) {
        if factor <= 0 {
            return;
        }
        let layers = factor.min(MAX_SNOW_LAYERS) as u8;

        let mut tops: HashMap<(i32, i32), i32> = HashMap::new();
        for (pos, block) in &self.blocks {
            if block.is_solid() {
                let top = tops.entry((pos.x, pos.z)).or_insert(pos.y);
                *top = (*top).max(pos.y);
            }
        }

        for ((x, z), y) in tops {
            let cover = BlockPos::new(x, y + 1, z);
            if self.blocks.contains_key(&cover) {
                continue;
            }
            if cover.y >= self.height {
                self.height = cover.y + 1;
            }
            self.blocks.insert(cover, Block::snow(layers));
        }
    }

    fn dispose(&mut self) {
        self.blocks.clear();
    }
}
