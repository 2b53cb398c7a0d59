//! objgroup - Schematic object group pipeline
//!
//! A library for loading groups of placeable structure schematics from
//! asset folders, expanding their rotation variants, applying terrain
//! filters and packing them into binary bundles for a world generator.

pub mod bundle;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod group;
pub mod output;
pub mod schematic;
pub mod stream;

pub use bundle::{open_bundle, read_bundle, save_bundle, write_bundle};
pub use discovery::{discover, load_group, DiscoveryResult, GroupLoader, Manifest, ScanResult};
pub use error::{GroupError, Result};
pub use group::{Derived, FilterOutcome, Flag, ObjectGroup, DEFAULT_WORLD_RADIUS};
pub use schematic::{Block, BlockPos, Direction, Schematic, Structure};
