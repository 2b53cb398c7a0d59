//! Object groups: named bundles of schematics plus flag lines.
//!
//! A group is built by the loader (see [`crate::discovery`]) or decoded from
//! a bundle, run through [`ObjectGroup::process_variants`] and the terrain
//! filters, then handed to the world generator.
//!
//! # Example
//!
//! ```ignore
//! use objgroup::{ObjectGroup, Structure};
//!
//! let mut group: ObjectGroup<Structure> = ObjectGroup::new("trees/oak");
//! group.push_flag("priority 3");
//! group.push_schematic(Structure::new("oak", 5, 9, 5));
//!
//! group.process_variants();
//! assert_eq!(group.len(), 4);
//! assert_eq!(group.priority()?, Some(3));
//! ```

mod codec;
pub mod flags;

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::Result;
use crate::schematic::{Direction, Schematic, Structure};

use flags::{parse_token, PRIORITY_PREFIX, WORLD_CHANCE_PREFIX, WORLD_RADIUS_PREFIX};

pub use flags::{Derived, Flag, FLAG_EXTENSION, NO_LUSH, NO_ROTATION, NO_SNOW};

/// Spawn radius reported when no `world radius` flag is present.
pub const DEFAULT_WORLD_RADIUS: i32 = 32;

/// Whether a filter touched the group's schematics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Applied,
    /// The group opted out with a `no ...` flag.
    Skipped,
}

/// A named collection of schematics and the flags that configure them.
///
/// Equality and hashing consider the name, the flag lines and the cached
/// priority. Schematics and the spawn values are not part of identity.
///
/// The hash changes the first time [`ObjectGroup::priority`] finds a value,
/// so call it before using a group as a `HashMap` or `HashSet` key.
#[derive(Debug, Clone)]
pub struct ObjectGroup<S: Schematic = Structure> {
    name: String,
    schematics: Vec<S>,
    flags: Vec<String>,
    priority: Cell<Derived<i32>>,
    world_chance: Cell<Derived<f64>>,
    world_radius: Cell<Derived<i32>>,
}

impl<S: Schematic> ObjectGroup<S> {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schematics: Vec::new(),
            flags: Vec::new(),
            priority: Cell::new(Derived::Unset),
            world_chance: Cell::new(Derived::Unset),
            world_radius: Cell::new(Derived::Unset),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn schematics(&self) -> &[S] {
        &self.schematics
    }

    /// Replace every schematic in the group.
    pub fn set_schematics(&mut self, schematics: Vec<S>) {
        self.schematics = schematics;
    }

    pub fn push_schematic(&mut self, schematic: S) {
        self.schematics.push(schematic);
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Replace every flag line. Values already derived stay cached.
    pub fn set_flags(&mut self, flags: Vec<String>) {
        self.flags = flags;
    }

    pub fn push_flag(&mut self, flag: impl Into<String>) {
        self.flags.push(flag.into());
    }

    pub fn extend_flags<I, T>(&mut self, flags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
    }

    /// Whether the group carries the exact flag line.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Parse every flag line.
    pub fn parsed_flags(&self) -> Result<Vec<Flag>> {
        self.flags.iter().map(|line| Flag::parse(line)).collect()
    }

    /// Number of schematics in the group.
    pub fn len(&self) -> usize {
        self.schematics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schematics.is_empty()
    }

    /// Placement priority from the first `priority <int>` flag.
    ///
    /// A found value is cached for the life of the group, so later flag
    /// edits do not change it. `None` means no priority flag exists; the
    /// flags are scanned again on the next call.
    pub fn priority(&self) -> Result<Option<i32>> {
        self.derive(&self.priority, PRIORITY_PREFIX, 1)
    }

    /// Spawn chance from the first `world chance <float>` flag.
    pub fn world_chance(&self) -> Result<Option<f64>> {
        self.derive(&self.world_chance, WORLD_CHANCE_PREFIX, 2)
    }

    /// Spawn radius from the first `world radius <int>` flag, or
    /// [`DEFAULT_WORLD_RADIUS`].
    ///
    /// Unlike priority and chance, the default is cached too: once a group
    /// has reported 32 it keeps reporting 32.
    pub fn world_radius(&self) -> Result<i32> {
        let radius = self
            .derive(&self.world_radius, WORLD_RADIUS_PREFIX, 2)?
            .unwrap_or(DEFAULT_WORLD_RADIUS);
        self.world_radius.set(Derived::Value(radius));
        Ok(radius)
    }

    fn derive<T>(&self, cache: &Cell<Derived<T>>, prefix: &str, index: usize) -> Result<Option<T>>
    where
        T: Copy + FromStr,
        T::Err: fmt::Display,
    {
        if let Derived::Value(v) = cache.get() {
            return Ok(Some(v));
        }

        match self.flags.iter().find(|line| line.starts_with(prefix)) {
            Some(line) => {
                let value = parse_token(line, index)?;
                cache.set(Derived::Value(value));
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Apply every flag to every schematic, then add east, south and west
    /// facing copies of each schematic unless the group has `no rotation`.
    ///
    /// Returns the resulting schematic count. Calling this twice expands
    /// the rotations twice.
    pub fn process_variants(&mut self) -> usize {
        for schematic in &mut self.schematics {
            schematic.recalculate_mount_shift();

            for flag in &self.flags {
                schematic.compute_flag(flag);
            }
        }

        if !self.has_flag(NO_ROTATION) {
            let originals = self.schematics.len();
            let mut variants = Vec::with_capacity(originals * Direction::VARIANTS.len());

            for schematic in &self.schematics[..originals] {
                for direction in Direction::VARIANTS {
                    let mut variant = schematic.clone();
                    variant.rotate(Direction::North, direction);
                    variant.recalculate_mount_shift();
                    variants.push(variant);
                }
            }

            self.schematics.extend(variants);
        }

        self.schematics.len()
    }

    /// Apply the lush filter unless the group has `no lush`.
    pub fn apply_lush_filter(&mut self, factor: f64) -> FilterOutcome {
        if self.has_flag(NO_LUSH) {
            return FilterOutcome::Skipped;
        }

        for schematic in &mut self.schematics {
            schematic.apply_lush_filter(factor);
        }

        FilterOutcome::Applied
    }

    /// Apply the snow filter unless the group has `no snow`.
    pub fn apply_snow_filter(&mut self, factor: i32) -> FilterOutcome {
        if self.has_flag(NO_SNOW) {
            return FilterOutcome::Skipped;
        }

        for schematic in &mut self.schematics {
            schematic.apply_snow_filter(factor);
        }

        FilterOutcome::Applied
    }

    /// Duplicate the group, appending `suffix` to the group name and to
    /// every schematic name. Derived values are not carried over.
    pub fn copy(&self, suffix: &str) -> Self {
        let mut group = Self::new(format!("{}{}", self.name, suffix));
        group.flags = self.flags.clone();
        group.schematics = self
            .schematics
            .iter()
            .map(|schematic| {
                let mut copy = schematic.clone();
                copy.set_name(format!("{}{}", schematic.name(), suffix));
                copy
            })
            .collect();
        group
    }

    /// Release every schematic and clear both flags and schematics.
    pub fn dispose(&mut self) {
        for schematic in &mut self.schematics {
            schematic.dispose();
        }

        self.schematics.clear();
        self.flags.clear();
    }

    fn reset_derived(&self) {
        self.priority.set(Derived::Unset);
        self.world_chance.set(Derived::Unset);
        self.world_radius.set(Derived::Unset);
    }
}

impl<S: Schematic> PartialEq for ObjectGroup<S> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.flags == other.flags
            && self.priority.get() == other.priority.get()
    }
}

impl<S: Schematic> Eq for ObjectGroup<S> {}

impl<S: Schematic> Hash for ObjectGroup<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.flags.hash(state);
        self.priority.get().hash(state);
    }
}
