//! Group flag lines and the values derived from them.
//!
//! Flags are stored as raw lines so they survive serialization unchanged.
//! [`Flag::parse`] turns a line into a typed directive when the group needs
//! to act on it.

use std::fmt;

use crate::error::{GroupError, Result};

/// File extension of flag files inside a group folder.
pub const FLAG_EXTENSION: &str = "ifl";

pub const NO_LUSH: &str = "no lush";
pub const NO_SNOW: &str = "no snow";
pub const NO_ROTATION: &str = "no rotation";

pub(crate) const PRIORITY_PREFIX: &str = "priority ";
pub(crate) const WORLD_CHANCE_PREFIX: &str = "world chance ";
pub(crate) const WORLD_RADIUS_PREFIX: &str = "world radius ";

/// A parsed group flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Flag {
    NoLush,
    NoSnow,
    NoRotation,
    Priority(i32),
    WorldChance(f64),
    WorldRadius(i32),
    /// Any other line, forwarded verbatim to each schematic.
    Directive(String),
}

impl Flag {
    /// Parse a flag line.
    ///
    /// Lines with a known numeric prefix must carry a valid number in the
    /// expected token position.
    pub fn parse(line: &str) -> Result<Self> {
        match line {
            NO_LUSH => return Ok(Flag::NoLush),
            NO_SNOW => return Ok(Flag::NoSnow),
            NO_ROTATION => return Ok(Flag::NoRotation),
            _ => {}
        }

        if line.starts_with(PRIORITY_PREFIX) {
            parse_token(line, 1).map(Flag::Priority)
        } else if line.starts_with(WORLD_CHANCE_PREFIX) {
            parse_token(line, 2).map(Flag::WorldChance)
        } else if line.starts_with(WORLD_RADIUS_PREFIX) {
            parse_token(line, 2).map(Flag::WorldRadius)
        } else {
            Ok(Flag::Directive(line.to_string()))
        }
    }

    /// Parse a flag line, treating malformed numeric flags as directives.
    pub fn parse_lenient(line: &str) -> Self {
        Self::parse(line).unwrap_or_else(|_| Flag::Directive(line.to_string()))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::NoLush => write!(f, "{}", NO_LUSH),
            Flag::NoSnow => write!(f, "{}", NO_SNOW),
            Flag::NoRotation => write!(f, "{}", NO_ROTATION),
            Flag::Priority(p) => write!(f, "{}{}", PRIORITY_PREFIX, p),
            Flag::WorldChance(c) => write!(f, "{}{}", WORLD_CHANCE_PREFIX, c),
            Flag::WorldRadius(r) => write!(f, "{}{}", WORLD_RADIUS_PREFIX, r),
            Flag::Directive(line) => write!(f, "{}", line),
        }
    }
}

/// Parse the space-separated token at `index` of a flag line.
pub(crate) fn parse_token<T>(line: &str, index: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let token = line.split(' ').nth(index).ok_or_else(|| GroupError::FlagFormat {
        flag: line.to_string(),
        message: format!("missing value at token {}", index + 1),
    })?;

    token.parse().map_err(|e: T::Err| GroupError::FlagFormat {
        flag: line.to_string(),
        message: format!("invalid value '{}': {}", token, e),
    })
}

/// A value derived from flags on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Derived<T> {
    #[default]
    Unset,
    Value(T),
}

impl<T: Copy> Derived<T> {
    pub fn get(&self) -> Option<T> {
        match self {
            Derived::Unset => None,
            Derived::Value(v) => Some(*v),
        }
    }
}
