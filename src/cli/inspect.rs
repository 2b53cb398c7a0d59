//! Inspect command implementation.
//!
//! Reads a bundle and prints what each group contains.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::bundle::open_bundle;
use crate::error::{GroupError, Result};
use crate::group::ObjectGroup;
use crate::output::{plural, Printer};
use crate::schematic::Structure;

/// Print the groups stored in a bundle
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Bundle file to read
    pub bundle: PathBuf,

    /// Print JSON to stdout instead of status lines
    #[arg(long)]
    pub json: bool,
}

/// Summary of one bundled group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub schematics: usize,
    pub flags: Vec<String>,
    pub priority: Option<i32>,
    pub world_chance: Option<f64>,
    pub world_radius: i32,
}

impl GroupSummary {
    pub fn from_group(group: &ObjectGroup<Structure>) -> Result<Self> {
        Ok(Self {
            name: group.name().to_string(),
            schematics: group.len(),
            flags: group.flags().to_vec(),
            priority: group.priority()?,
            world_chance: group.world_chance()?,
            world_radius: group.world_radius()?,
        })
    }
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let groups: Vec<ObjectGroup<Structure>> = open_bundle(&args.bundle)?;
    let summaries = groups
        .iter()
        .map(GroupSummary::from_group)
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        let json = serde_json::to_string_pretty(&summaries).map_err(|e| GroupError::Build {
            message: format!("Failed to serialize summary: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    for summary in &summaries {
        printer.info("Group", &printer.bold(&summary.name));
        printer.status("", &plural(summary.schematics, "schematic", "schematics"));
        if let Some(priority) = summary.priority {
            printer.status("", &format!("priority {}", priority));
        }
        if let Some(chance) = summary.world_chance {
            printer.status("", &format!("world chance {}", chance));
        }
        printer.status("", &format!("world radius {}", summary.world_radius));
        if !summary.flags.is_empty() {
            printer.status("", &printer.dim(&summary.flags.join(", ")));
        }
    }

    printer.success("Read", &plural(summaries.len(), "group", "groups"));
    Ok(())
}
