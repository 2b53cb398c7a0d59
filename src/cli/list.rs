//! List command implementation.
//!
//! Discovers groups in a pack and prints each with its parsed flags.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover;
use crate::error::Result;
use crate::group::{Flag, ObjectGroup};
use crate::output::{plural, Printer};
use crate::schematic::Structure;

/// List the groups found in a pack, highest priority first
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Pack directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Show each flag line
    #[arg(long)]
    pub flags: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let discovery = discover(&args.path)?;
    let groups = discovery.load_groups::<Structure>()?;

    for group in by_priority(&groups) {
        if let Err(e) = group.priority() {
            printer.warning("Warning", &format!("{}: {}", group.name(), e));
        }

        printer.info(
            "Group",
            &format!(
                "{} {}",
                group.name(),
                printer.dim(&plural(group.len(), "schematic", "schematics"))
            ),
        );

        if args.flags {
            for line in group.flags() {
                printer.status("", &describe_flag(line));
            }
        }
    }

    printer.success("Found", &plural(groups.len(), "group", "groups"));
    Ok(())
}

/// Describe what a flag line does to its group.
pub fn describe_flag(line: &str) -> String {
    match Flag::parse(line) {
        Ok(Flag::NoLush) => "lush filter disabled".to_string(),
        Ok(Flag::NoSnow) => "snow filter disabled".to_string(),
        Ok(Flag::NoRotation) => "rotation variants disabled".to_string(),
        Ok(Flag::Priority(p)) => format!("priority {}", p),
        Ok(Flag::WorldChance(c)) => format!("world chance {}", c),
        Ok(Flag::WorldRadius(r)) => format!("world radius {}", r),
        Ok(Flag::Directive(d)) => format!("directive `{}`", d),
        Err(e) => format!("invalid: {}", e),
    }
}

/// Groups sorted by derived priority, highest first. Groups without a
/// valid priority come last, ties are ordered by name.
pub fn by_priority(groups: &[ObjectGroup<Structure>]) -> Vec<&ObjectGroup<Structure>> {
    let mut ranked: Vec<_> = groups
        .iter()
        .map(|g| (g.priority().ok().flatten(), g))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name().cmp(b.1.name())));
    ranked.into_iter().map(|(_, group)| group).collect()
}
