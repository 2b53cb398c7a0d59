//! Pack command implementation.
//!
//! Loads every group in a pack, expands rotation variants, applies the
//! terrain filters and writes all groups into one bundle file.

use std::path::PathBuf;

use clap::Args;

use crate::bundle::save_bundle;
use crate::discovery::{discover, load_group, Manifest};
use crate::error::{GroupError, Result};
use crate::group::{FilterOutcome, ObjectGroup};
use crate::output::{display_path, plural, Printer};
use crate::schematic::Structure;

/// Load, expand and filter every group, then write a bundle
#[derive(Args, Debug)]
pub struct PackArgs {
    /// Pack directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Bundle file to write (overrides pack.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Lush filter factor in [0, 1] (overrides pack.yaml)
    #[arg(long)]
    pub lush: Option<f64>,

    /// Snow filter layers (overrides pack.yaml)
    #[arg(long)]
    pub snow: Option<i32>,

    /// Skip flag application and rotation variants
    #[arg(long)]
    pub no_variants: bool,
}

/// How each group is processed before it is bundled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSettings {
    pub variants: bool,
    pub lush_factor: Option<f64>,
    pub snow_factor: Option<i32>,
}

impl ProcessSettings {
    /// Combine command line overrides with the manifest.
    pub fn resolve(args: &PackArgs, manifest: &Manifest) -> Result<Self> {
        let lush_factor = args.lush.or(manifest.lush_factor);
        if let Some(factor) = lush_factor {
            if !(0.0..=1.0).contains(&factor) {
                return Err(GroupError::Build {
                    message: format!("Lush factor {} is out of range", factor),
                    help: Some("Use a value between 0 and 1".to_string()),
                });
            }
        }

        Ok(Self {
            variants: !args.no_variants,
            lush_factor,
            snow_factor: args.snow.or(manifest.snow_factor),
        })
    }
}

pub fn run(args: PackArgs, printer: &Printer) -> Result<()> {
    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;
    let settings = ProcessSettings::resolve(&args, &discovery.manifest)?;

    if discovery.scan.is_empty() {
        printer.warning("Warning", "no group folders found");
    }

    let mut groups = Vec::with_capacity(discovery.scan.total());
    for source in &discovery.scan.groups {
        printer.status("Loading", &source.name);

        let loaded = load_group::<Structure>(&source.path, &source.name).map_err(|e| {
            if matches!(e, GroupError::SchematicLoad { .. }) {
                printer.error("Failed", &e.to_string());
            }
            e
        })?;

        let Some(mut group) = loaded else {
            printer.warning("Missing", &display_path(&source.path));
            continue;
        };

        process_group(&mut group, &settings, printer)?;
        groups.push(group);
    }

    let output = args.output.unwrap_or_else(|| discovery.output_path());
    printer.status("Writing", &display_path(&output));

    let mut next_report = 0.25;
    let mut report = |fraction: f64| {
        if fraction >= next_report && fraction < 1.0 {
            printer.progress(fraction);
            while next_report <= fraction {
                next_report += 0.25;
            }
        }
    };
    save_bundle(&groups, &output, Some(&mut report))?;

    let schematics: usize = groups.iter().map(ObjectGroup::len).sum();
    printer.success(
        "Finished",
        &format!(
            "{} ({}) to {}",
            plural(groups.len(), "group", "groups"),
            plural(schematics, "schematic", "schematics"),
            printer.cyan(&display_path(&output))
        ),
    );

    Ok(())
}

/// Check a group's flags, expand its variants and run the filters.
pub fn process_group(
    group: &mut ObjectGroup<Structure>,
    settings: &ProcessSettings,
    printer: &Printer,
) -> Result<()> {
    check_flags(group)?;

    if settings.variants {
        let count = group.process_variants();
        printer.info(
            "Processed",
            &format!(
                "{} in {}",
                plural(count, "schematic", "schematics"),
                printer.bold(group.name())
            ),
        );
    }

    if let Some(factor) = settings.lush_factor {
        match group.apply_lush_filter(factor) {
            FilterOutcome::Applied => printer.status("Lush", &format!("filter applied to {}", group.name())),
            FilterOutcome::Skipped => printer.info("Skipping", &format!("lush filter for {}", printer.dim(group.name()))),
        }
    }

    if let Some(factor) = settings.snow_factor {
        match group.apply_snow_filter(factor) {
            FilterOutcome::Applied => printer.status("Snow", &format!("filter applied to {}", group.name())),
            FilterOutcome::Skipped => printer.info("Skipping", &format!("snow filter for {}", printer.dim(group.name()))),
        }
    }

    Ok(())
}

/// Derive the numeric flag values so malformed ones fail with the group
/// name attached.
fn check_flags(group: &ObjectGroup<Structure>) -> Result<()> {
    let derived = group
        .priority()
        .and_then(|_| group.world_chance())
        .and_then(|_| group.world_radius());

    derived.map(|_| ()).map_err(|e| GroupError::Build {
        message: format!("{}: {}", group.name(), e),
        help: Some(format!("Fix the flag files in {}", group.name())),
    })
}
