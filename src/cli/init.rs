//! Init command implementation.
//!
//! Generates a `pack.yaml` manifest for a pack directory.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{GroupError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a pack by generating a pack.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Lush filter factor to record in the manifest
    #[arg(long)]
    pub lush: Option<f64>,

    /// Snow filter layers to record in the manifest
    #[arg(long)]
    pub snow: Option<i32>,

    /// Overwrite existing pack.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(GroupError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    // Convention scan of the whole directory, ignoring any old manifest
    printer.status("Scanning", &display_path(&args.path));
    let scan = scan_directory(&args.path, &Manifest::default());

    let manifest = Manifest {
        lush_factor: args.lush,
        snow_factor: args.snow,
        ..Manifest::default()
    };

    let body = serde_yaml::to_string(&manifest).map_err(|e| GroupError::Build {
        message: format!("Failed to serialize manifest: {}", e),
        help: None,
    })?;
    let yaml = format!("# objgroup pack manifest\n{}", body);

    // Reject values the loader would refuse later
    Manifest::parse(&yaml)?;

    fs::write(&manifest_path, &yaml).map_err(|e| GroupError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    let names: Vec<&str> = scan.groups.iter().map(|g| g.name.as_str()).collect();
    if !names.is_empty() {
        printer.info("Discovered", &names.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(names.len(), "group", "groups")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(path: &std::path::Path) -> InitArgs {
        InitArgs {
            path: path.to_path_buf(),
            lush: None,
            snow: None,
            force: false,
        }
    }

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("rocks")).unwrap();
        fs::write(dir.path().join("rocks/flags.ifl"), "no rotation").unwrap();

        run(args(dir.path()), &Printer::quiet()).unwrap();

        let content = fs::read_to_string(dir.path().join("pack.yaml")).unwrap();
        let manifest = Manifest::parse(&content).unwrap();
        assert_eq!(manifest.output, PathBuf::from("objects.bundle"));
        assert!(manifest.lush_factor.is_none());
    }

    #[test]
    fn test_init_records_filters() {
        let dir = tempdir().unwrap();
        let mut init = args(dir.path());
        init.lush = Some(0.4);
        init.snow = Some(3);

        run(init, &Printer::quiet()).unwrap();

        let manifest = Manifest::load(&dir.path().join("pack.yaml")).unwrap();
        assert_eq!(manifest.lush_factor, Some(0.4));
        assert_eq!(manifest.snow_factor, Some(3));
    }

    #[test]
    fn test_init_rejects_bad_lush_factor() {
        let dir = tempdir().unwrap();
        let mut init = args(dir.path());
        init.lush = Some(4.0);

        assert!(run(init, &Printer::quiet()).is_err());
        assert!(!dir.path().join("pack.yaml").exists());
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pack.yaml"), "output: build.bundle").unwrap();

        assert!(run(args(dir.path()), &Printer::quiet()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pack.yaml"), "sources: [broken").unwrap();

        let mut init = args(dir.path());
        init.force = true;
        run(init, &Printer::quiet()).unwrap();

        let manifest = Manifest::load(&dir.path().join("pack.yaml")).unwrap();
        assert_eq!(manifest.output, PathBuf::from("objects.bundle"));
    }
}
