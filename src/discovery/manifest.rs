//! Pack manifest (pack.yaml) parsing.
//!
//! The manifest lists where group folders live, where the bundle is
//! written and which terrain filters run on every group.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GroupError, Result};

/// Pack manifest loaded from pack.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories holding group folders, relative to the pack root.
    /// Defaults to the pack root itself if empty.
    pub sources: Vec<String>,

    /// Bundle file written by `objgroup pack`.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Lush filter factor in [0, 1]. The filter is skipped when unset.
    pub lush_factor: Option<f64>,

    /// Snow filter layer count. The filter is skipped when unset.
    pub snow_factor: Option<i32>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("objects.bundle")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            lush_factor: None,
            snow_factor: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a pack.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GroupError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| GroupError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pack.yaml syntax".to_string()),
        })?;

        if let Some(factor) = manifest.lush_factor {
            if !(0.0..=1.0).contains(&factor) {
                return Err(GroupError::Parse {
                    message: format!("lush_factor must be between 0 and 1, got {}", factor),
                    help: None,
                });
            }
        }

        Ok(manifest)
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching: `*.ext`, `dir/*`, `**/dir/*` or a
    /// plain substring.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(rest) = pattern.strip_prefix("**/") {
            return match rest.strip_suffix("/*") {
                Some(dir) => {
                    path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir))
                }
                None => path.contains(rest),
            };
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(dir) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }

        path.contains(pattern)
    }

    /// Get effective source paths, defaulting to the pack root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build/objects.bin").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build/objects.bin"));
        assert!(manifest.sources.is_empty());
        assert!(manifest.lush_factor.is_none());
        assert!(manifest.snow_factor.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
sources:
  - objects/
  - extra/
output: cache/objects.bundle
lush_factor: 0.35
snow_factor: 2
excludes:
  - "*.bak"
  - "**/drafts/*"
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.sources, vec!["objects/", "extra/"]);
        assert_eq!(manifest.output, PathBuf::from("cache/objects.bundle"));
        assert_eq!(manifest.lush_factor, Some(0.35));
        assert_eq!(manifest.snow_factor, Some(2));
        assert_eq!(manifest.excludes, vec!["*.bak", "**/drafts/*"]);
    }

    #[test]
    fn test_parse_rejects_lush_out_of_range() {
        assert!(Manifest::parse("lush_factor: 1.5").is_err());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(Manifest::parse("sources: [unclosed").is_err());
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.output, PathBuf::from("objects.bundle"));
    }

    #[test]
    fn test_effective_sources() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.effective_sources(), vec!["."]);

        manifest.sources = vec!["objects/".to_string()];
        assert_eq!(manifest.effective_sources(), vec!["objects/"]);
    }

    #[test]
    fn test_is_excluded_extension() {
        let manifest = Manifest {
            excludes: vec!["*.bak".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("tree.ish.bak")));
        assert!(manifest.is_excluded(Path::new("trees/oak/tree.ish.bak")));
        assert!(!manifest.is_excluded(Path::new("trees/oak/tree.ish")));
    }

    #[test]
    fn test_is_excluded_directory() {
        let manifest = Manifest {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("drafts/hut.ish")));
        assert!(manifest.is_excluded(Path::new("objects/drafts/hut.ish")));
        assert!(!manifest.is_excluded(Path::new("objects/huts/hut.ish")));
    }

    #[test]
    fn test_is_excluded_substring() {
        let manifest = Manifest {
            excludes: vec!["temp".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("temp")));
        assert!(manifest.is_excluded(Path::new("objects/temp/rock.ish")));
    }
}
