//! Input locations for a run
//!
//! Defaults match the conventional file names in the working directory, so a
//! run with no configuration reads `slcsp.csv`, `zips.csv` and `plans.csv`.
//! A JSON parameter file may override any subset of them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::TableKind;

/// Paths of the three reference tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPaths {
    /// Target zip list
    #[serde(default = "default_targets")]
    pub targets: PathBuf,

    /// Zip to rating area table
    #[serde(default = "default_zips")]
    pub zips: PathBuf,

    /// Plan catalog
    #[serde(default = "default_plans")]
    pub plans: PathBuf,
}

fn default_targets() -> PathBuf { PathBuf::from(TableKind::Targets.default_file_name()) }
fn default_zips() -> PathBuf { PathBuf::from(TableKind::Zips.default_file_name()) }
fn default_plans() -> PathBuf { PathBuf::from(TableKind::Plans.default_file_name()) }

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            zips: default_zips(),
            plans: default_plans(),
        }
    }
}

impl InputPaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::default().relative_to(dir)
    }

    /// Load from a JSON parameter file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve relative paths against `dir`. Absolute paths are kept.
    pub fn relative_to<P: AsRef<Path>>(self, dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            targets: dir.join(self.targets),
            zips: dir.join(self.zips),
            plans: dir.join(self.plans),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let paths = InputPaths::default();
        assert_eq!(paths.targets, PathBuf::from("slcsp.csv"));
        assert_eq!(paths.zips, PathBuf::from("zips.csv"));
        assert_eq!(paths.plans, PathBuf::from("plans.csv"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let paths = InputPaths::from_json_str(r#"{"plans": "catalog/plans-2024.csv"}"#).unwrap();
        assert_eq!(paths.targets, PathBuf::from("slcsp.csv"));
        assert_eq!(paths.plans, PathBuf::from("catalog/plans-2024.csv"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(InputPaths::from_json_str("{targets: }").is_err());
    }

    #[test]
    fn test_relative_to_dir() {
        let paths = InputPaths::in_dir("data");
        assert_eq!(paths.zips, Path::new("data").join("zips.csv"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let absolute = std::env::temp_dir().join("plans.csv");
        let paths = InputPaths {
            plans: absolute.clone(),
            ..Default::default()
        }
        .relative_to("data");
        assert_eq!(paths.plans, absolute);
    }
}
