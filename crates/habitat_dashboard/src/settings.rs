//! Locating the classifier configuration at startup.

use anyhow::{Context, Result};
use directories_next::ProjectDirs;
use habitat_core::ClassifierConfig;
use std::ffi::OsString;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "HABITAT_CONFIG";
const CONFIG_FILE: &str = "habitat.toml";

/// Resolve and load the classifier config.
///
/// An explicit `$HABITAT_CONFIG` must point at a readable file. Otherwise the
/// working directory and then the platform config dir are tried, falling back
/// to built-in defaults.
pub fn load_classifier_config() -> Result<ClassifierConfig> {
    resolve(std::env::var_os(CONFIG_ENV), fallback_candidates())
}

fn resolve(explicit: Option<OsString>, fallbacks: Vec<PathBuf>) -> Result<ClassifierConfig> {
    if let Some(path) = explicit {
        let path = PathBuf::from(path);
        return ClassifierConfig::from_toml_file(&path)
            .with_context(|| format!("{CONFIG_ENV} points at {}", path.display()));
    }
    ClassifierConfig::from_first_existing(&fallbacks).context("reading habitat.toml")
}

fn fallback_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dirs) = ProjectDirs::from("org", "habitat", "HabitatDashboard") {
        candidates.push(dirs.config_dir().join(CONFIG_FILE));
    }
    candidates
}
