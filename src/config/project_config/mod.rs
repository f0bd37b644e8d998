//! Project-level configuration support
//!
//! Loads per-project defaults from `gap-score.toml` or `.gap-score.json`
//! in the working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # gap-score.toml
//!
//! [defaults]
//! format = "summary"
//! threshold = 15.0
//! flavor = "gap"
//! no_emoji = true
//! ```
//!
//! Command-line flags and environment variables take precedence over
//! anything set here.

use crate::error::{GapScoreError, GapScoreResult};
use crate::report::ScoreFlavor;
use crate::reporters::OutputFormat;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// File names searched for, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["gap-score.toml", ".gap-score.json"];

/// Project-level configuration loaded from gap-score.toml or similar
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CliDefaults {
    /// Default output format (json, summary)
    #[serde(default)]
    pub format: Option<String>,

    /// Default threshold for the CI gate
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Default report flavor (gap, shadow)
    #[serde(default)]
    pub flavor: Option<String>,

    /// Disable emoji by default
    #[serde(default)]
    pub no_emoji: Option<bool>,
}

impl ProjectConfig {
    /// Check that every value would also be accepted as a CLI flag
    pub fn validate(&self) -> Result<(), String> {
        if let Some(format) = &self.defaults.format {
            OutputFormat::from_str(format).map_err(|e| e.to_string())?;
        }
        if let Some(flavor) = &self.defaults.flavor {
            ScoreFlavor::from_str(flavor)?;
        }
        if let Some(threshold) = self.defaults.threshold {
            if !threshold.is_finite() {
                return Err(format!("threshold must be a finite number, got {}", threshold));
            }
        }
        Ok(())
    }

    /// Configured output format, if any
    pub fn format(&self) -> Option<OutputFormat> {
        self.defaults
            .format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f).ok())
    }

    /// Configured report flavor, if any
    pub fn flavor(&self) -> Option<ScoreFlavor> {
        self.defaults
            .flavor
            .as_deref()
            .and_then(|f| ScoreFlavor::from_str(f).ok())
    }

    pub fn threshold(&self) -> Option<f64> {
        self.defaults.threshold
    }

    pub fn no_emoji(&self) -> bool {
        self.defaults.no_emoji.unwrap_or(false)
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `gap-score.toml`
/// 2. `.gap-score.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Ignoring config: {}", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load and validate a specific configuration file.
///
/// `.json` files are read as JSON, everything else as TOML.
pub fn load_config_file(path: &Path) -> GapScoreResult<ProjectConfig> {
    let config_error = |message: String| GapScoreError::Config {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: ProjectConfig = if is_json {
        serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?
    } else {
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))?
    };

    config.validate().map_err(config_error)?;
    Ok(config)
}

#[cfg(test)]
mod tests;
