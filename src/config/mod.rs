//! Configuration module for gap-score
//!
//! This module handles:
//! - Project-level configuration (gap-score.toml)
//! - CLI defaults (format, threshold, flavor, emoji)

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ProjectConfig, CONFIG_FILE_NAMES,
};
