//! Configuration loading for the `componentforge` binary.
//!
//! The configuration types live in [`cf_core::config`]; this module finds
//! the file and attaches context to failures. Validation warnings are left
//! to the caller, which logs them once logging is installed.

pub use cf_core::config::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Locations searched when no `--config` is given, in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = [
    "./componentforge.toml",
    "~/.config/componentforge/config.toml",
];

/// Load configuration from a TOML (or `.json`) file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    Config::parse_for_path(path, &content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Load config from a custom path, then the default locations, else defaults.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}
