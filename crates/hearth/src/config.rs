//! `GlobalOpts`-aware wrappers over `hearth_config`.

use std::path::PathBuf;

use hearth_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file in effect: `--config`, else the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(hearth_config::config_path)
}

/// Load config and apply command-line path overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = hearth_config::load_config_from(&config_file(global))?;
    if let Some(path) = &global.registry {
        cfg.registry_path = Some(path.clone());
    }
    if let Some(path) = &global.aliases {
        cfg.alias_path = Some(path.clone());
    }
    Ok(cfg)
}
