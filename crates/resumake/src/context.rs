//! Global context for CLI commands

use anyhow::{Result, bail};
use resumake_core::config::Config;
use std::path::Path;

/// Loaded configuration plus global flags
pub struct Context {
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Load `config_path`, or `./resumake.toml` when present, or defaults
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `config_path` is given but does not exist
    /// - The config file cannot be read, parsed or validated
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file '{}' not found", path.display());
                }
                Config::from_file(path)?
            }
            None => Config::load_or_default(std::env::current_dir()?)?,
        };

        Ok(Self { config, verbose })
    }

    /// Print a step line in verbose mode
    pub fn step(&self, message: impl std::fmt::Display) {
        if self.verbose {
            crate::output::step(message);
        }
    }
}
