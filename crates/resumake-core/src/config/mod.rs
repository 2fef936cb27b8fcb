//! resumake.toml loading and defaults

pub mod consts;
mod model;

pub use consts::{defaults, CONFIG_FILE_NAME, ENGINE_ENV_VAR};
pub use model::{Config, EngineConfig, OutputConfig, PathsConfig, WatchConfig};
