//! Configuration module for Surplus.
//!
//! Handles the config file, environment variable expansion, and defaults.

mod settings;

pub use settings::{
    expand_env_vars, LoggingSettings, OutputSettings, QuerySettings, Settings, SettingsError,
    StoreSettings, CONFIG_ENV, LOCAL_CONFIG,
};
