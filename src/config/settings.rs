//! TOML-based configuration for Surplus.
//!
//! Supports a config file (surplus.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [store]
//! path = "${SURPLUS_DATA}/food_wastage.db"
//!
//! [query]
//! escape_wildcards = false
//!
//! [output]
//! format = "table"  # table | json | csv
//!
//! [logging]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::report::{MatchMode, OutputFormat};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SURPLUS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "surplus.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub query: QuerySettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Dataset location.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite file (supports ${ENV_VAR} expansion).
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: "food_wastage.db".to_string(),
        }
    }
}

/// Filter matching behavior.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Treat `%` and `_` in filter values literally.
    pub escape_wildcards: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SURPLUS_CONFIG`
    /// 2. `./surplus.toml`
    /// 3. `~/.config/surplus/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        match Self::locate() {
            Some(path) => Self::from_file(path),
            None => Ok(Settings::default()),
        }
    }

    /// The config file [`Settings::load`] would read, if any.
    ///
    /// A path named by `SURPLUS_CONFIG` is returned even if it does not
    /// exist, so loading it reports the missing file.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("surplus").join("config.toml"))
            .filter(|path| path.exists())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.store.path.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "store.path must not be empty".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            SettingsError::InvalidConfig(format!(
                "logging.level '{}' is not a valid filter directive: {}",
                self.logging.level, e
            ))
        })?;
        Ok(())
    }

    /// Store path with environment variables expanded.
    pub fn store_path(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.store.path).map(PathBuf::from)
    }

    pub fn match_mode(&self) -> MatchMode {
        MatchMode::from_escape_flag(self.query.escape_wildcards)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                name.push(ch);
            }
            if !closed {
                return Err(SettingsError::InvalidConfig(format!(
                    "unterminated '${{' in '{}'",
                    s
                )));
            }
            if name.is_empty() {
                return Err(SettingsError::InvalidConfig(format!(
                    "empty '${{}}' in '{}'",
                    s
                )));
            }
            name
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
