//! Rune collection configuration
//!
//! Centralized settings for the collection animation assistant and its demo
//! driver, loaded from `rune.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Attribute resolver settings
    pub assistant: AssistantConfig,
    /// Log output settings
    pub logging: LoggingConfig,
    /// Demo driver settings
    pub demo: DemoConfig,
}

/// Attribute resolver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Emit a trace event for every initial/final attribute resolution
    pub trace_resolutions: bool,
    /// Log finalize calls that have no matching prepare
    pub log_unbalanced_brackets: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. "info", "rune_collection=trace")
    pub filter: String,
}

/// Demo grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of grid columns
    pub columns: usize,
    /// Number of sections laid out initially
    pub sections: usize,
    /// Items in each section
    pub items_per_section: usize,
    /// Square item edge length in points
    pub item_size: f32,
    /// Gap between items in points
    pub spacing: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            trace_resolutions: false,
            log_unbalanced_brackets: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            sections: 2,
            items_per_section: 5,
            item_size: 80.0,
            spacing: 8.0,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `path`, falling back to defaults only when the
    /// file does not exist. Unreadable or malformed files are errors.
    pub fn load_from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(filter) = std::env::var("RUNE_LOG") {
            self.logging.filter = filter;
        }
        if let Ok(val) = std::env::var("RUNE_TRACE_RESOLUTIONS") {
            self.assistant.trace_resolutions = env_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_DEMO_COLUMNS") {
            if let Ok(columns) = val.parse::<usize>() {
                if columns > 0 {
                    self.demo.columns = columns;
                }
            }
        }
    }

    /// Load configuration from `path` with environment variable overrides
    ///
    /// 1. Load from `path` (defaults if it doesn't exist)
    /// 2. Override with environment variables if present
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file_or_default(path)?;
        config.merge_with_env();
        Ok(config)
    }

    /// Load `rune.toml` from the current directory with environment overrides
    pub fn try_load() -> Result<Self, ConfigError> {
        Self::try_load_from("rune.toml")
    }
}
