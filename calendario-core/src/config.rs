//! Configuration at ~/.config/calendario/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENCODING, DEFAULT_PERIOD_MARKER, DEFAULT_SOURCE};
use crate::error::{CalendarioError, CalendarioResult};
use crate::load::{LoadOptions, Source};

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_period_marker() -> String {
    DEFAULT_PERIOD_MARKER.to_string()
}

/// Where the feed lives and how to read it.
///
/// Every key can be overridden with a `CALENDARIO_<KEY>` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarioConfig {
    /// Path or http(s) URL of the CSV export
    #[serde(default = "default_source")]
    pub source: String,

    /// Text encoding label of the export
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Phrase marking academic period records
    #[serde(default = "default_period_marker")]
    pub period_marker: String,
}

impl Default for CalendarioConfig {
    fn default() -> Self {
        CalendarioConfig {
            source: default_source(),
            encoding: default_encoding(),
            period_marker: default_period_marker(),
        }
    }
}

impl CalendarioConfig {
    pub fn config_path() -> CalendarioResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarioError::Config("Could not determine config directory".into()))?
            .join("calendario");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default on first run.
    pub fn load() -> CalendarioResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file (optional) layered with the environment.
    pub fn load_from(path: &Path) -> CalendarioResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALENDARIO"))
            .build()
            .map_err(|e| CalendarioError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarioError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarioResult<()> {
        let contents = format!(
            "\
# calendario configuration

# CSV export to read (path or http(s) URL):
# source = \"{DEFAULT_SOURCE}\"

# Text encoding of the export:
# encoding = \"{DEFAULT_ENCODING}\"

# Phrase that marks academic period records:
# period_marker = \"{DEFAULT_PERIOD_MARKER}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarioError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarioError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn source(&self) -> CalendarioResult<Source> {
        self.source.parse()
    }

    pub fn load_options(&self) -> CalendarioResult<LoadOptions> {
        LoadOptions::with_encoding_label(&self.encoding)
    }
}
