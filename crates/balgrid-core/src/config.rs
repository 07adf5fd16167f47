use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use balgrid_parser::LoaderOptions;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "BALGRID_CONFIG";
pub const TIMESTAMP_COLUMN_ENV: &str = "BALGRID_TIMESTAMP_COLUMN";
pub const BALANCE_COLUMN_ENV: &str = "BALGRID_BALANCE_COLUMN";
pub const SUMMARY_MARKER_ENV: &str = "BALGRID_SUMMARY_MARKER";
pub const OUTPUT_SUFFIX_ENV: &str = "BALGRID_OUTPUT_SUFFIX";
pub const PREVIEW_ROWS_ENV: &str = "BALGRID_PREVIEW_ROWS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings for one run. The grid interval is fixed and not part of the config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    #[serde(flatten)]
    pub loader: LoaderOptions,
    pub output_suffix: String,
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loader: LoaderOptions::default(),
            output_suffix: "_BD".to_string(),
            preview_rows: 5,
        }
    }
}

impl PipelineConfig {
    /// Defaults, then the TOML file named by `BALGRID_CONFIG`, then per-field env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_toml_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TIMESTAMP_COLUMN_ENV) {
            self.loader.timestamp_column = value;
        }
        if let Some(value) = lookup(BALANCE_COLUMN_ENV) {
            self.loader.balance_column = value;
        }
        if let Some(value) = lookup(SUMMARY_MARKER_ENV) {
            self.loader.summary_marker = value;
        }
        if let Some(value) = lookup(OUTPUT_SUFFIX_ENV) {
            self.output_suffix = value;
        }
        if let Some(value) = lookup(PREVIEW_ROWS_ENV) {
            self.preview_rows = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: PREVIEW_ROWS_ENV,
                    value,
                })?;
        }
        Ok(())
    }
}
