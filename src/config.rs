//! Configuration
//!
//! Loaded from a TOML file (`--config <path>` or the user config directory) with
//! an environment override for the API URL. Every section and field has a
//! default, so an absent or partial file is fine.

use crate::acquire::bank::ImportSettings;
use crate::acquire::remote::DEFAULT_BASE_URL;
use crate::chart::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_SPACING, DEFAULT_WIDTH};
use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "EXPENSE_CHART_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Chart geometry (logical view box units)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_spacing")]
    pub spacing: f64,

    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_spacing() -> f64 {
    DEFAULT_SPACING
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            spacing: default_spacing(),
            locale: default_locale(),
        }
    }
}

/// Bank export layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_tag_column")]
    pub tag_column: String,

    #[serde(default = "default_amount_column")]
    pub amount_column: String,

    #[serde(default = "default_skip_lines")]
    pub skip_lines: usize,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_tag_column() -> String {
    ImportSettings::default().tag_column
}

fn default_amount_column() -> String {
    ImportSettings::default().amount_column
}

fn default_skip_lines() -> usize {
    ImportSettings::default().skip_lines
}

fn default_delimiter() -> char {
    char::from(ImportSettings::default().delimiter)
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            tag_column: default_tag_column(),
            amount_column: default_amount_column(),
            skip_lines: default_skip_lines(),
            delimiter: default_delimiter(),
        }
    }
}

/// Expense backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Image output
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// TTF/OTF font for the scale label in PNG output.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Pixels per logical unit for PNG output.
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: u32,
}

fn default_pixel_scale() -> u32 {
    4
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            pixel_scale: default_pixel_scale(),
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse config")
    }

    /// Load from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// `~/.config/expense-chart/config.toml` (platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("expense-chart").join("config.toml"))
    }

    /// Explicit path (must exist), else the default path if present, else
    /// defaults; then environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            debug!("api.base_url overridden by {}", API_URL_ENV);
            config.api.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.chart.width > 0.0 && self.chart.height > 0.0) {
            bail!(
                "chart size must be positive, got {} x {}",
                self.chart.width,
                self.chart.height
            );
        }
        if !self.import.delimiter.is_ascii() {
            bail!("import.delimiter must be a single ASCII character");
        }
        Ok(())
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.chart.width,
            height: self.chart.height,
            spacing: self.chart.spacing,
            locale: self.chart.locale.clone(),
        }
    }

    pub fn import_settings(&self) -> ImportSettings {
        ImportSettings {
            tag_column: self.import.tag_column.clone(),
            amount_column: self.import.amount_column.clone(),
            skip_lines: self.import.skip_lines,
            delimiter: self.import.delimiter as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let c = Config::from_toml_str("").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.chart_options(), ChartOptions::default());
        assert_eq!(c.import_settings(), ImportSettings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let c = Config::from_toml_str(
            r#"
            [chart]
            width = 600
            locale = "de"

            [import]
            delimiter = ";"
            skip_lines = 0
            "#,
        )
        .unwrap();
        assert_eq!(c.chart.width, 600.0);
        assert_eq!(c.chart.height, DEFAULT_HEIGHT);
        assert_eq!(c.chart.locale, "de");
        assert_eq!(c.import_settings().delimiter, b';');
        assert_eq!(c.import.tag_column, "Kategorie");
        assert_eq!(c.api.timeout_secs, 30);
    }

    #[test]
    fn import_defaults_follow_import_settings() {
        let c = Config::from_toml_str("[import]\ntag_column = \"Category\"\n").unwrap();
        let defaults = ImportSettings::default();
        assert_eq!(c.import.skip_lines, defaults.skip_lines);
        assert_eq!(c.import_settings().delimiter, defaults.delimiter);
        assert_eq!(c.import_settings().amount_column, defaults.amount_column);
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let c = Config::from_toml_str("[chart]\nheight = 0\n").unwrap();
        assert!(c.validate().is_err());
    }
}
