//! Application configuration module.
//!
//! Loads, validates and saves the JSON configuration file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::exchange::ExchangeLayout;
use crate::reinjection::ReinjectionMode;

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Unit extraction and segment merging
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Export filtering
    #[serde(default)]
    pub filter: FilterConfig,

    /// Writing translations back
    #[serde(default)]
    pub reinjection: ReinjectionConfig,

    /// Batch output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Segment merging settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Merge vertically adjacent units into one segment
    #[serde(default)]
    pub merge_enabled: bool,

    /// Extra vertical distance, in document units, still considered adjacent
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merge_enabled: false,
            merge_threshold: default_merge_threshold(),
        }
    }
}

/// Export filter settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilterConfig {
    /// Export segments that are numbers only
    #[serde(default = "default_true")]
    pub export_numbers: bool,

    /// Export segments that are blank
    #[serde(default = "default_true")]
    pub export_blanks: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            export_numbers: true,
            export_blanks: true,
        }
    }
}

/// Reinjection settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ReinjectionConfig {
    /// Overwrite units or insert translations below them
    #[serde(default)]
    pub mode: ReinjectionMode,

    /// Font applied to every written unit, if any. Blank means none.
    #[serde(default)]
    pub font: Option<String>,

    /// Exchange file column layout
    #[serde(default)]
    pub layout: ExchangeLayout,
}

impl ReinjectionConfig {
    /// Configured font name, trimmed; blank names count as no font
    pub fn font_name(&self) -> Option<&str> {
        self.font
            .as_deref()
            .map(str::trim)
            .filter(|font| !font.is_empty())
    }
}

/// Output locations for batch runs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Sub-directory of the input folder receiving batch exports
    #[serde(default = "default_batch_subdir")]
    pub batch_subdir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            batch_subdir: default_batch_subdir(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_merge_threshold() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_batch_subdir() -> String {
    "output".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let threshold = self.extraction.merge_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(anyhow!("Merge threshold must be a finite non-negative number, got {}", threshold));
        }

        if self.output.batch_subdir.trim().is_empty() {
            return Err(anyhow!("Batch output sub-directory must not be empty"));
        }

        Ok(())
    }
}
