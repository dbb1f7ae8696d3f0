//! Configuration for gpgbatch
//!
//! Settings are layered with figment (see [`core`]): embedded defaults, user
//! and repository config files, an explicit `--config` file, `GPGBATCH_`
//! environment variables and finally command-line flags.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::decrypt::DatasetLayout;

pub mod core;
pub mod overrides;
pub mod smart_load;


pub use overrides::{ConfigOverrides, GpgOverrides};

/// Effective settings for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root holding one subdirectory per dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Root under which per-dataset output directories are created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Directory receiving `decryption_summary_<dataset>.csv` files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,

    /// Datasets to process, in order
    #[serde(default)]
    pub datasets: Vec<String>,

    /// Parallel invocations per dataset (0 = one per CPU core)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Encrypted file extension, without the dot
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Show a progress bar on interactive terminals
    #[serde(default = "default_progress")]
    pub progress: bool,

    #[serde(default)]
    pub gpg: GpgConfig,
}

/// How to run the decryption tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpgConfig {
    /// Program name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra arguments placed before `--output`
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_workers() -> usize {
    4
}

fn default_suffix() -> String {
    "gpg".to_string()
}

fn default_progress() -> bool {
    true
}

fn default_program() -> String {
    "gpg".to_string()
}

impl Default for GpgConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            summary: None,
            datasets: Vec::new(),
            workers: default_workers(),
            suffix: default_suffix(),
            progress: default_progress(),
            gpg: GpgConfig::default(),
        }
    }
}

/// Output format for `gpgbatch config`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl Config {
    /// Check settings every command relies on
    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            bail!("suffix cannot be empty");
        }
        if self.suffix.contains('.') || self.suffix.contains(std::path::MAIN_SEPARATOR) {
            bail!("suffix must be a bare extension such as \"gpg\", got \"{}\"", self.suffix);
        }
        if self.gpg.program.trim().is_empty() {
            bail!("gpg.program cannot be empty");
        }
        Ok(())
    }

    /// Directory layout for a batch run; fails when a directory is not configured
    pub fn layout(&self) -> Result<DatasetLayout> {
        let (Some(input), Some(output), Some(summary)) = (&self.input, &self.output, &self.summary)
        else {
            let missing: Vec<&str> = [
                ("input", self.input.is_none()),
                ("output", self.output.is_none()),
                ("summary", self.summary.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();
            bail!("missing required directories: {}", missing.join(", "));
        };

        Ok(DatasetLayout::new(input, output, summary))
    }

    /// Datasets for a batch run; fails when none are configured
    pub fn require_datasets(&self) -> Result<&[String]> {
        if self.datasets.is_empty() {
            bail!("no datasets given; pass --datasets or set `datasets` in the config file");
        }
        Ok(&self.datasets)
    }

    pub fn export(&self, format: ConfigFormat) -> Result<String> {
        let output = match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(output)
    }
}
