use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::path::{Path, PathBuf};

use super::{Config, ConfigOverrides, smart_load};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-local config file, read from the working directory
pub const REPO_CONFIG_FILE: &str = "gpgbatch.toml";

/// Prefix for environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "GPGBATCH_";

impl Config {
    /// Load, merge and validate every configuration source
    pub fn load(custom_config: Option<&Path>, cli_overrides: Option<&ConfigOverrides>) -> Result<Self> {
        let figment = Self::figment(custom_config, cli_overrides)?;

        let config: Config = figment
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Merge chain, lowest priority first
    pub fn figment(custom_config: Option<&Path>, cli_overrides: Option<&ConfigOverrides>) -> Result<Figment> {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(Self::user_config_path()))
            .merge(Toml::file(REPO_CONFIG_FILE));

        if let Some(path) = custom_config {
            // An explicitly requested file must exist; the implicit ones above are optional
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(smart_load::auto(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    fn user_config_path() -> PathBuf {
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config/gpgbatch/config.toml"),
            Err(_) => PathBuf::from("~/.config/gpgbatch/config.toml"),
        }
    }
}
