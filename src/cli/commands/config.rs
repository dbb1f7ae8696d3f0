use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::config::{Config, ConfigFormat};

#[derive(Args)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    pub format: ConfigFormat,
}

/// Print the merged configuration, after every layer has been applied
pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path, None)?;
    print!("{}", config.export(args.format)?);
    Ok(())
}
