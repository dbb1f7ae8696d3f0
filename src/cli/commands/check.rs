use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::cli::Output;
use crate::config::{Config, ConfigOverrides, GpgOverrides};
use crate::external::GpgCommand;

#[derive(Args)]
pub struct CheckArgs {
    /// Decryption program to check
    #[arg(long, value_name = "PROGRAM")]
    pub gpg: Option<String>,
}

pub fn execute(args: CheckArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let overrides = ConfigOverrides {
        gpg: GpgOverrides { program: args.gpg },
        ..Default::default()
    };
    let config = Config::load(config_path, Some(&overrides))?;
    let command = GpgCommand::from_config(&config.gpg);

    let path = command.check_installed()?;
    output.success(&format!("{} is available", command.program()));
    output.key_value("path", &path.display().to_string(), true);
    Ok(())
}
