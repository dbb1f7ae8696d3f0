//! Command-line interface for gpgbatch
//!
//! Thin wrapper around the library: parses arguments with clap, installs
//! logging, loads configuration and hands off to the command modules.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod output;

pub use output::Output;

/// Batch-decrypt GnuPG files across dataset folders
#[derive(Parser)]
#[command(name = "gpgbatch", author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (toml, json or yaml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logs and non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decrypt every dataset listed, writing one CSV summary per dataset
    Decrypt(commands::decrypt::DecryptArgs),
    /// Decrypt a single file into a directory
    File(commands::file::FileArgs),
    /// Check that the decryption tool is installed
    Check(commands::check::CheckArgs),
    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Commands::Decrypt(args) => commands::decrypt::execute(args, config_path, &output),
            Commands::File(args) => commands::file::execute(args, config_path, &output),
            Commands::Check(args) => commands::check::execute(args, config_path, &output),
            Commands::Config(args) => commands::config::execute(args, config_path),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("info"),
            1 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so `--format json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decrypt() {
        let cli = Cli::try_parse_from([
            "gpgbatch", "-v", "decrypt", "--input", "/in", "--output", "/out", "--summary", "/rep",
            "--datasets", "alpha", "beta", "--workers", "8",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        let Commands::Decrypt(args) = cli.command else {
            panic!("expected decrypt");
        };
        assert_eq!(args.datasets, vec!["alpha", "beta"]);
        assert_eq!(args.workers, Some(8));
    }
}
