use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::{Config, ConfigOverrides, GpgOverrides};
use crate::external::GpgCommand;

#[derive(Args)]
pub struct DecryptArgs {
    /// Root directory holding one folder per dataset
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Root directory for decrypted output
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory for the per-dataset CSV summaries
    #[arg(short, long, value_name = "DIR")]
    pub summary: Option<PathBuf>,

    /// Dataset names to process, in order
    #[arg(short, long, num_args = 1.., value_name = "NAME")]
    pub datasets: Vec<String>,

    /// Parallel decryptions per dataset (0 = one per CPU core)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Encrypted file extension, without the dot
    #[arg(long)]
    pub suffix: Option<String>,

    /// Decryption program to run
    #[arg(long, value_name = "PROGRAM")]
    pub gpg: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Report format printed when the run finishes
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl DecryptArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            summary: self.summary.clone(),
            datasets: self.datasets.clone(),
            workers: self.workers,
            suffix: self.suffix.clone(),
            progress: self.no_progress.then_some(false),
            gpg: GpgOverrides {
                program: self.gpg.clone(),
            },
        }
    }
}

pub fn execute(args: DecryptArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = Config::load(config_path, Some(&args.overrides()))?;
    let layout = config.layout()?;
    let datasets = config.require_datasets()?;

    // A missing tool would fail every file, so stop before touching any dataset
    let tool_path = GpgCommand::from_config(&config.gpg).check_installed()?;
    tracing::debug!("using decryption tool at {}", tool_path.display());

    let show_progress = config.progress && !output.is_quiet() && args.format == ReportFormat::Text;
    let coordinator = super::gpg_coordinator(&config, layout, show_progress);
    let report = coordinator.run(datasets);

    match args.format {
        ReportFormat::Text => output.batch_report(&report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
