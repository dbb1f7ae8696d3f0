use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::{Config, ConfigOverrides, GpgOverrides};
use crate::decrypt::{DecryptionInvoker, decrypt_single_file};
use crate::external::GpgCommand;

#[derive(Args)]
pub struct FileArgs {
    /// Encrypted file to decrypt
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory that receives the decrypted file
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Decryption program to run
    #[arg(long, value_name = "PROGRAM")]
    pub gpg: Option<String>,
}

pub fn execute(args: FileArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let overrides = ConfigOverrides {
        gpg: GpgOverrides {
            program: args.gpg.clone(),
        },
        ..Default::default()
    };
    let config = Config::load(config_path, Some(&overrides))?;
    let backend = GpgCommand::from_config(&config.gpg);
    backend.check_installed()?;

    let invoker = DecryptionInvoker::new(backend);
    let report = decrypt_single_file(&invoker, &args.file, &args.output)?;
    let outcome = &report.outcome;

    if outcome.is_success() {
        output.success(&format!(
            "{} → {}",
            outcome.source_name,
            args.output.join(outcome.output_name()).display()
        ));
        output.key_value("bytes", &format!("{} → {}", outcome.input_bytes, outcome.output_bytes()), false);
        output.key_value("time", &report.stats.elapsed_display(), false);
        Ok(())
    } else {
        output.error(&format!("{}: {}", outcome.source_name, outcome.status_text()));
        std::process::exit(1);
    }
}
