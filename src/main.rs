use anyhow::Result;
use clap::Parser;

use gpgbatch::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
