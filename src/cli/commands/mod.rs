//! Command implementations for the gpgbatch CLI
//!
//! Each subcommand lives in its own module and follows the same flow: turn
//! flags into [`ConfigOverrides`], load the layered config, then call into
//! the library.

use crate::config::Config;
use crate::decrypt::{BatchCoordinator, DatasetLayout, DatasetProcessor};
use crate::external::GpgCommand;
use crate::parallel::WorkerPool;

pub mod check;
pub mod config;
pub mod decrypt;
pub mod file;

/// Wire a coordinator around gpg using the effective config
pub(crate) fn gpg_coordinator(
    config: &Config,
    layout: DatasetLayout,
    show_progress: bool,
) -> BatchCoordinator<GpgCommand> {
    let backend = GpgCommand::from_config(&config.gpg);
    let pool = WorkerPool::from_config(config.workers);
    tracing::debug!(workers = pool.max_workers(), program = backend.program(), "building coordinator");

    let processor = DatasetProcessor::new(backend, pool, layout, config.suffix.as_str())
        .with_progress(show_progress);
    BatchCoordinator::new(processor)
}
