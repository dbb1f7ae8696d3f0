//! Batch decryption orchestration
//!
//! Layered leaf-first:
//!
//! - [`DecryptionInvoker`] turns one [`FileTask`] into one [`DecryptionOutcome`]
//!   by calling a [`DecryptionBackend`] (gpg in production).
//! - [`crate::parallel::WorkerPool`] runs many invocations with a fixed bound.
//! - [`DatasetProcessor`] discovers a dataset's files, runs the pool, computes
//!   [`DatasetStats`] and writes the CSV summary.
//! - [`BatchCoordinator`] walks datasets in order and keeps going when one fails.
//!
//! Every processing call returns its own report value; nothing is accumulated
//! between calls.

pub mod batch;
pub mod dataset;
pub mod invoker;
pub mod summary;
pub mod types;

pub use batch::{BatchCoordinator, decrypt_single_file};
pub use dataset::{DatasetLayout, DatasetProcessor};
pub use invoker::{DecryptionBackend, DecryptionInvoker, Invocation};
pub use types::{
    BatchReport, DatasetFailure, DatasetReport, DatasetStats, DecryptionOutcome, FileReport,
    FileTask, OutcomeStatus,
};
