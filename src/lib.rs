//! # gpgbatch - batch decryption of GnuPG-encrypted datasets
//!
//! Walks a list of dataset folders, decrypts every `*.gpg` file in each with
//! a bounded pool of parallel `gpg` invocations, and writes one CSV summary
//! per dataset recording what happened to every file.
//!
//! ## Quick Start
//!
//! ```bash
//! gpgbatch decrypt --input /data/encrypted --output /data/plain \
//!     --summary /data/reports --datasets alpha beta --workers 8
//!
//! # Decrypt one file
//! gpgbatch file /data/encrypted/alpha/a.csv.gpg --output /tmp/plain
//! ```
//!
//! ## Library use
//!
//! The orchestration is independent of gpg: anything implementing
//! [`decrypt::DecryptionBackend`] can be plugged into a
//! [`decrypt::DatasetProcessor`].

pub mod cli;
pub mod config;
pub mod decrypt;
pub mod external;
pub mod parallel;

pub use cli::{Cli, Output};
pub use config::Config;

/// Result type alias for gpgbatch operations
pub type Result<T> = anyhow::Result<T>;

/// Crate version, as reported by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
