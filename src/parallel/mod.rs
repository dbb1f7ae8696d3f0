//! Bounded parallel execution
//!
//! A small producer/consumer worker pool built on crossbeam channels and
//! scoped threads. It knows nothing about decryption: callers hand it work
//! items and a processing function, and get back exactly one result per item
//! once every worker has finished.
//!
//! ```rust
//! use gpgbatch::parallel::WorkerPool;
//!
//! let pool = WorkerPool::new(4);
//! let mut doubled = pool
//!     .execute(vec![1, 2, 3], |x, _worker_id| x * 2, None::<fn(usize, usize, usize)>)
//!     .unwrap();
//! doubled.sort();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod core;
pub mod progress;

pub use self::core::WorkerPool;
pub use progress::ProgressReporter;
