//! External tools the decryptor shells out to

pub mod gpg;

pub use gpg::{GpgCommand, ToolError};
