//! GnuPG as the external decryption capability

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::config::GpgConfig;
use crate::decrypt::{DecryptionBackend, Invocation};

/// The decryption tool is missing or broken. Fatal for the whole run,
/// unlike a single file failing to decrypt.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{program} is not installed or not available in PATH")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error("{program} was found at {} but could not be run: {detail}", path.display())]
    Unusable {
        program: String,
        path: PathBuf,
        detail: String,
    },
}

/// Runs `gpg --batch --yes --output <dest> --decrypt <src>` per file
#[derive(Debug, Clone)]
pub struct GpgCommand {
    program: String,
    extra_args: Vec<String>,
}

impl GpgCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &GpgConfig) -> Self {
        Self::new(config.program.clone()).with_extra_args(config.extra_args.clone())
    }

    /// Arguments inserted before `--output`, e.g. `--pinentry-mode loopback`
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self, source: &Path, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--batch".into(), "--yes".into()];
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push("--output".into());
        args.push(destination.as_os_str().to_owned());
        args.push("--decrypt".into());
        args.push(source.as_os_str().to_owned());
        args
    }

    /// Resolve the program on PATH and make sure `--version` runs
    pub fn check_installed(&self) -> Result<PathBuf, ToolError> {
        let path = which::which(&self.program).map_err(|source| ToolError::NotFound {
            program: self.program.clone(),
            source,
        })?;

        let unusable = |detail: String| ToolError::Unusable {
            program: self.program.clone(),
            path: path.clone(),
            detail,
        };

        let output = Command::new(&path)
            .arg("--version")
            .output()
            .map_err(|e| unusable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(unusable(if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            }));
        }

        tracing::debug!(program = %self.program, path = %path.display(), "decryption tool available");
        Ok(path)
    }
}

impl DecryptionBackend for GpgCommand {
    fn decrypt(&self, source: &Path, destination: &Path) -> std::io::Result<Invocation> {
        tracing::trace!(source = %source.display(), destination = %destination.display(), "running {}", self.program);

        let output = Command::new(&self.program)
            .args(self.args(source, destination))
            .output()?;

        Ok(Invocation {
            success: output.status.success(),
            exit_status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
