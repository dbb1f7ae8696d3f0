use std::path::Path;

use super::types::{DecryptionOutcome, FileTask};

/// What the external tool reported for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub success: bool,
    /// Human readable exit status, e.g. `exit status: 2`
    pub exit_status: String,
    pub stderr: String,
}

/// An external capability that decrypts `source` into `destination`.
///
/// Implementations only report what happened; deciding whether a file counts
/// as decrypted is the job of [`DecryptionInvoker`].
pub trait DecryptionBackend: Send + Sync {
    fn decrypt(&self, source: &Path, destination: &Path) -> std::io::Result<Invocation>;
}

impl<B: DecryptionBackend + ?Sized> DecryptionBackend for &B {
    fn decrypt(&self, source: &Path, destination: &Path) -> std::io::Result<Invocation> {
        (**self).decrypt(source, destination)
    }
}

/// Turns one [`FileTask`] into exactly one [`DecryptionOutcome`].
///
/// Never fails: every error for a single file ends up in the outcome.
pub struct DecryptionInvoker<B> {
    backend: B,
}

impl<B: DecryptionBackend> DecryptionInvoker<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn invoke(&self, task: &FileTask) -> DecryptionOutcome {
        let source_name = task.source_name();
        let output_name = task.output_name();
        let output_path = task.output_path();

        let input_bytes = match std::fs::metadata(&task.source_path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::debug!(file = %source_name, error = %e, "cannot stat encrypted file");
                return DecryptionOutcome::failure(source_name, 0, format!("cannot read input file: {e}"));
            }
        };

        // `--yes` would let the tool overwrite its own input
        if is_same_file(&task.source_path, &output_path) {
            tracing::warn!(file = %source_name, "output path is the input file, not decrypting");
            return DecryptionOutcome::failure(source_name, input_bytes, "output path is the input file");
        }

        let invocation = match self.backend.decrypt(&task.source_path, &output_path) {
            Ok(invocation) => invocation,
            Err(e) => {
                tracing::debug!(file = %source_name, error = %e, "decryption tool could not be started");
                return DecryptionOutcome::failure(
                    source_name,
                    input_bytes,
                    format!("failed to run decryption tool: {e}"),
                );
            }
        };

        // The tool may report success without writing anything
        let output_bytes = match std::fs::metadata(&output_path) {
            Ok(metadata) if invocation.success && metadata.is_file() => Some(metadata.len()),
            _ => None,
        };

        match output_bytes {
            Some(output_bytes) => {
                tracing::debug!(file = %source_name, output = %output_name, "decrypted");
                DecryptionOutcome::success(source_name, output_name, input_bytes, output_bytes)
            }
            None => {
                let detail = failure_detail(&invocation);
                tracing::debug!(file = %source_name, detail = %detail, "decryption failed");
                DecryptionOutcome::failure(source_name, input_bytes, detail)
            }
        }
    }
}

/// Both paths resolve to the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn failure_detail(invocation: &Invocation) -> String {
    let stderr = invocation.stderr.trim();
    if !stderr.is_empty() {
        stderr.to_string()
    } else if invocation.success {
        "no output file produced".to_string()
    } else {
        format!("decryption tool exited with {}", invocation.exit_status)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;
    use crate::decrypt::types::{FAILED_OUTPUT_NAME, OutcomeStatus};
    use tempfile::TempDir;

    fn task_for(dir: &TempDir, name: &str, content: &[u8]) -> FileTask {
        let source = dir.path().join(name);
        std::fs::write(&source, content).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        FileTask::new(source, out)
    }

    #[test]
    fn test_success_records_both_sizes() {
        let dir = TempDir::new().unwrap();
        let task = task_for(&dir, "data.txt.gpg", b"0123456789");
        let invoker = DecryptionInvoker::new(ScriptedBackend::new());

        let outcome = invoker.invoke(&task);

        assert_eq!(outcome, DecryptionOutcome::success("data.txt.gpg", "data.txt", 10, 5));
        assert!(dir.path().join("out/data.txt").exists());
    }

    #[test]
    fn test_nonzero_exit_uses_trimmed_stderr() {
        let dir = TempDir::new().unwrap();
        let task = task_for(&dir, "data.gpg", b"0123456789");
        let invoker =
            DecryptionInvoker::new(ScriptedBackend::new().failing("data.gpg", "\n  bad passphrase \n"));

        let outcome = invoker.invoke(&task);

        assert_eq!(outcome.status_text(), "bad passphrase");
        assert_eq!(outcome.output_name(), FAILED_OUTPUT_NAME);
        assert_eq!(outcome.output_bytes(), 0);
        assert_eq!(outcome.input_bytes, 10);
    }

    #[test]
    fn test_success_without_output_is_failure() {
        let dir = TempDir::new().unwrap();
        let task = task_for(&dir, "data.gpg", b"0123456789");
        let invoker = DecryptionInvoker::new(ScriptedBackend::new().silent("data.gpg"));

        let outcome = invoker.invoke(&task);

        assert_eq!(
            outcome.status,
            OutcomeStatus::Failure {
                detail: "no output file produced".to_string()
            }
        );
    }

    #[test]
    fn test_empty_stderr_falls_back_to_exit_status() {
        let dir = TempDir::new().unwrap();
        let task = task_for(&dir, "data.gpg", b"0123456789");
        let invoker = DecryptionInvoker::new(ScriptedBackend::new().failing("data.gpg", "   "));

        let outcome = invoker.invoke(&task);

        assert_eq!(outcome.status_text(), "decryption tool exited with exit status: 2");
    }

    #[test]
    fn test_missing_source_is_captured() {
        let dir = TempDir::new().unwrap();
        let task = FileTask::new(dir.path().join("gone.gpg"), dir.path());
        let backend = ScriptedBackend::new();
        let invoker = DecryptionInvoker::new(&backend);

        let outcome = invoker.invoke(&task);

        assert!(!outcome.is_success());
        assert!(outcome.status_text().starts_with("cannot read input file"));
        assert_eq!(backend.call_count(), 0);
    }
}
