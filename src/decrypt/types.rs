use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output name recorded for a file whose decryption failed
pub const FAILED_OUTPUT_NAME: &str = "Decryption Failed";

/// Status text recorded for a successful decryption
pub const SUCCESS_STATUS: &str = "Success";

/// One file to decrypt and the directory its plaintext goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub source_path: PathBuf,
    pub output_directory: PathBuf,
}

impl FileTask {
    pub fn new(source_path: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory: output_directory.into(),
        }
    }

    /// File name of the encrypted source
    pub fn source_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Plaintext file name: the source name with its final suffix stripped.
    ///
    /// `report.csv.gpg` becomes `report.csv`; a name without a suffix is kept as is.
    pub fn output_name(&self) -> String {
        self.source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_directory.join(self.output_name())
    }
}

/// How the decryption of one file ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success { output_name: String, output_bytes: u64 },
    Failure { detail: String },
}

/// Structured result of attempting to decrypt one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptionOutcome {
    pub source_name: String,
    pub input_bytes: u64,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl DecryptionOutcome {
    pub fn success(
        source_name: impl Into<String>,
        output_name: impl Into<String>,
        input_bytes: u64,
        output_bytes: u64,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            input_bytes,
            status: OutcomeStatus::Success {
                output_name: output_name.into(),
                output_bytes,
            },
        }
    }

    /// A failed decryption. A detail equal to [`SUCCESS_STATUS`] is prefixed so
    /// the summary's status column stays unambiguous.
    pub fn failure(source_name: impl Into<String>, input_bytes: u64, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if detail == SUCCESS_STATUS {
            detail = format!("decryption failed: {detail}");
        }

        Self {
            source_name: source_name.into(),
            input_bytes,
            status: OutcomeStatus::Failure { detail },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }

    /// Decrypted file name, or [`FAILED_OUTPUT_NAME`] when nothing usable was produced
    pub fn output_name(&self) -> &str {
        match &self.status {
            OutcomeStatus::Success { output_name, .. } => output_name,
            OutcomeStatus::Failure { .. } => FAILED_OUTPUT_NAME,
        }
    }

    pub fn output_bytes(&self) -> u64 {
        match &self.status {
            OutcomeStatus::Success { output_bytes, .. } => *output_bytes,
            OutcomeStatus::Failure { .. } => 0,
        }
    }

    /// Text written to the summary's status column
    pub fn status_text(&self) -> &str {
        match &self.status {
            OutcomeStatus::Success { .. } => SUCCESS_STATUS,
            OutcomeStatus::Failure { detail } => detail,
        }
    }
}

/// Aggregate counts for one dataset run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl DatasetStats {
    pub fn from_outcomes(outcomes: &[DecryptionOutcome], elapsed: Duration) -> Self {
        let succeeded = outcomes.iter().filter(|outcome| outcome.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            elapsed,
        }
    }

    /// Elapsed time as `Xm Ys`
    pub fn elapsed_display(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn serialize_secs<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Result of processing one dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub dataset: String,
    pub stats: DatasetStats,
    pub summary_path: PathBuf,
    pub outcomes: Vec<DecryptionOutcome>,
}

/// A dataset that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct DatasetFailure {
    pub dataset: String,
    pub error: String,
}

/// Result of one batch run across datasets, in processing order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub completed: Vec<DatasetReport>,
    pub skipped: Vec<String>,
    pub failed: Vec<DatasetFailure>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Result of the single-file path
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub outcome: DecryptionOutcome,
    pub stats: DatasetStats,
}

/// Summary file location for a dataset
pub fn summary_file_name(dataset: &str) -> String {
    format!("decryption_summary_{dataset}.csv")
}

pub fn summary_path(summary_dir: &Path, dataset: &str) -> PathBuf {
    summary_dir.join(summary_file_name(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_strips_only_final_suffix() {
        let task = FileTask::new("/in/alpha/report.csv.gpg", "/out/alpha");
        assert_eq!(task.source_name(), "report.csv.gpg");
        assert_eq!(task.output_name(), "report.csv");
        assert_eq!(task.output_path(), PathBuf::from("/out/alpha/report.csv"));
    }

    #[test]
    fn test_failure_views() {
        let outcome = DecryptionOutcome::failure("a.gpg", 42, "bad passphrase");
        assert!(!outcome.is_success());
        assert_eq!(outcome.output_name(), FAILED_OUTPUT_NAME);
        assert_eq!(outcome.output_bytes(), 0);
        assert_eq!(outcome.status_text(), "bad passphrase");
    }

    #[test]
    fn test_stats_from_outcomes() {
        let outcomes = vec![
            DecryptionOutcome::success("a.gpg", "a", 10, 8),
            DecryptionOutcome::success("b.gpg", "b", 10, 8),
            DecryptionOutcome::failure("c.gpg", 10, "bad passphrase"),
        ];
        let stats = DatasetStats::from_outcomes(&outcomes, Duration::from_secs(125));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.succeeded + stats.failed, stats.total);
        assert_eq!(stats.elapsed_display(), "2m 5s");
    }

    #[test]
    fn test_summary_path() {
        let path = summary_path(Path::new("/reports"), "alpha");
        assert_eq!(path, PathBuf::from("/reports/decryption_summary_alpha.csv"));
    }
}
