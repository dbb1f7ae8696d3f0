use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use super::dataset::DatasetProcessor;
use super::invoker::{DecryptionBackend, DecryptionInvoker};
use super::types::{BatchReport, DatasetFailure, DatasetStats, FileReport, FileTask};

/// Runs datasets one after another, parallel only within a dataset
pub struct BatchCoordinator<B> {
    processor: DatasetProcessor<B>,
}

impl<B: DecryptionBackend> BatchCoordinator<B> {
    pub fn new(processor: DatasetProcessor<B>) -> Self {
        Self { processor }
    }

    /// Process `datasets` in the given order.
    ///
    /// A dataset that fails is logged and recorded; the remaining datasets
    /// are still processed.
    pub fn run<S: AsRef<str>>(&self, datasets: &[S]) -> BatchReport {
        let mut report = BatchReport::default();

        for dataset in datasets {
            let dataset = dataset.as_ref();
            match self.processor.process(dataset) {
                Ok(Some(dataset_report)) => report.completed.push(dataset_report),
                Ok(None) => report.skipped.push(dataset.to_string()),
                Err(e) => {
                    tracing::error!("Error processing dataset '{dataset}': {e:#}");
                    report.failed.push(DatasetFailure {
                        dataset: dataset.to_string(),
                        error: format!("{e:#}"),
                    });
                }
            }
        }

        report
    }

    /// Decrypt exactly one file into `output_dir` with this coordinator's backend
    pub fn decrypt_single_file(&self, file: &Path, output_dir: &Path) -> Result<FileReport> {
        decrypt_single_file(self.processor.invoker(), file, output_dir)
    }
}

/// Decrypt exactly one file into `output_dir`, bypassing dataset discovery.
///
/// Needs no dataset layout; stats are those of a one-task batch.
pub fn decrypt_single_file<B: DecryptionBackend>(
    invoker: &DecryptionInvoker<B>,
    file: &Path,
    output_dir: &Path,
) -> Result<FileReport> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let task = FileTask::new(file, output_dir);
    let start = Instant::now();
    let outcome = invoker.invoke(&task);
    let stats = DatasetStats::from_outcomes(std::slice::from_ref(&outcome), start.elapsed());

    tracing::info!(
        file = %outcome.source_name,
        output = %outcome.output_name(),
        status = %outcome.status_text(),
        "Single file decryption result"
    );

    Ok(FileReport { outcome, stats })
}
