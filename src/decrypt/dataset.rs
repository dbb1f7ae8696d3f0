use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::invoker::{DecryptionBackend, DecryptionInvoker};
use super::summary::write_summary;
use super::types::{DatasetReport, DatasetStats, FileTask, summary_path};
use crate::parallel::{ProgressReporter, WorkerPool};

/// Where datasets are read from and written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub summary_dir: PathBuf,
}

impl DatasetLayout {
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        summary_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            summary_dir: summary_dir.into(),
        }
    }

    pub fn input_dir(&self, dataset: &str) -> PathBuf {
        self.input_root.join(dataset)
    }

    pub fn output_dir(&self, dataset: &str) -> PathBuf {
        self.output_root.join(dataset)
    }

    pub fn summary_path(&self, dataset: &str) -> PathBuf {
        summary_path(&self.summary_dir, dataset)
    }
}

/// Decrypts every eligible file of one dataset and writes its summary
pub struct DatasetProcessor<B> {
    invoker: DecryptionInvoker<B>,
    pool: WorkerPool,
    layout: DatasetLayout,
    suffix: String,
    show_progress: bool,
}

impl<B: DecryptionBackend> DatasetProcessor<B> {
    pub fn new(backend: B, pool: WorkerPool, layout: DatasetLayout, suffix: impl Into<String>) -> Self {
        Self {
            invoker: DecryptionInvoker::new(backend),
            pool,
            layout,
            suffix: suffix.into(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn invoker(&self) -> &DecryptionInvoker<B> {
        &self.invoker
    }

    /// Process one dataset.
    ///
    /// Returns `Ok(None)` when the dataset has no eligible files; nothing is
    /// written in that case.
    pub fn process(&self, dataset: &str) -> Result<Option<DatasetReport>> {
        let input_dir = self.layout.input_dir(dataset);
        let output_dir = self.layout.output_dir(dataset);

        let files = self.eligible_files(&input_dir)?;
        if files.is_empty() {
            tracing::warn!(
                "No .{} files found in {}. Skipping.",
                self.suffix,
                input_dir.display()
            );
            return Ok(None);
        }

        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

        let tasks: Vec<FileTask> = files
            .into_iter()
            .map(|file| FileTask::new(file, &output_dir))
            .collect();
        warn_on_output_collisions(dataset, &tasks);

        let progress = ProgressReporter::new(dataset, tasks.len(), self.show_progress);
        let reporter = progress.clone();

        let start = Instant::now();
        let mut outcomes = self.pool.execute(
            tasks,
            |task, _worker_id| self.invoker.invoke(task),
            Some(move |completed: usize, total: usize, worker_id: usize| {
                reporter.update(completed, total, worker_id)
            }),
        )?;
        let elapsed = start.elapsed();
        progress.finish();

        let stats = DatasetStats::from_outcomes(&outcomes, elapsed);

        outcomes.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        let summary_path = self.layout.summary_path(dataset);
        write_summary(&summary_path, &outcomes)?;

        tracing::info!("Dataset: {dataset}");
        tracing::info!("Files Processed: {}", stats.total);
        tracing::info!("Successfully Decrypted: {}", stats.succeeded);
        tracing::info!("Failed Decryption: {}", stats.failed);
        tracing::info!("Time Taken: {}", stats.elapsed_display());
        tracing::info!("Summary CSV: {}", summary_path.display());

        Ok(Some(DatasetReport {
            dataset: dataset.to_string(),
            stats,
            summary_path,
            outcomes,
        }))
    }

    /// Regular files directly inside `input_dir` whose extension matches, sorted by name
    pub fn eligible_files(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(input_dir)
            .with_context(|| format!("Failed to read input directory: {}", input_dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to read entry in {}", input_dir.display()))?;
            let path = entry.path();

            let matches_suffix = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == self.suffix.as_str());
            if matches_suffix && path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        tracing::debug!(dir = %input_dir.display(), count = files.len(), "found eligible files");
        Ok(files)
    }
}

/// Two sources that strip to the same output name overwrite each other's plaintext.
/// This is reported, not resolved.
fn warn_on_output_collisions(dataset: &str, tasks: &[FileTask]) {
    let mut by_output: HashMap<String, Vec<String>> = HashMap::new();
    for task in tasks {
        by_output
            .entry(task.output_name())
            .or_default()
            .push(task.source_name());
    }

    for (output_name, sources) in by_output {
        if sources.len() > 1 {
            tracing::warn!(
                dataset,
                output = %output_name,
                "{} input files decrypt to the same output name: {}",
                sources.len(),
                sources.join(", ")
            );
        }
    }
}
