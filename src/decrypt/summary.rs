//! Per-dataset CSV summary files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{DecryptionOutcome, SUCCESS_STATUS};

/// One row of a summary file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Encrypted File")]
    pub encrypted_file: String,
    #[serde(rename = "Decrypted File")]
    pub decrypted_file: String,
    #[serde(rename = "Encrypted Bytes")]
    pub encrypted_bytes: u64,
    #[serde(rename = "Decrypted Bytes")]
    pub decrypted_bytes: u64,
    #[serde(rename = "Status")]
    pub status: String,
}

impl SummaryRow {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

impl From<&DecryptionOutcome> for SummaryRow {
    fn from(outcome: &DecryptionOutcome) -> Self {
        Self {
            encrypted_file: outcome.source_name.clone(),
            decrypted_file: outcome.output_name().to_string(),
            encrypted_bytes: outcome.input_bytes,
            decrypted_bytes: outcome.output_bytes(),
            status: outcome.status_text().to_string(),
        }
    }
}

/// Column header of every summary file
pub const SUMMARY_HEADER: [&str; 5] = [
    "Encrypted File",
    "Decrypted File",
    "Encrypted Bytes",
    "Decrypted Bytes",
    "Status",
];

/// Write the summary for one dataset, replacing any previous file
pub fn write_summary(path: &Path, outcomes: &[DecryptionOutcome]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create summary directory: {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;

    writer
        .write_record(SUMMARY_HEADER)
        .with_context(|| format!("Failed to write summary header: {}", path.display()))?;

    for outcome in outcomes {
        writer
            .serialize(SummaryRow::from(outcome))
            .with_context(|| format!("Failed to write summary row for {}", outcome.source_name))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush summary file: {}", path.display()))?;
    Ok(())
}

/// Read a summary file back
pub fn read_summary(path: &Path) -> Result<Vec<SummaryRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open summary file: {}", path.display()))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<SummaryRow>, _>>()
        .with_context(|| format!("Failed to parse summary file: {}", path.display()))
}

/// `(total, succeeded, failed)` recounted from summary rows
pub fn recount(rows: &[SummaryRow]) -> (usize, usize, usize) {
    let succeeded = rows.iter().filter(|row| row.is_success()).count();
    (rows.len(), succeeded, rows.len() - succeeded)
}
