//! Styled terminal output for command results
//!
//! Logs go through `tracing`; this is only for the final, human-facing
//! summary of what a command did.

use console::style;

use crate::decrypt::{BatchReport, DecryptionOutcome};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Errors are always shown, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<14} {}", style(key).dim(), styled_value);
        }
    }

    /// Per-file line, shown for failures always and for successes in verbose mode
    pub fn outcome(&self, outcome: &DecryptionOutcome) {
        if self.quiet {
            return;
        }
        if outcome.is_success() {
            if self.verbose {
                println!(
                    "    {} {} → {}",
                    style("✓").green(),
                    outcome.source_name,
                    outcome.output_name()
                );
            }
        } else {
            println!(
                "    {} {} {}",
                style("✗").red(),
                outcome.source_name,
                style(outcome.status_text()).dim()
            );
        }
    }

    /// Final report of a batch run
    pub fn batch_report(&self, report: &BatchReport) {
        self.header("Batch summary");

        for dataset in &report.completed {
            let stats = &dataset.stats;
            let line = format!(
                "{}: {} files, {} decrypted, {} failed in {}",
                dataset.dataset,
                stats.total,
                stats.succeeded,
                stats.failed,
                stats.elapsed_display()
            );
            if stats.failed == 0 {
                self.success(&line);
            } else {
                self.warning(&line);
            }
            for outcome in &dataset.outcomes {
                self.outcome(outcome);
            }
            self.key_value("summary", &dataset.summary_path.display().to_string(), false);
        }

        for dataset in &report.skipped {
            self.warning(&format!("{dataset}: skipped, no eligible files"));
        }

        for failure in &report.failed {
            self.error(&format!("{}: {}", failure.dataset, failure.error));
        }
    }
}
