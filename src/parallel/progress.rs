use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal progress bar for one dataset run.
///
/// Hidden unless enabled and stderr is a terminal, so logs and piped
/// output stay clean.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(label: &str, total: usize, enabled: bool) -> Self {
        let bar = ProgressBar::new(total as u64);

        if enabled && Term::stderr().is_term() {
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            bar.set_style(style);
            bar.set_message(label.to_string());
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }

        Self { bar }
    }

    /// Matches the worker pool's `(completed, total, worker_id)` callback
    pub fn update(&self, completed: usize, _total: usize, _worker_id: usize) {
        self.bar.set_position(completed as u64);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
