//! Output formatting and progress reporting

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress and status output on stderr
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors and progress bars
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over the iteration budget
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.use_color {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Clear the progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.status(Status::Success, message);
        }
    }

    /// Print a failure message; shown even in quiet mode
    pub fn failure(&self, message: &str) {
        self.status(Status::Failure, message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.status(Status::Info, message);
        }
    }

    fn status(&self, status: Status, message: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {message}", status.prefix(self.use_color)));
    }
}

/// Kind of a one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
    Info,
}

impl Status {
    /// Glyph when colored, plain tag otherwise
    fn prefix(self, color: bool) -> String {
        match (self, color) {
            (Self::Success, true) => style("✓").green().bold().to_string(),
            (Self::Failure, true) => style("✗").red().bold().to_string(),
            (Self::Info, true) => style("ℹ").blue().bold().to_string(),
            (Self::Success, false) => "PASS".to_string(),
            (Self::Failure, false) => "FAIL".to_string(),
            (Self::Info, false) => "INFO".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_progress_bar() {
        let mut reporter = ProgressReporter::new(true, true);
        reporter.start_progress(100, "closing");
        assert!(reporter.progress_bar.is_none());
        reporter.increment(1);
        reporter.finish();
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let mut reporter = ProgressReporter::new(true, false);
        reporter.start_progress(10, "closing");
        assert!(reporter.progress_bar.is_some());
        reporter.increment(3);
        reporter.finish();
        assert!(reporter.progress_bar.is_none());
    }

    #[test]
    fn test_plain_prefixes() {
        assert_eq!(Status::Success.prefix(false), "PASS");
        assert_eq!(Status::Failure.prefix(false), "FAIL");
        assert_eq!(Status::Info.prefix(false), "INFO");
    }

    #[test]
    fn test_colored_prefixes_carry_glyphs() {
        assert!(Status::Success.prefix(true).contains('✓'));
        assert!(Status::Failure.prefix(true).contains('✗'));
        assert!(Status::Info.prefix(true).contains('ℹ'));
    }
}
