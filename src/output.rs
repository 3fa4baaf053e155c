//! Console output formatting.
//!
//! Centralizes all leveled CLI output: debug traces (shown only with
//! `--verbose`), info status lines, warnings for skip-and-retain
//! conditions, recoverable errors, and critical diagnostics for the fatal
//! paths. Warnings and info go to stdout; errors and criticals to stderr.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Leveled console formatter shared by the whole pipeline.
pub struct OutputFormatter {
    verbose: bool,
}

impl OutputFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Prints a verbose trace message; silent unless `--verbose` was given.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "DEBUG:".cyan().bold(), message);
        }
    }

    /// Prints a status/summary message.
    pub fn info(&self, message: &str) {
        println!("{} {}", "::".blue().bold(), message);
    }

    /// Prints a warning for a line that will be skipped and retained.
    pub fn warning(&self, message: &str) {
        println!("{} {}", "WARNING:".yellow().bold(), message);
    }

    /// Prints a recoverable error; the run continues and the error is
    /// counted in the final summary.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "ERROR:".red().bold(), message);
    }

    /// Prints a fatal diagnostic; the process exits nonzero afterwards.
    pub fn critical(&self, message: &str) {
        eprintln!("{} {}", "CRITICAL:".red().bold(), message);
    }

    /// Prints a section header (e.g. the move preview banner).
    pub fn header(&self, text: &str) {
        println!("{}", text.green().bold());
    }

    /// Prints one `source --> destination` preview line.
    pub fn preview(&self, source: &str, destination: &Path) {
        println!(
            "{} {} {}",
            source,
            "-->".magenta().bold(),
            destination.display()
        );
    }

    /// Creates the progress bar used while files are being moved.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }
}

/// Pluralization suffix for count-aware messages.
pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
