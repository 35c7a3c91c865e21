use filedrift_core::{ProgressReporter, ScanMode};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using indicatif spinners.
///
/// Every phase runs without a known total upfront (directory walks over
/// possibly slow network shares), so each gets a spinner with a finish
/// line on stderr.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(&self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_source_scan_start(&self) {
        self.spinner("Scanning source directory...");
    }

    fn on_source_scan_complete(&self, total_files: usize, skipped: usize, duration_secs: f64) {
        self.finish();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Source scan complete: {} files ({} skipped) in {:.2}s",
            total_files, skipped, duration_secs
        );
    }

    fn on_target_scan_start(&self, mode: ScanMode) {
        self.spinner(&format!("Scanning target directory ({} mode)...", mode.as_str()));
    }

    fn on_target_scan_complete(&self, total_files: usize, skipped: usize, duration_secs: f64) {
        self.finish();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Target scan complete: {} files ({} skipped) in {:.2}s",
            total_files, skipped, duration_secs
        );
    }

    fn on_compare_start(&self) {
        self.spinner("Comparing file inventories...");
    }

    fn on_compare_complete(&self, results: usize, duplicate_groups: usize, duration_secs: f64) {
        self.finish();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Comparison complete: {} results, {} duplicate groups in {:.2}s",
            results, duplicate_groups, duration_secs
        );
    }
}
