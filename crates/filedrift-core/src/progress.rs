use crate::planner::ScanMode;

/// Trait for reporting comparison progress.
///
/// The CLI implements this with indicatif spinners; library callers that
/// want no output use [`SilentReporter`]. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_source_scan_start(&self) {}
    fn on_source_scan_complete(&self, _total_files: usize, _skipped: usize, _duration_secs: f64) {}
    fn on_target_scan_start(&self, _mode: ScanMode) {}
    fn on_target_scan_complete(&self, _total_files: usize, _skipped: usize, _duration_secs: f64) {}
    fn on_compare_start(&self) {}
    fn on_compare_complete(&self, _results: usize, _duplicate_groups: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
