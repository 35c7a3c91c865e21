use crate::analysis::missing_dirs::{self, DirectorySummary};
use crate::config::AppConfig;
use crate::error::Error;
use crate::matching::{self, Comparison, Confidence, MatchStatus, TargetIndex};
use crate::planner::{self, ScanMode, ScanPlan};
use crate::progress::ProgressReporter;
use crate::scanner;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// End-to-end comparison of one source tree against one target tree.
///
/// The run is a pure function of the two trees plus the scan mode: three
/// strictly sequential phases (source scan, plan + target scan, compare),
/// each consuming the immutable output of the previous one. Nothing is
/// persisted; report writing is the caller's concern.
pub struct DriftEngine {
    config: AppConfig,
    source_root: PathBuf,
    target_root: PathBuf,
    mode: ScanMode,
}

#[derive(Debug)]
pub struct DriftResult {
    pub mode: ScanMode,
    pub source_scan_duration: Duration,
    pub target_scan_duration: Duration,
    pub compare_duration: Duration,
    pub source_files: usize,
    pub target_files: usize,
    pub source_skipped: usize,
    pub target_skipped: usize,
    pub source_root_files: usize,
    pub source_subdirs: Vec<String>,
    pub comparisons: Vec<Comparison>,
    pub duplicate_groups: usize,
    pub entirely_missing_dirs: Vec<DirectorySummary>,
    pub plan: ScanPlan,
    /// The source inventory had zero files. Usually a misconfigured path;
    /// the run still completes with a near-empty result.
    pub empty_source: bool,
}

impl DriftResult {
    pub fn count_status(&self, status: MatchStatus) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.status == status)
            .count()
    }

    pub fn count_moved_with(&self, confidence: Confidence) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.status == MatchStatus::Moved && c.confidence == Some(confidence))
            .count()
    }
}

impl DriftEngine {
    pub fn new(
        config: AppConfig,
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        mode: ScanMode,
    ) -> Self {
        Self {
            config,
            source_root: source_root.into(),
            target_root: target_root.into(),
            mode,
        }
    }

    /// Run the full comparison pipeline:
    /// 1. Scan the source tree
    /// 2. Plan the target scan from the source's top-level subdirs, scan
    /// 3. Index the target, classify every source file, roll up
    ///    entirely-missing directories
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<DriftResult, Error> {
        validate_directory(&self.source_root)?;
        validate_directory(&self.target_root)?;

        // Phase 1: source scan
        info!("Scanning source {}...", self.source_root.display());
        reporter.on_source_scan_start();
        let scan_start = Instant::now();
        let source =
            scanner::scan_directory(&self.source_root, None, &self.config.ignore_patterns);
        let source_scan_duration = scan_start.elapsed();
        reporter.on_source_scan_complete(
            source.files.len(),
            source.skipped,
            source_scan_duration.as_secs_f64(),
        );
        debug!(
            "Source scan completed in {:.2}s — {} files, {} root files, {} subdirs, {} skipped",
            source_scan_duration.as_secs_f64(),
            source.files.len(),
            source.root_files,
            source.top_level_subdirs.len(),
            source.skipped,
        );

        let empty_source = source.files.is_empty();
        if empty_source {
            warn!(
                "No files found under source {}",
                self.source_root.display()
            );
        }

        // Phase 2: plan, then target scan
        let plan = planner::plan(&source.top_level_subdirs, &self.target_root, self.mode);
        if !plan.missing_on_target.is_empty() {
            info!(
                "{} source subdirectories have no counterpart on target",
                plan.missing_on_target.len()
            );
        }
        info!(
            "Scanning target {} ({} mode)...",
            self.target_root.display(),
            self.mode.as_str()
        );
        reporter.on_target_scan_start(self.mode);
        let target_start = Instant::now();
        let target = scanner::scan_directory(
            &self.target_root,
            plan.subdirs_to_scan.as_ref(),
            &self.config.ignore_patterns,
        );
        let target_scan_duration = target_start.elapsed();
        reporter.on_target_scan_complete(
            target.files.len(),
            target.skipped,
            target_scan_duration.as_secs_f64(),
        );
        debug!(
            "Target scan completed in {:.2}s — {} files, {} skipped",
            target_scan_duration.as_secs_f64(),
            target.files.len(),
            target.skipped,
        );

        // Phase 3: index, compare, analyze
        info!("Comparing file inventories...");
        reporter.on_compare_start();
        let compare_start = Instant::now();
        let index = TargetIndex::build(&target);
        let comparisons = matching::compare(&source, &index);
        let duplicate_groups = matching::duplicate_group_count(&comparisons);
        let entirely_missing_dirs = missing_dirs::entirely_missing_directories(&comparisons);
        let compare_duration = compare_start.elapsed();
        reporter.on_compare_complete(
            comparisons.len(),
            duplicate_groups,
            compare_duration.as_secs_f64(),
        );
        debug!(
            "Comparison completed in {:.2}s — {} results, {} duplicate groups, {} dirs entirely missing",
            compare_duration.as_secs_f64(),
            comparisons.len(),
            duplicate_groups,
            entirely_missing_dirs.len(),
        );

        Ok(DriftResult {
            mode: self.mode,
            source_scan_duration,
            target_scan_duration,
            compare_duration,
            source_files: source.files.len(),
            target_files: target.files.len(),
            source_skipped: source.skipped,
            target_skipped: target.skipped,
            source_root_files: source.root_files,
            source_subdirs: source.top_level_subdirs.iter().cloned().collect(),
            comparisons,
            duplicate_groups,
            entirely_missing_dirs,
            plan,
            empty_source,
        })
    }
}

/// Both roots must exist and be directories before anything is scanned.
pub fn validate_directory(path: &Path) -> Result<(), Error> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
