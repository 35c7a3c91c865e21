use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::warn;

/// How much of the target tree a comparison run traverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Only target top-level subdirectories that also exist on the source.
    Smart,
    /// The whole target tree.
    Full,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Smart => "smart",
            ScanMode::Full => "full",
        }
    }
}

/// Which target subdirectories a run will traverse, decided from metadata
/// alone before any target files are scanned.
#[derive(Debug, Default)]
pub struct ScanPlan {
    /// Target top-level directories to scan, using the target's actual
    /// spelling. `None` means the whole tree (full mode).
    pub subdirs_to_scan: Option<BTreeSet<String>>,
    /// Target top-level directories smart mode leaves untraversed because
    /// the source has no counterpart.
    pub skipped_target_subdirs: Vec<String>,
    /// Source top-level directories with no counterpart under the target
    /// root; their files can only match by filename elsewhere.
    pub missing_on_target: Vec<String>,
}

/// Decide which target top-level subdirectories must be scanned.
///
/// Names are intersected case-insensitively, so a source `Books` matches a
/// target `books`. The existence check lists the target root once and
/// touches no file contents.
pub fn plan(source_subdirs: &BTreeSet<String>, target_root: &Path, mode: ScanMode) -> ScanPlan {
    let target_subdirs = list_subdirs(target_root);
    let target_by_lower: BTreeMap<String, &String> = target_subdirs
        .iter()
        .map(|name| (name.to_lowercase(), name))
        .collect();
    let source_lower: BTreeSet<String> =
        source_subdirs.iter().map(|name| name.to_lowercase()).collect();

    let missing_on_target: Vec<String> = source_subdirs
        .iter()
        .filter(|name| !target_by_lower.contains_key(&name.to_lowercase()))
        .cloned()
        .collect();

    match mode {
        ScanMode::Full => ScanPlan {
            subdirs_to_scan: None,
            skipped_target_subdirs: Vec::new(),
            missing_on_target,
        },
        ScanMode::Smart => {
            let subdirs_to_scan: BTreeSet<String> = source_subdirs
                .iter()
                .filter_map(|name| target_by_lower.get(&name.to_lowercase()))
                .map(|name| (*name).clone())
                .collect();
            let skipped_target_subdirs: Vec<String> = target_subdirs
                .iter()
                .filter(|name| !source_lower.contains(&name.to_lowercase()))
                .cloned()
                .collect();

            ScanPlan {
                subdirs_to_scan: Some(subdirs_to_scan),
                skipped_target_subdirs,
                missing_on_target,
            }
        }
    }
}

fn list_subdirs(root: &Path) -> BTreeSet<String> {
    let mut subdirs = BTreeSet::new();
    match fs::read_dir(root) {
        Ok(entries) => {
            for entry in entries.flatten() {
                if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    subdirs.insert(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }
        Err(err) => warn!("Error listing {}: {}", root.display(), err),
    }
    subdirs
}
