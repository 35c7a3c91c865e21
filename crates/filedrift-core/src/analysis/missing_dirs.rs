use crate::matching::{Comparison, MatchStatus};
use indexmap::IndexMap;

/// Roll-up for one top-level source subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySummary {
    /// Directory name, original case.
    pub name: String,
    pub total_files: usize,
    pub missing_files: usize,
    pub total_bytes: u64,
}

/// Top-level source subdirectories whose files are all absent on target,
/// sorted by lowercased name.
///
/// The threshold is strict: a directory qualifies only when every file
/// under it is `only_on_source`. Moved files and source duplicates count
/// toward the total but not toward missing, so a directory whose content
/// was found elsewhere is not reported. Files directly at the source root
/// have no directory to attribute and are left out.
pub fn entirely_missing_directories(comparisons: &[Comparison]) -> Vec<DirectorySummary> {
    let mut stats: IndexMap<String, DirectorySummary> = IndexMap::new();

    for comparison in comparisons {
        let Some(dir) = comparison.source.top_level_dir() else {
            continue;
        };
        let entry = stats
            .entry(dir.to_lowercase())
            .or_insert_with(|| DirectorySummary {
                name: dir.to_string(),
                total_files: 0,
                missing_files: 0,
                total_bytes: 0,
            });
        entry.total_files += 1;
        entry.total_bytes += comparison.source.size;
        if comparison.status == MatchStatus::OnlyOnSource {
            entry.missing_files += 1;
        }
    }

    let mut missing: Vec<DirectorySummary> = stats
        .into_values()
        .filter(|summary| summary.total_files > 0 && summary.missing_files == summary.total_files)
        .collect();
    missing.sort_by_key(|summary| summary.name.to_lowercase());
    missing
}
