use super::TargetIndex;
use crate::scanner::{FileRecord, Inventory};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Where a source file stands relative to the target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    OnlyOnSource,
    Moved,
    DuplicateOnSource,
    InBoth,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::OnlyOnSource => "only_on_source",
            MatchStatus::Moved => "moved",
            MatchStatus::DuplicateOnSource => "duplicate_on_source",
            MatchStatus::InBoth => "in_both",
        }
    }
}

/// How the match (if any) was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactPath,
    FilenameSameSize,
    FilenameDiffSize,
    None,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::ExactPath => "exact_path",
            MatchKind::FilenameSameSize => "filename_same_size",
            MatchKind::FilenameDiffSize => "filename_diff_size",
            MatchKind::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
        }
    }
}

/// The target file a source file resolved to.
#[derive(Debug, Clone)]
pub struct TargetMatch {
    /// Normalized key of the matched target record.
    pub key: String,
    pub target_path: PathBuf,
    pub target_size: u64,
    /// Target-relative path, original case.
    pub found_at: String,
}

impl TargetMatch {
    fn new(record: &FileRecord) -> Self {
        Self {
            key: record.normalized_key(),
            target_path: record.absolute_path.clone(),
            target_size: record.size,
            found_at: record.relative_path.clone(),
        }
    }
}

/// One source file with its resolved match.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub source: FileRecord,
    pub status: MatchStatus,
    pub kind: MatchKind,
    pub confidence: Option<Confidence>,
    pub target: Option<TargetMatch>,
    /// Relative paths of the other source files sharing this file's
    /// (lowercased filename, size) signature. Empty unless the file was
    /// reclassified as a source duplicate.
    pub duplicate_group: Vec<String>,
}

/// Classify every source file against the target index, then run the
/// source-side duplicate pass. Results keep the source inventory's
/// traversal order, so identical trees yield identical reports.
///
/// Match priority per file: exact normalized path, then first same-size
/// filename candidate (high confidence), then first filename candidate by
/// insertion order (medium confidence), else no match.
pub fn compare(source: &Inventory, index: &TargetIndex<'_>) -> Vec<Comparison> {
    let mut comparisons: Vec<Comparison> = Vec::with_capacity(source.files.len());

    for (key, record) in &source.files {
        let comparison = if let Some(hit) = index.by_path(key) {
            Comparison {
                source: record.clone(),
                status: MatchStatus::InBoth,
                kind: MatchKind::ExactPath,
                confidence: None,
                target: Some(TargetMatch::new(hit)),
                duplicate_group: Vec::new(),
            }
        } else {
            let candidates = index.by_filename(&record.normalized_filename());
            match candidates.iter().find(|c| c.size == record.size) {
                Some(hit) => Comparison {
                    source: record.clone(),
                    status: MatchStatus::Moved,
                    kind: MatchKind::FilenameSameSize,
                    confidence: Some(Confidence::High),
                    target: Some(TargetMatch::new(hit)),
                    duplicate_group: Vec::new(),
                },
                None => match candidates.first() {
                    Some(hit) => Comparison {
                        source: record.clone(),
                        status: MatchStatus::Moved,
                        kind: MatchKind::FilenameDiffSize,
                        confidence: Some(Confidence::Medium),
                        target: Some(TargetMatch::new(hit)),
                        duplicate_group: Vec::new(),
                    },
                    None => Comparison {
                        source: record.clone(),
                        status: MatchStatus::OnlyOnSource,
                        kind: MatchKind::None,
                        confidence: None,
                        target: None,
                        duplicate_group: Vec::new(),
                    },
                },
            }
        };
        comparisons.push(comparison);
    }

    apply_duplicate_groups(&mut comparisons);
    comparisons
}

/// Group source files by (lowercased filename, size). In groups of two or
/// more, a member is reclassified as a source duplicate when it is
/// unmatched, or when it moved to a target file another member also
/// resolved to. An exact path match is ground truth and is never
/// reclassified.
fn apply_duplicate_groups(comparisons: &mut [Comparison]) {
    let mut groups: IndexMap<(String, u64), Vec<usize>> = IndexMap::new();
    for (i, comparison) in comparisons.iter().enumerate() {
        groups
            .entry((comparison.source.normalized_filename(), comparison.source.size))
            .or_default()
            .push(i);
    }

    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }

        let mut to_reclassify: Vec<usize> = Vec::new();
        for &i in members {
            let reclassify = match comparisons[i].status {
                MatchStatus::OnlyOnSource => true,
                MatchStatus::Moved => {
                    let key = comparisons[i].target.as_ref().map(|t| t.key.as_str());
                    members.iter().any(|&j| {
                        j != i
                            && comparisons[j].target.as_ref().map(|t| t.key.as_str()) == key
                    })
                }
                _ => false,
            };
            if reclassify {
                to_reclassify.push(i);
            }
        }

        for &i in &to_reclassify {
            let others: Vec<String> = members
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| comparisons[j].source.relative_path.clone())
                .collect();
            comparisons[i].status = MatchStatus::DuplicateOnSource;
            comparisons[i].duplicate_group = others;
        }
    }
}

/// Number of distinct (lowercased filename, size) groups that produced at
/// least one source duplicate.
pub fn duplicate_group_count(comparisons: &[Comparison]) -> usize {
    let mut groups: HashSet<(String, u64)> = HashSet::new();
    for comparison in comparisons {
        if comparison.status == MatchStatus::DuplicateOnSource {
            groups.insert((
                comparison.source.normalized_filename(),
                comparison.source.size,
            ));
        }
    }
    groups.len()
}
