use crate::error::Error;
use crate::matching::{Comparison, Confidence, MatchKind, MatchStatus};
use serde::Serialize;
use std::path::Path;

const REPORT_HEADER: [&str; 10] = [
    "relative_path",
    "source_path",
    "source_size",
    "target_path",
    "target_size",
    "found_at_path",
    "match_type",
    "confidence",
    "status",
    "duplicate_group",
];

/// One CSV row. Field order is the report column order; absent optionals
/// render as empty fields.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub relative_path: String,
    pub source_path: String,
    pub source_size: u64,
    pub target_path: String,
    pub target_size: Option<u64>,
    pub found_at_path: String,
    pub match_type: MatchKind,
    pub confidence: Option<Confidence>,
    pub status: MatchStatus,
    pub duplicate_group: String,
}

/// Rows destined for the CSV plus the count the optional filter dropped.
#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub excluded_high_confidence: usize,
}

/// Shape comparisons into CSV rows.
///
/// `in_both` results are computed but never emitted. When
/// `exclude_high_confidence_moved` is set, moved rows with high confidence
/// are dropped as well and counted; source duplicates are kept regardless
/// of their confidence.
pub fn assemble(comparisons: &[Comparison], exclude_high_confidence_moved: bool) -> Report {
    let mut report = Report::default();

    for comparison in comparisons {
        if comparison.status == MatchStatus::InBoth {
            continue;
        }
        if exclude_high_confidence_moved
            && comparison.status == MatchStatus::Moved
            && comparison.confidence == Some(Confidence::High)
        {
            report.excluded_high_confidence += 1;
            continue;
        }

        report.rows.push(ReportRow {
            relative_path: comparison.source.relative_path.clone(),
            source_path: comparison.source.absolute_path.to_string_lossy().into_owned(),
            source_size: comparison.source.size,
            target_path: comparison
                .target
                .as_ref()
                .map(|t| t.target_path.to_string_lossy().into_owned())
                .unwrap_or_default(),
            target_size: comparison.target.as_ref().map(|t| t.target_size),
            found_at_path: comparison
                .target
                .as_ref()
                .map(|t| t.found_at.clone())
                .unwrap_or_default(),
            match_type: comparison.kind,
            confidence: comparison.confidence,
            status: comparison.status,
            duplicate_group: comparison.duplicate_group.join("; "),
        });
    }

    report
}

/// Write rows to `path`. The header is always present, even for an empty
/// report.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(REPORT_HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
