use filedrift_core::analysis::missing_dirs::entirely_missing_directories;
use filedrift_core::matching::{compare, Confidence, MatchKind, MatchStatus, TargetIndex};
use filedrift_core::scanner::{FileRecord, Inventory};
use std::path::PathBuf;

fn record(rel: &str, size: u64) -> FileRecord {
    FileRecord {
        relative_path: rel.to_string(),
        absolute_path: PathBuf::from("/scan").join(rel),
        size,
    }
}

fn inventory(files: &[(&str, u64)]) -> Inventory {
    let mut inventory = Inventory::default();
    for (rel, size) in files {
        inventory.insert(record(rel, *size));
    }
    inventory
}

#[test]
fn test_exact_path_match_is_in_both() {
    let source = inventory(&[("Books/a.pdf", 100)]);
    // A same-named file elsewhere must not shadow the exact path hit.
    let target = inventory(&[("Books/a.pdf", 100), ("Other/a.pdf", 100)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, MatchStatus::InBoth);
    assert_eq!(results[0].kind, MatchKind::ExactPath);
    assert_eq!(results[0].confidence, None);
    assert_eq!(
        results[0].target.as_ref().unwrap().found_at,
        "Books/a.pdf"
    );
}

#[test]
fn test_unmatched_file_is_only_on_source() {
    let source = inventory(&[("Books/a.pdf", 100), ("Books/b.pdf", 50)]);
    let target = inventory(&[("Books/a.pdf", 100)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::InBoth);
    assert_eq!(results[1].status, MatchStatus::OnlyOnSource);
    assert_eq!(results[1].kind, MatchKind::None);
    assert!(results[1].target.is_none());
    assert_eq!(results[1].confidence, None);
}

#[test]
fn test_moved_same_size_is_high_confidence() {
    let source = inventory(&[("docs/x.txt", 10)]);
    let target = inventory(&[("archive/x.txt", 10)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::Moved);
    assert_eq!(results[0].kind, MatchKind::FilenameSameSize);
    assert_eq!(results[0].confidence, Some(Confidence::High));
    assert_eq!(results[0].target.as_ref().unwrap().found_at, "archive/x.txt");
}

#[test]
fn test_moved_diff_size_is_medium_confidence() {
    let source = inventory(&[("docs/x.txt", 10)]);
    let target = inventory(&[("archive/x.txt", 20)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::Moved);
    assert_eq!(results[0].kind, MatchKind::FilenameDiffSize);
    assert_eq!(results[0].confidence, Some(Confidence::Medium));
}

#[test]
fn test_same_size_candidate_preferred_over_earlier_candidate() {
    let source = inventory(&[("elsewhere/a.txt", 10)]);
    // dir1 comes first in insertion order but has the wrong size.
    let target = inventory(&[("dir1/a.txt", 5), ("dir2/a.txt", 10)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].kind, MatchKind::FilenameSameSize);
    assert_eq!(results[0].target.as_ref().unwrap().found_at, "dir2/a.txt");
}

#[test]
fn test_first_candidate_wins_on_size_tie() {
    let source = inventory(&[("x/a.txt", 10)]);
    let target = inventory(&[("dir1/a.txt", 10), ("dir2/a.txt", 10)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].target.as_ref().unwrap().found_at, "dir1/a.txt");
}

#[test]
fn test_case_insensitive_path_match() {
    let source = inventory(&[("Sub/File.TXT", 7)]);
    let target = inventory(&[("sub/file.txt", 7)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::InBoth);
    // Output keeps the source's original spelling.
    assert_eq!(results[0].source.relative_path, "Sub/File.TXT");
}

#[test]
fn test_unmatched_duplicates_reclassified_symmetrically() {
    let source = inventory(&[("dup1/dupe.txt", 13), ("dup2/dupe.txt", 13)]);
    let target = inventory(&[]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::DuplicateOnSource);
    assert_eq!(results[1].status, MatchStatus::DuplicateOnSource);
    assert_eq!(results[0].duplicate_group, vec!["dup2/dupe.txt".to_string()]);
    assert_eq!(results[1].duplicate_group, vec!["dup1/dupe.txt".to_string()]);
}

#[test]
fn test_moved_duplicates_sharing_one_target_reclassified() {
    let source = inventory(&[("dup1/dupe.txt", 13), ("dup2/dupe.txt", 13)]);
    let target = inventory(&[("elsewhere/dupe.txt", 13)]);
    let index = TargetIndex::build(&target);

    // Both source copies collapse to the single target copy; reporting
    // them as independently moved would overstate the drift.
    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::DuplicateOnSource);
    assert_eq!(results[1].status, MatchStatus::DuplicateOnSource);
    assert_eq!(
        results[0].target.as_ref().unwrap().found_at,
        "elsewhere/dupe.txt"
    );
}

#[test]
fn test_exact_path_match_never_reclassified_as_duplicate() {
    let source = inventory(&[("a/dupe.txt", 13), ("b/dupe.txt", 13)]);
    let target = inventory(&[("a/dupe.txt", 13)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    // The exact path hit is ground truth.
    assert_eq!(results[0].status, MatchStatus::InBoth);
    assert!(results[0].duplicate_group.is_empty());
    // The second copy resolved to the same target file as its group mate.
    assert_eq!(results[1].status, MatchStatus::DuplicateOnSource);
    assert_eq!(results[1].duplicate_group, vec!["a/dupe.txt".to_string()]);
}

#[test]
fn test_moved_without_shared_target_stays_moved() {
    let source = inventory(&[("a/x.txt", 5), ("b/x.txt", 5)]);
    // c/x.txt precedes a/x.txt in target insertion order, so the filename
    // tier resolves b/x.txt to c/x.txt while a/x.txt matches exactly.
    let target = inventory(&[("c/x.txt", 5), ("a/x.txt", 5)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::InBoth);
    assert_eq!(results[1].status, MatchStatus::Moved);
    assert_eq!(results[1].target.as_ref().unwrap().found_at, "c/x.txt");
    assert!(results[1].duplicate_group.is_empty());
}

#[test]
fn test_status_partition_covers_every_source_file() {
    let source = inventory(&[
        ("same.txt", 4),
        ("only1.txt", 5),
        ("only2.txt", 5),
        ("moved.txt", 5),
        ("dupa/d.txt", 9),
        ("dupb/d.txt", 9),
    ]);
    let target = inventory(&[("same.txt", 4), ("other/moved.txt", 5)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results.len(), source.files.len());

    let count = |status: MatchStatus| results.iter().filter(|c| c.status == status).count();
    let total = count(MatchStatus::InBoth)
        + count(MatchStatus::OnlyOnSource)
        + count(MatchStatus::Moved)
        + count(MatchStatus::DuplicateOnSource);
    assert_eq!(total, results.len());
}

#[test]
fn test_entirely_missing_directory_rolled_up() {
    let source = inventory(&[("Android/app.apk", 2_560_000)]);
    let target = inventory(&[]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::OnlyOnSource);

    let missing = entirely_missing_directories(&results);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Android");
    assert_eq!(missing[0].total_files, 1);
    assert_eq!(missing[0].missing_files, 1);
    assert_eq!(missing[0].total_bytes, 2_560_000);
}

#[test]
fn test_missing_directory_threshold_is_strict() {
    let source = inventory(&[
        ("keep/a.txt", 1),
        ("keep/b.txt", 2),
        ("gone/c.txt", 3),
        ("gone/d.txt", 4),
        ("movedir/e.txt", 5),
    ]);
    let target = inventory(&[("keep/a.txt", 1), ("other/e.txt", 5)]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    let missing = entirely_missing_directories(&results);

    // keep has one surviving file; movedir's file was found elsewhere.
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "gone");
    assert_eq!(missing[0].total_files, 2);
    assert_eq!(missing[0].total_bytes, 7);
}

#[test]
fn test_root_files_excluded_from_missing_directories() {
    let source = inventory(&[("rootfile.txt", 10)]);
    let target = inventory(&[]);
    let index = TargetIndex::build(&target);

    let results = compare(&source, &index);
    assert_eq!(results[0].status, MatchStatus::OnlyOnSource);
    assert!(entirely_missing_directories(&results).is_empty());
}

#[test]
fn test_comparison_is_idempotent() {
    let files: &[(&str, u64)] = &[
        ("a/one.txt", 1),
        ("b/two.txt", 2),
        ("dup1/d.txt", 3),
        ("dup2/d.txt", 3),
    ];
    let target_files: &[(&str, u64)] = &[("a/one.txt", 1), ("moved/two.txt", 2)];

    let extract = |results: &[filedrift_core::matching::Comparison]| {
        results
            .iter()
            .map(|c| {
                (
                    c.source.relative_path.clone(),
                    c.status,
                    c.kind,
                    c.target.as_ref().map(|t| t.found_at.clone()),
                    c.duplicate_group.clone(),
                )
            })
            .collect::<Vec<_>>()
    };

    let source_a = inventory(files);
    let target_a = inventory(target_files);
    let index_a = TargetIndex::build(&target_a);
    let first = extract(&compare(&source_a, &index_a));

    let source_b = inventory(files);
    let target_b = inventory(target_files);
    let index_b = TargetIndex::build(&target_b);
    let second = extract(&compare(&source_b, &index_b));

    assert_eq!(first, second);
}
