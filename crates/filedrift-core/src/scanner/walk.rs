use glob::{MatchOptions, Pattern};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{error, warn};
use walkdir::WalkDir;

const IGNORE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// One regular file found during a scan.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path from the scanned root, original case preserved.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub size: u64,
}

impl FileRecord {
    /// Lowercased relative path, the case-insensitive identity of the file.
    pub fn normalized_key(&self) -> String {
        self.relative_path.to_lowercase()
    }

    /// Lowercased final path component.
    pub fn normalized_filename(&self) -> String {
        Path::new(&self.relative_path)
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// First path component, or `None` for files directly at the root.
    pub fn top_level_dir(&self) -> Option<&str> {
        let mut components = Path::new(&self.relative_path).components();
        let first = components.next()?;
        components.next()?;
        match first {
            Component::Normal(name) => name.to_str(),
            _ => None,
        }
    }
}

/// Flat result of one directory scan. Built once per phase, immutable
/// afterwards.
#[derive(Debug, Default)]
pub struct Inventory {
    /// Records keyed by normalized relative path. When two files normalize
    /// to the same key the later one wins and the earlier is dropped from
    /// path-based matching.
    pub files: IndexMap<String, FileRecord>,
    /// Count of files directly under the root, outside any subdirectory.
    pub root_files: usize,
    /// Immediate child directory names present under the root, independent
    /// of any subdirectory restriction applied to the scan.
    pub top_level_subdirs: BTreeSet<String>,
    /// Files dropped because their metadata could not be read.
    pub skipped: usize,
}

impl Inventory {
    pub fn insert(&mut self, record: FileRecord) {
        let is_root = record.top_level_dir().is_none();
        let key = record.normalized_key();
        let previous = self.files.insert(key, record);
        if let Some(previous) = &previous {
            warn!(
                "Path collides after lowercasing, dropping earlier entry: {}",
                previous.relative_path
            );
        }
        // An overwrite replaces a record with the same normalized path, so
        // the root-file count must not grow again.
        if is_root && previous.is_none() {
            self.root_files += 1;
        }
    }
}

/// Walk `root` and inventory every regular file under it.
///
/// With `allowed_subdirs`, only top-level directories whose name is in the
/// set are descended; files directly at the root are always included.
/// Per-file errors are counted in `skipped` and never abort the scan.
/// Symlinks are not followed. Files whose name matches an ignore pattern
/// are excluded entirely.
pub fn scan_directory(
    root: &Path,
    allowed_subdirs: Option<&BTreeSet<String>>,
    ignore_patterns: &[String],
) -> Inventory {
    let mut inventory = Inventory::default();
    let ignore = compile_ignore_patterns(ignore_patterns);

    match fs::read_dir(root) {
        Ok(entries) => {
            for entry in entries.flatten() {
                if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    inventory
                        .top_level_subdirs
                        .insert(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }
        Err(err) => warn!("Error listing {}: {}", root.display(), err),
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 1 && entry.file_type().is_dir() {
                if let Some(allowed) = allowed_subdirs {
                    let name = entry.file_name().to_string_lossy();
                    return allowed.contains(name.as_ref());
                }
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipped entry under {}: {}", root.display(), err);
                inventory.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if ignore
            .iter()
            .any(|pattern| pattern.matches_with(file_name.as_ref(), IGNORE_MATCH))
        {
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                warn!("Skipped {}: {}", entry.path().display(), err);
                inventory.skipped += 1;
                continue;
            }
        };

        let relative_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().into_owned(),
            Err(_) => continue,
        };

        inventory.insert(FileRecord {
            relative_path,
            absolute_path: entry.path().to_path_buf(),
            size,
        });
    }

    inventory
}

fn compile_ignore_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                error!("Invalid glob pattern '{}': {}", glob, err);
                None
            }
        })
        .collect()
}
