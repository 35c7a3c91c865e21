use crate::scanner::{FileRecord, Inventory};
use indexmap::IndexMap;

/// Lookup structures over the target inventory: by normalized relative
/// path and by normalized filename. Built once per run, read-only
/// afterwards. Filename candidate lists keep the target's traversal order
/// so tie-breaks are reproducible.
pub struct TargetIndex<'a> {
    target: &'a Inventory,
    by_filename: IndexMap<String, Vec<&'a FileRecord>>,
}

impl<'a> TargetIndex<'a> {
    pub fn build(target: &'a Inventory) -> Self {
        let mut by_filename: IndexMap<String, Vec<&'a FileRecord>> = IndexMap::new();
        for record in target.files.values() {
            by_filename
                .entry(record.normalized_filename())
                .or_default()
                .push(record);
        }
        Self { target, by_filename }
    }

    pub fn by_path(&self, normalized_key: &str) -> Option<&'a FileRecord> {
        self.target.files.get(normalized_key)
    }

    pub fn by_filename(&self, normalized_filename: &str) -> &[&'a FileRecord] {
        self.by_filename
            .get(normalized_filename)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
