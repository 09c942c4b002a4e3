/// Per-directory change counts, preserving first-observed order.
use compact_str::CompactString;
use std::collections::HashMap;

/// Change counts keyed by containing directory.
///
/// Entries live in a `Vec` in the order their directories were first observed;
/// a side map gives O(1) lookup by directory name. The ranking step relies on
/// that insertion order to break percentage ties deterministically.
#[derive(Debug, Default)]
pub struct DirectoryTally {
    /// Directory name → position in `entries`.
    index: HashMap<CompactString, usize>,
    /// (directory, change count) in first-observed order.
    entries: Vec<(CompactString, u64)>,
}

impl DirectoryTally {
    /// Count one change in `dir`.
    pub fn record(&mut self, dir: &str) {
        match self.index.get(dir) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                let key = CompactString::new(dir);
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Total changes across all directories.
    pub fn total_changes(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct directories observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change count for a single directory, if observed.
    pub fn count(&self, dir: &str) -> Option<u64> {
        self.index.get(dir).map(|&pos| self.entries[pos].1)
    }

    /// Iterate `(directory, count)` in first-observed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(dir, count)| (dir.as_str(), *count))
    }
}
