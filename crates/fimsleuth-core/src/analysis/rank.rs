/// Ranking — turn a finalized tally into a sorted percentage distribution.
use crate::model::DirectoryTally;
use compact_str::CompactString;

/// One line of the final report: a directory and its share of all changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub directory: CompactString,
    /// Raw change count backing the percentage.
    pub count: u64,
    /// Share of total changes, in [0, 100].
    pub percentage: f64,
}

/// Rank directories by their share of total changes, descending.
///
/// Zero-total policy: when no record changed there is nothing to rank and
/// nothing to divide by, so the result is an empty vector — the report comes
/// out empty rather than crashing or printing NaN rows.
///
/// Ties are broken by first-observed input order: the sort is stable and the
/// tally iterates in insertion order.
pub fn rank(tally: &DirectoryTally) -> Vec<RankedEntry> {
    let total = tally.total_changes();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankedEntry> = tally
        .iter()
        .map(|(dir, count)| RankedEntry {
            directory: CompactString::new(dir),
            count,
            percentage: (count as f64 / total as f64) * 100.0,
        })
        .collect();

    // Sorting on the integer count avoids float comparison and orders
    // identically to sorting on percentage.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
