/// Aggregation — fold change-log records into a per-directory tally.
use crate::model::{parent_directory, DirectoryTally, LogRecord};

/// Consume a record sequence and tally changes per containing directory.
///
/// Only records with `changed == true` contribute; everything else is passed
/// over. Deterministic for a given input sequence, no side effects beyond the
/// returned tally.
pub fn aggregate(records: impl Iterator<Item = LogRecord>) -> DirectoryTally {
    let mut tally = DirectoryTally::default();
    for record in records {
        if !record.changed {
            continue;
        }
        tally.record(parent_directory(&record.file_path));
    }
    tally
}
