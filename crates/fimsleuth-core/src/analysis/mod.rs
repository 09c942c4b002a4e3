/// Analysis — aggregation, ranking, and the end-to-end pipeline.

pub mod aggregate;
pub mod rank;

pub use aggregate::aggregate;
pub use rank::{rank, RankedEntry};

use crate::error::FimError;
use crate::loader::{self, DiagnosticSink};
use crate::report;
use std::path::Path;

/// Summary counters from one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub lines_read: u64,
    pub skipped_lines: u64,
    pub total_changes: u64,
    /// Distinct directories among changed records (== report line count).
    pub directories: usize,
}

/// Run the whole pipeline: load the change log, tally changes per directory,
/// rank them, write the report.
///
/// Single-threaded, one pass over the input. The report file is only created
/// after the input has been read in full, so a fatal load error never leaves
/// a partial report behind.
pub fn run_analysis(
    log_path: &Path,
    report_path: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<AnalysisOutcome, FimError> {
    let mut records = loader::open_change_log(log_path, sink)?;
    let tally = aggregate(records.by_ref());
    let (lines_read, skipped_lines) = (records.lines_read(), records.skipped_lines());

    let entries = rank(&tally);
    report::write_report_file(report_path, &entries)?;

    Ok(AnalysisOutcome {
        lines_read,
        skipped_lines,
        total_changes: tally.total_changes(),
        directories: entries.len(),
    })
}
