/// Report writing — tab-delimited `directory<TAB>NN.NN%` rows.
///
/// Floating point exists only at this formatting boundary; everything before
/// it works in integer counts.
use crate::analysis::RankedEntry;
use crate::error::FimError;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// Fixed name of the report artifact, resolved against the working directory.
pub const REPORT_FILE: &str = "analysis.txt";

/// Format a percentage to exactly two decimal places with a percent sign.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}%")
}

#[derive(Serialize)]
struct ReportRow<'a> {
    directory: &'a str,
    percentage: String,
}

/// Write ranked entries to any byte sink, one tab-delimited row per entry.
///
/// An empty slice produces an empty (zero-byte) report; that is the defined
/// output for a change log with no qualifying changes.
pub fn write_report<W: io::Write>(out: W, entries: &[RankedEntry]) -> Result<(), FimError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(out);

    for entry in entries {
        writer.serialize(ReportRow {
            directory: entry.directory.as_str(),
            percentage: format_percentage(entry.percentage),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Create the report file and write all entries.
///
/// The file handle is scoped to this call: created, written once, flushed,
/// and closed before returning.
pub fn write_report_file(path: &Path, entries: &[RankedEntry]) -> Result<(), FimError> {
    let file = File::create(path).map_err(|source| FimError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    write_report(file, entries)
}
