/// Change-log loader — lazy, tab-delimited, tolerant of bad lines.
///
/// The change log is tab-delimited with four columns per line: timestamp,
/// file path, content hash, changed flag. Lines that do not decode into
/// exactly four fields are skipped; each skip is reported to an injectable
/// [`DiagnosticSink`] so callers (and tests) can observe exactly which lines
/// were dropped without scraping console output.
///
/// Only the failure to open the file is fatal. Once a reader exists, the
/// iterator never errors — it just gets shorter.
use crate::error::FimError;
use crate::model::{flag_is_changed, LogRecord};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::warn;

/// Fixed name of the change log consumed by the analyser and written by the
/// scan producer, resolved against the working directory.
pub const CHANGE_LOG_FILE: &str = "FIMFILEA.OUT";

/// Receives one callback per skipped change-log line.
pub trait DiagnosticSink {
    /// `line` is the 1-based line number in the source file; `raw` is the
    /// offending line (tab-joined fields, or a decode-error description when
    /// the line could not be read as text at all).
    fn malformed_line(&mut self, line: u64, raw: &str);
}

/// Default sink: structured warning per skipped line.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn malformed_line(&mut self, line: u64, raw: &str) {
        warn!(line, "skipping malformed change-log line: {raw}");
    }
}

/// Lazy iterator of [`LogRecord`]s over a change log.
///
/// Finite and not restartable; reopen the source to read again. Counters are
/// valid once iteration has finished.
pub struct LogRecords<'s, R: io::Read> {
    records: csv::StringRecordsIntoIter<R>,
    sink: &'s mut dyn DiagnosticSink,
    lines_read: u64,
    skipped_lines: u64,
}

impl<'s, R: io::Read> LogRecords<'s, R> {
    /// Wrap any byte source. Used directly by tests; binaries go through
    /// [`open_change_log`].
    pub fn from_reader(reader: R, sink: &'s mut dyn DiagnosticSink) -> Self {
        let records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self {
            records,
            sink,
            lines_read: 0,
            skipped_lines: 0,
        }
    }

    /// Lines consumed so far (valid rows plus skipped rows; blank lines are
    /// not counted — the csv layer swallows them).
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Lines skipped as malformed so far.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }
}

impl<R: io::Read> Iterator for LogRecords<'_, R> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        loop {
            let result = self.records.next()?;
            self.lines_read += 1;

            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    // Undecodable line (e.g. invalid UTF-8). Same policy as a
                    // wrong field count: name it, skip it, keep going. An I/O
                    // error would repeat on every poll, so that one ends the
                    // sequence instead.
                    self.skipped_lines += 1;
                    let line = err.position().map_or(0, |p| p.line());
                    self.sink.malformed_line(line, &format!("<{err}>"));
                    if err.is_io_error() {
                        return None;
                    }
                    continue;
                }
            };

            if record.len() != 4 {
                self.skipped_lines += 1;
                let line = record.position().map_or(0, |p| p.line());
                let raw: Vec<&str> = record.iter().collect();
                self.sink.malformed_line(line, &raw.join("\t"));
                continue;
            }

            return Some(LogRecord {
                timestamp: record[0].to_string(),
                file_path: record[1].to_string(),
                content_hash: record[2].to_string(),
                changed: flag_is_changed(&record[3]),
            });
        }
    }
}

/// Open a change log for reading.
///
/// Fails with [`FimError::OpenLog`] when the file cannot be opened; this is
/// the one fatal condition in the loading phase.
pub fn open_change_log<'s>(
    path: &Path,
    sink: &'s mut dyn DiagnosticSink,
) -> Result<LogRecords<'s, File>, FimError> {
    let file = File::open(path).map_err(|source| FimError::OpenLog {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LogRecords::from_reader(file, sink))
}
