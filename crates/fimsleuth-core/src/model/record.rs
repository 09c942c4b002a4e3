/// One parsed row of the change log, plus the two parsing rules the rest of
/// the pipeline depends on: the changed-flag comparison and containing-directory
/// extraction.

/// A single change-log row: when a file was scanned, where it lives, what its
/// content hashed to, and whether the hash differed from the previous scan.
///
/// Records are parsed by the loader, consumed once by the aggregator, and
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    pub file_path: String,
    pub content_hash: String,
    pub changed: bool,
}

/// Interpret a raw changed-flag field.
///
/// True iff the trimmed value equals "true" case-insensitively. Any other
/// value — "false", empty, garbage — is false. The scan producer writes
/// upper-case TRUE/FALSE, but logs from older producers vary in case, so the
/// comparison is deliberately lenient on case and strict on spelling.
pub fn flag_is_changed(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// The containing directory of a file path: everything before the final
/// `/` or `\` separator.
///
/// A path with no separator maps to the empty string (current directory).
/// When the only separator is the leading one, the separator itself is
/// returned, so `/passwd` maps to `/` rather than merging with the
/// no-separator case.
pub fn parent_directory(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(0) => &path[..1],
        Some(i) => &path[..i],
        None => "",
    }
}
