//! End-to-end scan-producer tests.
//!
//! These run the real `scanner::scan` against a real temporary directory
//! tree: walking, hashing, diffing against the previous log, and the
//! TMP-then-rename replacement all happen exactly as in production. The
//! final test feeds a scan's output straight into the analysis pipeline.

use fimsleuth_core::analysis::run_analysis;
use fimsleuth_core::loader::DiagnosticSink;
use fimsleuth_core::scanner::{scan, ScanOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a reproducible tree for scan tests:
///
/// ```text
/// root/
///   alpha/
///     a.txt
///     b.rs
///   beta/
///     c.png
///   d.zip
/// ```
fn build_test_tree(root: &Path) {
    let alpha = root.join("alpha");
    let beta = root.join("beta");
    fs::create_dir_all(&alpha).unwrap();
    fs::create_dir_all(&beta).unwrap();

    fs::write(alpha.join("a.txt"), b"alpha a").unwrap();
    fs::write(alpha.join("b.rs"), b"alpha b").unwrap();
    fs::write(beta.join("c.png"), b"beta c").unwrap();
    fs::write(root.join("d.zip"), b"root d").unwrap();
}

/// Options scanning `data`, writing artifacts into a separate work dir so the
/// output never shows up in its own scan.
fn options(data: &TempDir, work: &TempDir) -> ScanOptions {
    ScanOptions {
        root: data.path().to_path_buf(),
        out_file: work.path().join("FIMFILEA.OUT"),
        exclude_file: work.path().join("exclude.config"),
    }
}

/// Parse the change log into (path, hash, flag) rows.
fn read_rows(out_file: &Path) -> Vec<(String, String, String)> {
    fs::read_to_string(out_file)
        .unwrap()
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 4, "four columns per row: {line}");
            (
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
            )
        })
        .collect()
}

/// A first scan has no previous log, so every file is hashed and none is
/// flagged changed.
#[test]
fn first_scan_flags_nothing() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());

    let outcome = scan(&options(&data, &work)).unwrap();

    assert_eq!(outcome.files_hashed, 4);
    assert_eq!(outcome.changed, 0);
    assert_eq!(outcome.errors, 0);

    let rows = read_rows(&work.path().join("FIMFILEA.OUT"));
    assert_eq!(rows.len(), 4);
    for (path, hash, flag) in &rows {
        assert_eq!(flag, "FALSE", "first sighting of {path} must be FALSE");
        assert_eq!(hash.len(), 64);
    }
}

/// Rescanning an unmodified tree keeps every flag FALSE.
#[test]
fn unchanged_rescan_stays_false() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());
    let opts = options(&data, &work);

    scan(&opts).unwrap();
    let outcome = scan(&opts).unwrap();

    assert_eq!(outcome.changed, 0);
    assert!(read_rows(&opts.out_file).iter().all(|(_, _, f)| f == "FALSE"));
}

/// Modifying one file between scans flags exactly that file TRUE.
#[test]
fn content_change_is_flagged_true() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());
    let opts = options(&data, &work);

    scan(&opts).unwrap();
    fs::write(data.path().join("alpha").join("a.txt"), b"rewritten").unwrap();
    let outcome = scan(&opts).unwrap();

    assert_eq!(outcome.changed, 1);

    let rows = read_rows(&opts.out_file);
    let changed: Vec<&str> = rows
        .iter()
        .filter(|(_, _, flag)| flag == "TRUE")
        .map(|(path, _, _)| path.as_str())
        .collect();
    assert_eq!(changed.len(), 1);
    assert!(changed[0].ends_with("a.txt"), "flagged row was {changed:?}");
}

/// Paths under an excluded prefix are pruned from the walk entirely.
#[test]
fn excluded_subtree_produces_no_rows() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());
    let opts = options(&data, &work);

    fs::write(
        &opts.exclude_file,
        format!("{}\n", data.path().join("beta").display()),
    )
    .unwrap();

    let outcome = scan(&opts).unwrap();
    assert_eq!(outcome.files_hashed, 3, "beta/c.png is pruned");

    let rows = read_rows(&opts.out_file);
    assert!(rows.iter().all(|(path, _, _)| !path.contains("beta")));
}

/// No sink diagnostics are expected from a producer-written log.
#[derive(Default)]
struct StrictSink {
    complaints: u64,
}

impl DiagnosticSink for StrictSink {
    fn malformed_line(&mut self, _line: u64, _raw: &str) {
        self.complaints += 1;
    }
}

/// Full round trip: scan, mutate two files in one directory, rescan, analyse.
/// The analyser must attribute 100% of changes to that directory.
#[test]
fn scan_output_feeds_the_analyser() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());
    let opts = options(&data, &work);

    scan(&opts).unwrap();
    fs::write(data.path().join("alpha").join("a.txt"), b"changed 1").unwrap();
    fs::write(data.path().join("alpha").join("b.rs"), b"changed 2").unwrap();
    scan(&opts).unwrap();

    let report = work.path().join("analysis.txt");
    let mut sink = StrictSink::default();
    let outcome = run_analysis(&opts.out_file, &report, &mut sink).unwrap();

    assert_eq!(sink.complaints, 0, "producer rows must all parse");
    assert_eq!(outcome.total_changes, 2);
    assert_eq!(outcome.directories, 1);

    let text = fs::read_to_string(&report).unwrap();
    let expected_dir = data.path().join("alpha");
    assert_eq!(
        text,
        format!("{}\t100.00%\n", expected_dir.display()),
        "alpha owns every change"
    );
}

/// The temp file must not survive a successful scan.
#[test]
fn tmp_artifact_is_renamed_away() {
    let data = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    build_test_tree(data.path());
    let opts = options(&data, &work);

    scan(&opts).unwrap();

    assert!(opts.out_file.exists());
    assert!(!opts.out_file.with_extension("TMP").exists());
}
