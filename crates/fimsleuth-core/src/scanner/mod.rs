/// Scan producer — walks a directory tree, hashes file contents, and writes
/// the change log the analyser consumes.
///
/// Each scan emits one tab-delimited row per regular file: RFC 3339
/// timestamp, path, content hash, changed flag. A file is flagged `TRUE`
/// when it appeared in the previous change log with a different hash;
/// files seen for the first time are `FALSE`.
///
/// The walk prunes everything under the path prefixes listed in
/// `exclude.config` (one per line) and never follows symlinks. Output goes to
/// a sibling `.TMP` file first and is renamed over the change log at the end,
/// so an interrupted scan leaves the previous log intact.
use crate::error::FimError;
use crate::loader::CHANGE_LOG_FILE;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Fixed name of the optional exclusion list, resolved against the working
/// directory. One path prefix per line; a missing file means no exclusions.
pub const EXCLUDE_FILE: &str = "exclude.config";

/// Where to scan and where the output goes.
pub struct ScanOptions {
    /// Root of the tree to scan.
    pub root: PathBuf,
    /// Change-log destination (also the previous scan to diff against).
    pub out_file: PathBuf,
    /// Exclusion list location.
    pub exclude_file: PathBuf,
}

impl ScanOptions {
    /// Options with the conventional file names in the working directory.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            out_file: PathBuf::from(CHANGE_LOG_FILE),
            exclude_file: PathBuf::from(EXCLUDE_FILE),
        }
    }
}

/// Summary counters from one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    pub files_hashed: u64,
    /// Files whose hash differed from the previous scan.
    pub changed: u64,
    /// Walk and hash failures (logged, never fatal).
    pub errors: u64,
    pub duration: Duration,
}

impl ScanOutcome {
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// The platform filesystem root, matching the original producer's default.
pub fn default_scan_root() -> PathBuf {
    #[cfg(windows)]
    {
        PathBuf::from("C:\\")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/")
    }
}

#[derive(Serialize)]
struct ScanRow<'a> {
    timestamp: String,
    path: &'a str,
    hash: &'a str,
    changed: &'static str,
}

/// Run one scan: walk, hash, diff against the previous log, replace the log.
pub fn scan(opts: &ScanOptions) -> Result<ScanOutcome, FimError> {
    let start = Instant::now();

    let excludes = Arc::new(read_exclude_paths(&opts.exclude_file));
    let previous = read_previous_scan(&opts.out_file);
    debug!(
        "starting scan of {} ({} exclusions, {} previous entries)",
        opts.root.display(),
        excludes.len(),
        previous.len()
    );

    let mut errors: u64 = 0;

    // Walk first, hash after: the walk is cheap and the candidate list lets
    // rayon spread the expensive hashing evenly across the pool.
    let mut candidates: Vec<PathBuf> = Vec::new();
    let prune = Arc::clone(&excludes);
    let walker = jwalk::WalkDir::new(&opts.root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()))
        .process_read_dir(move |_depth, _path, _state, children| {
            // Prune excluded directories so their subtrees are never read.
            children.retain(|child| match child {
                Ok(entry) => !is_excluded(&entry.path(), &prune),
                Err(_) => true,
            });
        });

    for entry in walker {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if is_excluded(&path, &excludes) {
                    continue;
                }
                candidates.push(path);
            }
            Err(err) => {
                errors += 1;
                warn!("walk error: {err}");
            }
        }
    }

    // Hash contents in parallel; row order stays the walk order.
    let hashed: Vec<(PathBuf, io::Result<String>)> = candidates
        .into_par_iter()
        .map(|path| {
            let hash = hash_file(&path);
            (path, hash)
        })
        .collect();

    let tmp_path = opts.out_file.with_extension("TMP");
    let tmp = File::create(&tmp_path).map_err(|source| FimError::CreateScanOutput {
        path: tmp_path.clone(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(tmp);

    let mut files_hashed: u64 = 0;
    let mut changed_count: u64 = 0;

    for (path, hash) in &hashed {
        let hash = match hash {
            Ok(hash) => hash,
            Err(err) => {
                errors += 1;
                warn!("cannot hash {}: {err}", path.display());
                continue;
            }
        };

        let path_str = path.to_string_lossy();
        let changed = match previous.get(path_str.as_ref()) {
            Some(prev_hash) if prev_hash != hash => "TRUE",
            _ => "FALSE",
        };
        if changed == "TRUE" {
            changed_count += 1;
        }

        writer.serialize(ScanRow {
            timestamp: chrono::Local::now().to_rfc3339(),
            path: path_str.as_ref(),
            hash,
            changed,
        })?;
        files_hashed += 1;
    }

    writer.flush().map_err(FimError::Io)?;
    drop(writer);

    replace_file(&tmp_path, &opts.out_file).map_err(|source| FimError::ReplaceScanOutput {
        path: opts.out_file.clone(),
        source,
    })?;

    let duration = start.elapsed();
    info!(
        "scan complete: {files_hashed} files hashed, {changed_count} changed, \
         {errors} errors in {duration:?}"
    );

    Ok(ScanOutcome {
        files_hashed,
        changed: changed_count,
        errors,
        duration,
    })
}

/// Rename the finished temp file over the change log.
///
/// A plain rename over an existing file fails on some platforms; fall back to
/// remove-then-rename like the original producer.
fn replace_file(tmp: &Path, out: &Path) -> io::Result<()> {
    match fs::rename(tmp, out) {
        Ok(()) => Ok(()),
        Err(_) if out.exists() => {
            fs::remove_file(out)?;
            fs::rename(tmp, out)
        }
        Err(err) => Err(err),
    }
}

/// Component-wise prefix match: excluding a directory excludes its subtree.
fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    excludes.iter().any(|prefix| path.starts_with(prefix))
}

/// Load the exclusion list. A missing or unreadable file means no exclusions.
fn read_exclude_paths(path: &Path) -> Vec<PathBuf> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!("no exclusion list at {}: {err}", path.display());
            return Vec::new();
        }
    };
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Load the previous change log into a path → hash map.
///
/// Rows with fewer than three fields are ignored; extra fields are tolerated
/// so logs from older producers still diff cleanly.
fn read_previous_scan(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let reader = match csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(err) => {
            debug!("no previous scan at {}: {err}", path.display());
            return map;
        }
    };

    for record in reader.into_records() {
        let Ok(record) = record else { continue };
        if record.len() >= 3 {
            map.insert(record[1].to_string(), record[2].to_string());
        }
    }
    map
}

/// Hex-encoded content hash of one file, streamed rather than slurped.
fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_hex().to_string())
}
