//! fim-scan — the change-log producer.
//!
//! Walks a directory tree, hashes every regular file, and writes
//! `FIMFILEA.OUT` in the working directory, flagging files whose content
//! changed since the previous scan. Accepts one optional argument, the scan
//! root; defaults to the filesystem root like the classic FIM tools. Path
//! prefixes listed in `exclude.config` are skipped.

use fimsleuth_core::scanner::{self, ScanOptions};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(scanner::default_scan_root);

    tracing::info!("fim-scan starting at {}", root.display());

    let outcome = scanner::scan(&ScanOptions::new(root))?;

    tracing::info!(
        "{} files hashed, {} changed, {} errors in {:.1}s",
        outcome.files_hashed,
        outcome.changed,
        outcome.errors,
        outcome.duration_secs(),
    );

    Ok(())
}
