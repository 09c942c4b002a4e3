//! FimSleuth — change-log analyser.
//!
//! Thin binary entry point. All logic lives in the `fimsleuth-core` crate.
//!
//! Reads the change log (`FIMFILEA.OUT`) from the working directory and
//! writes the per-directory change distribution to `analysis.txt`. Takes no
//! arguments; summary counts go to the log stream.

use fimsleuth_core::loader::{TracingSink, CHANGE_LOG_FILE};
use fimsleuth_core::report::REPORT_FILE;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("FimSleuth analysing {CHANGE_LOG_FILE}");

    let mut sink = TracingSink;
    let outcome = fimsleuth_core::analysis::run_analysis(
        Path::new(CHANGE_LOG_FILE),
        Path::new(REPORT_FILE),
        &mut sink,
    )?;

    tracing::info!(
        "read {} lines ({} skipped), {} changes found",
        outcome.lines_read,
        outcome.skipped_lines,
        outcome.total_changes,
    );
    tracing::info!(
        "{} directories analysed, report written to {REPORT_FILE}",
        outcome.directories
    );

    Ok(())
}
