/// Error types for the FimSleuth core crate.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the analysis pipeline or the scan producer.
///
/// Malformed change-log lines are not errors — the loader skips them and
/// reports each through its diagnostic sink. Everything here aborts the run.
#[derive(Debug, Error)]
pub enum FimError {
    #[error("cannot open change log {path}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create report {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create scan output {path}: {source}")]
    CreateScanOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot replace scan output {path}: {source}")]
    ReplaceScanOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Row-level write failure from the csv layer (report or scan rows).
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
