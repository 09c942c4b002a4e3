/// FimSleuth Core — change scanning and change-log analysis.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends.
///
/// # Modules
///
/// - [`model`] — Change-log records, directory tallies, path helpers.
/// - [`loader`] — Lazy change-log reading with malformed-line diagnostics.
/// - [`analysis`] — Aggregation and ranking of changes per directory.
/// - [`report`] — Percentage formatting and report writing.
/// - [`scanner`] — The scan producer: walk, hash, diff against the previous log.
pub mod analysis;
pub mod error;
pub mod loader;
pub mod model;
pub mod report;
pub mod scanner;

pub use error::FimError;
