/// Data model — change-log records and per-directory tallies.

pub mod record;
pub mod tally;

pub use record::{flag_is_changed, parent_directory, LogRecord};
pub use tally::DirectoryTally;
