//! Classification and relocation of a directory's top-level files.

mod classify;
mod hints;
mod listing;
mod mover;

pub use classify::{classify, extension_and_destination, DirectoryEntry, MoveTargets};
pub use listing::list_source_dir;
pub use mover::{MoveHandle, MoveSummary, Mover, DEFAULT_REPORT_CAPACITY};
