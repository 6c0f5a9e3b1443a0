//! Core library for `organise_downloads`.
//!
//! Sorts the top level of a single directory into `<ext>_files` subdirectories:
//! - [`organize::classify`] maps a directory listing to destination batches (pure).
//! - [`organize::Mover`] relocates those batches one file at a time on its own
//!   thread and streams every completed destination path back over a bounded channel.
//! - [`platform::InUseProbe`] decides whether a file is held open elsewhere.
//!
//! Config loading, default paths and user-facing output live alongside so the
//! binary stays a thin orchestrator.

pub mod config;
pub mod errors;
pub mod organize;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{
    default_config_path, default_log_path, default_source_dir, env_config_path,
    path_has_symlink_ancestor, Config, ExclusionSet, LogLevel,
};
pub use errors::OrganizeError;
pub use organize::{
    classify, list_source_dir, DirectoryEntry, MoveHandle, MoveSummary, MoveTargets, Mover,
};
pub use platform::{InUseProbe, PlatformProbe};
pub use shutdown::Shutdown;
