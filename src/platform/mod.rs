//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.
//!
//! The in-use check is the one piece of behavior that really differs: Unix only
//! offers advisory locking, so probing would be unreliable and we let the rename
//! report problems instead; Windows enforces sharing modes, so an exclusive open
//! tells us whether another process holds the file.

use std::path::Path;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, write_config_secure_new_0600, AdvisoryProbe};

#[cfg(windows)]
pub use windows::{open_log_file_secure_append, write_config_secure_new_0600, ExclusiveOpenProbe};

/// Answers "is this file currently open/locked by another process?".
///
/// Implementations must never modify the probed file's content or permissions.
pub trait InUseProbe: Send + Sync {
    fn is_in_use(&self, path: &Path) -> bool;
}

impl<F> InUseProbe for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_in_use(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Probe selected for the build target.
#[cfg(unix)]
pub type PlatformProbe = AdvisoryProbe;
#[cfg(windows)]
pub type PlatformProbe = ExclusiveOpenProbe;
