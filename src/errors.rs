//! Typed error definitions for organise_downloads.
//! Only run-aborting failures live here; per-file problems are logged and skipped
//! by the mover and never surface as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Cannot list source directory {path}: {source}")]
    ListSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot check whether {path} exists: {source}")]
    ProbeDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start mover thread: {0}")]
    SpawnMover(#[source] io::Error),

    #[error("Mover thread panicked")]
    MoverPanicked,

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl OrganizeError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            OrganizeError::ListSource { .. } => 10,
            OrganizeError::ProbeDestination { .. } => 11,
            OrganizeError::SpawnMover(_) => 20,
            OrganizeError::MoverPanicked => 21,
            OrganizeError::Interrupted => 130,
        }
    }

    /// Short machine-friendly kind used alongside `code()` in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OrganizeError::ListSource { .. } => "list_source",
            OrganizeError::ProbeDestination { .. } => "probe_destination",
            OrganizeError::SpawnMover(_) => "spawn_mover",
            OrganizeError::MoverPanicked => "mover_panicked",
            OrganizeError::Interrupted => "interrupted",
        }
    }
}
