//! Mover: relocates classified files, one at a time, on a dedicated thread.
//!
//! Design:
//! - Moves are strictly sequential. Check-exists, mkdir and rename are not
//!   atomic together, so two movers working the same destination would race.
//! - Every successful rename pushes the destination path onto a bounded channel.
//!   A full channel blocks the mover until the consumer catches up.
//! - The sender lives inside the mover thread, so the channel closes exactly
//!   once whenever the thread ends (done, fatal error, interruption or panic).
//!
//! Per file: `Pending -> SkippedInUse | SkippedConflict | Failed | Moved`, or the
//! whole run aborts when the destination cannot even be checked.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn, Dispatch};

use super::classify::MoveTargets;
use super::hints::io_hint;
use crate::errors::OrganizeError;
use crate::platform::{InUseProbe, PlatformProbe};
use crate::shutdown::Shutdown;

/// Slots in the report channel before the mover blocks.
pub const DEFAULT_REPORT_CAPACITY: usize = 8;

/// Counters for one run. `moved + skipped_in_use + conflicts + failed == total`
/// when the run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSummary {
    /// Files renamed into their destination
    pub moved: usize,
    /// Candidate files across all destinations
    pub total: usize,
    /// Distinct destination subdirectories (including ones with nothing to receive)
    pub destinations: usize,
    pub skipped_in_use: usize,
    pub conflicts: usize,
    /// mkdir or rename failures
    pub failed: usize,
}

impl fmt::Display for MoveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Moved {}/{} files into {} subdirs.",
            self.moved, self.total, self.destinations
        )
    }
}

enum Outcome {
    Moved(PathBuf),
    SkippedInUse,
    SkippedConflict,
    Failed,
}

/// Configured mover for one source directory.
pub struct Mover {
    source_dir: PathBuf,
    probe: Box<dyn InUseProbe>,
    log: Dispatch,
    shutdown: Shutdown,
    capacity: usize,
}

impl fmt::Debug for Mover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mover")
            .field("source_dir", &self.source_dir)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Mover {
    /// Mover for `source_dir` using the platform probe, the caller's current
    /// dispatcher, a fresh shutdown flag and the default channel capacity.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            probe: Box::new(PlatformProbe::default()),
            log: tracing::dispatcher::get_default(Dispatch::clone),
            shutdown: Shutdown::new(),
            capacity: DEFAULT_REPORT_CAPACITY,
        }
    }

    pub fn with_probe(mut self, probe: impl InUseProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Logger handle the mover thread writes to.
    pub fn with_logger(mut self, log: Dispatch) -> Self {
        self.log = log;
        self
    }

    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Report channel capacity (at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Start moving `targets` on a new thread.
    pub fn spawn(self, targets: MoveTargets) -> Result<MoveHandle, OrganizeError> {
        let (tx, rx) = mpsc::sync_channel(self.capacity);
        let thread = thread::Builder::new()
            .name("mover".into())
            .spawn(move || self.run(&targets, &tx))
            .map_err(OrganizeError::SpawnMover)?;
        Ok(MoveHandle {
            reports: rx,
            thread,
        })
    }

    /// Move `targets` on the calling thread, sending each destination path to
    /// `reports`. The caller owns the channel and decides when it closes.
    pub fn run(
        &self,
        targets: &MoveTargets,
        reports: &SyncSender<PathBuf>,
    ) -> Result<MoveSummary, OrganizeError> {
        tracing::dispatcher::with_default(&self.log, || self.run_batches(targets, reports))
    }

    fn run_batches(
        &self,
        targets: &MoveTargets,
        reports: &SyncSender<PathBuf>,
    ) -> Result<MoveSummary, OrganizeError> {
        let mut summary = MoveSummary {
            total: targets.file_count(),
            destinations: targets.destination_count(),
            ..MoveSummary::default()
        };
        let mut reporting = true;

        for (sub_dir, files) in targets {
            if files.is_empty() {
                continue;
            }
            info!(batch_size = files.len(), sub_dir = %sub_dir, "processing");
            let dst_dir = self.source_dir.join(sub_dir);

            for file in files {
                if self.shutdown.is_requested() {
                    warn!(
                        moved = summary.moved,
                        total = summary.total,
                        "shutdown requested; leaving remaining files in place"
                    );
                    return Err(OrganizeError::Interrupted);
                }

                match self.move_one(file, &dst_dir)? {
                    Outcome::Moved(dst) => {
                        summary.moved += 1;
                        debug!(count = summary.moved, dst = %dst.display(), "moved");
                        if reporting && reports.send(dst).is_err() {
                            warn!("report receiver dropped; continuing without progress reports");
                            reporting = false;
                        }
                    }
                    Outcome::SkippedInUse => summary.skipped_in_use += 1,
                    Outcome::SkippedConflict => summary.conflicts += 1,
                    Outcome::Failed => summary.failed += 1,
                }
            }
        }

        info!(
            moved_count = summary.moved,
            total_count = summary.total,
            skipped_in_use = summary.skipped_in_use,
            conflicts = summary.conflicts,
            failed = summary.failed,
            "moved"
        );
        Ok(summary)
    }

    fn move_one(&self, file: &str, dst_dir: &Path) -> Result<Outcome, OrganizeError> {
        let src = self.source_dir.join(file);
        let dst = dst_dir.join(file);

        if self.probe.is_in_use(&src) {
            debug!(file, "skipping file: currently in use");
            return Ok(Outcome::SkippedInUse);
        }

        // Dangling symlinks count as present; never rename over them.
        match fs::symlink_metadata(&dst) {
            Ok(_) => {
                error!(file, dst = %dst.display(), "skipping file: destination already exists");
                return Ok(Outcome::SkippedConflict);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                error!(file, dst = %dst.display(), error = %source, "cannot check destination; aborting run");
                return Err(OrganizeError::ProbeDestination { path: dst, source });
            }
        }

        if let Err(e) = ensure_dir(dst_dir) {
            error!(
                file,
                dir = %dst_dir.display(),
                error = %e,
                hint = io_hint(&e),
                "skipping file: unable to create dir"
            );
            return Ok(Outcome::Failed);
        }

        if let Err(e) = fs::rename(&src, &dst) {
            error!(
                file,
                src = %src.display(),
                dst = %dst.display(),
                error = %e,
                hint = io_hint(&e),
                "skipping file: unable to rename"
            );
            return Ok(Outcome::Failed);
        }

        Ok(Outcome::Moved(dst))
    }
}

/// Create the single destination directory level if it is missing.
fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "created destination dir");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// A running mover: its report stream plus the thread's final result.
#[derive(Debug)]
pub struct MoveHandle {
    reports: Receiver<PathBuf>,
    thread: JoinHandle<Result<MoveSummary, OrganizeError>>,
}

impl MoveHandle {
    /// Destination paths as they are moved; ends when the mover finishes.
    pub fn reports(&self) -> mpsc::Iter<'_, PathBuf> {
        self.reports.iter()
    }

    /// Wait for the mover and return its summary or the error that stopped it.
    ///
    /// Undrained reports are discarded so a mover blocked on a full channel
    /// can finish.
    pub fn join(self) -> Result<MoveSummary, OrganizeError> {
        drop(self.reports);
        self.thread
            .join()
            .map_err(|_| OrganizeError::MoverPanicked)?
    }
}
