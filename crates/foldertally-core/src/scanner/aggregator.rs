/// Aggregator — drives the enumerator and sums file sizes.
///
/// The scan runs in two passes. Enumeration collects every file path first
/// so that `total_files` is known before the first size is read; summing
/// then stats each file, adds its size to the running total, and publishes
/// a `ScanProgress` snapshot.
///
/// # Cancellation
///
/// The token is checked before every enumerated entry and before every size
/// read. A set token ends the scan at the next check with whatever has been
/// summed so far. `total_files` is only 0 on a cancelled result when the walk
/// itself was interrupted. A single slow `stat` call cannot be interrupted.
///
/// # Error isolation
///
/// Only root errors propagate. Unreadable subdirectories are skipped by the
/// enumerator and files whose size cannot be read count as 0 bytes; both are
/// tallied on the `ScanResult` for diagnostics.
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::scanner::enumerator::Enumerator;
use crate::scanner::progress::{
    ScanEvent, ScanOutcome, ScanPhase, ScanProgress, ScanRequest, ScanResult,
};
use crate::scanner::CancellationToken;
use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Sums the sizes of every file under a root.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: ScanConfig,
}

/// Counters owned by one run of the aggregator.
#[derive(Default)]
struct Tally {
    bytes_so_far: u64,
    files_processed: u64,
    total_files: u64,
    skipped_dirs: u64,
    unreadable_files: u64,
}

impl Tally {
    fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            bytes_so_far: self.bytes_so_far,
            files_processed: self.files_processed,
            total_files: self.total_files,
        }
    }

    fn into_result(self, was_cancelled: bool, start: Instant) -> ScanResult {
        ScanResult {
            total_bytes: self.bytes_so_far,
            files_processed: self.files_processed,
            total_files: self.total_files,
            was_cancelled,
            skipped_dirs: self.skipped_dirs,
            unreadable_files: self.unreadable_files,
            duration: start.elapsed(),
        }
    }
}

impl Aggregator {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run one scan to completion (or cancellation) on the calling thread.
    ///
    /// Root errors are returned before any event is sent. Every other path
    /// ends with exactly one terminal event on `events`, mirrored by the
    /// returned [`ScanOutcome`]. Send failures (receiver dropped) are ignored.
    pub fn run(
        &self,
        request: &ScanRequest,
        cancel: &CancellationToken,
        events: &Sender<ScanEvent>,
    ) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();
        let root = request.root_path();

        let walk = Enumerator::new(root, &self.config).files()?;
        let mut walk = walk.cancel_on(cancel.clone());

        let mut tally = Tally::default();
        enter_phase(events, ScanPhase::Enumerating);

        let files: Vec<PathBuf> = walk.by_ref().collect();
        tally.skipped_dirs = walk.skipped_dirs();

        if walk.was_cut_short() {
            // total_files stays 0: the list was never completed.
            return Ok(finish_cancelled(events, tally, start));
        }

        tally.total_files = files.len() as u64;
        debug!(
            "Enumerated {} files under {} ({} dirs skipped) in {:?}",
            tally.total_files,
            root.display(),
            tally.skipped_dirs,
            start.elapsed()
        );
        let _ = events.send(ScanEvent::Enumerated {
            total_files: tally.total_files,
            skipped_dirs: tally.skipped_dirs,
        });

        if files.is_empty() {
            info!("No files found under {}", root.display());
            let _ = events.send(ScanEvent::NoFilesFound);
            return Ok(ScanOutcome::NoFilesFound);
        }

        enter_phase(events, ScanPhase::Summing);
        let every_n = self.config.progress_emit_every_n_items.max(1);

        for path in &files {
            if cancel.is_cancelled() {
                return Ok(finish_cancelled(events, tally, start));
            }

            // Stat outside of any shared state; this is the expensive syscall.
            let size = match std::fs::symlink_metadata(path) {
                Ok(meta) => meta.len(),
                Err(err) => {
                    tally.unreadable_files += 1;
                    debug!("Counting {} as 0 bytes: {err}", path.display());
                    0
                }
            };

            tally.bytes_so_far = tally.bytes_so_far.saturating_add(size);
            tally.files_processed += 1;

            let is_last = tally.files_processed == tally.total_files;
            if is_last || tally.files_processed.is_multiple_of(every_n) {
                let _ = events.send(ScanEvent::Progress(tally.snapshot()));
            }

            // Cooperative suspension point between files.
            thread::yield_now();
        }

        let result = tally.into_result(false, start);
        info!(
            "Scan of {} complete: {} bytes in {} files ({} dirs skipped, {} unreadable) in {:?}",
            root.display(),
            result.total_bytes,
            result.files_processed,
            result.skipped_dirs,
            result.unreadable_files,
            result.duration
        );
        enter_phase(events, ScanPhase::Completed);
        let _ = events.send(ScanEvent::Completed(result.clone()));
        Ok(ScanOutcome::Completed(result))
    }
}

fn enter_phase(events: &Sender<ScanEvent>, phase: ScanPhase) {
    debug!("Scan phase: {phase:?}");
    let _ = events.send(ScanEvent::Phase(phase));
}

fn finish_cancelled(events: &Sender<ScanEvent>, tally: Tally, start: Instant) -> ScanOutcome {
    let result = tally.into_result(true, start);
    info!(
        "Scan cancelled after {} of {} files ({} bytes)",
        result.files_processed, result.total_files, result.total_bytes
    );
    enter_phase(events, ScanPhase::Cancelled);
    let _ = events.send(ScanEvent::Cancelled(result.clone()));
    ScanOutcome::Cancelled(result)
}
