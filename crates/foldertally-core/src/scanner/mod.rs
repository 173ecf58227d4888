/// Scanner module — measures a folder on a background thread.
///
/// - [`enumerator`] walks the tree (`jwalk`) and yields file paths.
/// - [`aggregator`] sums their sizes and streams `ScanProgress` snapshots.
/// - [`settle`] produces the cosmetic convergence sequence for displays.
///
/// [`start_scan`] validates the root on the calling thread, so a missing or
/// unreadable root is reported before any event is sent, then runs the
/// aggregator on a dedicated thread. Results flow back over a bounded
/// crossbeam channel; the only shared state is the [`CancellationToken`].
pub mod aggregator;
pub mod enumerator;
pub mod progress;
pub mod settle;

pub use aggregator::Aggregator;
pub use enumerator::{Enumerator, FileWalk};
pub use progress::{ScanEvent, ScanOutcome, ScanPhase, ScanProgress, ScanRequest, ScanResult};
pub use settle::Settle;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Shared cancellation flag.
///
/// Cloning shares the flag. Once set it stays set; there is no reset, so a
/// new scan needs a new token.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Maximum number of scan events that may queue up in the channel.
///
/// The UI drains this channel once per frame. If it falls behind (hidden
/// window, resizing) the scanner stalls on `send` rather than consuming
/// unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed scan. Allows cancellation and
/// receiving events.
pub struct ScanHandle {
    /// Receiver for events from the scan thread.
    pub events: Receiver<ScanEvent>,
    cancel: CancellationToken,
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Ask the scan to stop at its next per-file check. Idempotent, and
    /// harmless once the scan has already finished.
    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A clone of the scan's token, e.g. to drive a [`Settle`] sequence.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Start a new scan on a background thread.
///
/// Fails synchronously with [`ScanError::RootNotFound`] or
/// [`ScanError::AccessDenied`] if the root is unusable; no thread is spawned
/// and no event is sent in that case. Only one scan should run at a time;
/// callers are expected to guard against overlapping scans.
pub fn start_scan(request: ScanRequest, config: ScanConfig) -> Result<ScanHandle, ScanError> {
    enumerator::check_root(request.root_path())?;

    let (events_tx, events_rx) =
        crossbeam_channel::bounded::<ScanEvent>(PROGRESS_CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    let thread = thread::Builder::new()
        .name("foldertally-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", request.root_path().display());
            let aggregator = Aggregator::new(config);
            if let Err(err) = aggregator.run(&request, &cancel_clone, &events_tx) {
                // The root vanished or was locked after validation.
                warn!("Scan failed: {err}");
                let _ = events_tx.send(ScanEvent::Failed(err));
            }
        })
        .expect("failed to spawn scanner thread");

    Ok(ScanHandle {
        events: events_rx,
        cancel,
        _thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let reader = token.clone();
        assert!(!reader.is_cancelled());
        token.cancel();
        assert!(reader.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
