/// Scan messages — requests, progress snapshots, and terminal results.
///
/// Everything sent from the scan thread is an owned, immutable value. The
/// receiver never shares the aggregator's counters; it only ever sees
/// snapshots.
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A request to measure one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    root_path: PathBuf,
}

impl ScanRequest {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

/// Running totals after a file has been sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub bytes_so_far: u64,
    pub files_processed: u64,
    pub total_files: u64,
}

impl ScanProgress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.total_files == 0 {
            return 0.0;
        }
        (self.files_processed as f64 / self.total_files as f64) as f32
    }
}

/// Terminal value of a scan that got as far as sizing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Sum of every size that could be read. Unreadable files add 0.
    pub total_bytes: u64,
    pub files_processed: u64,
    /// Files found by enumeration. `0` if the scan was cancelled before
    /// enumeration finished.
    pub total_files: u64,
    pub was_cancelled: bool,
    /// Subdirectories that could not be listed and were skipped.
    pub skipped_dirs: u64,
    /// Files whose size could not be read (counted as 0 bytes).
    pub unreadable_files: u64,
    pub duration: Duration,
}

impl ScanResult {
    /// `true` if anything under the root was skipped or unreadable.
    pub fn has_partial_errors(&self) -> bool {
        self.skipped_dirs > 0 || self.unreadable_files > 0
    }
}

/// Aggregator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Before a scan starts. The aggregator never emits this; it exists so
    /// a consumer has a phase to show between scans.
    Idle,
    Enumerating,
    Summing,
    Cancelled,
    Completed,
}

impl ScanPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

/// How a scan that started successfully ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed(ScanResult),
    Cancelled(ScanResult),
    /// The tree holds no regular files. Distinct from a tree whose files
    /// are all empty, which completes normally with `total_bytes == 0`.
    NoFilesFound,
}

impl ScanOutcome {
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::Completed(r) | Self::Cancelled(r) => Some(r),
            Self::NoFilesFound => None,
        }
    }
}

/// Messages sent from the scan thread to the presentation layer.
#[derive(Debug)]
pub enum ScanEvent {
    /// The aggregator entered a new phase.
    Phase(ScanPhase),
    /// Enumeration finished; the file count is now fixed.
    Enumerated { total_files: u64, skipped_dirs: u64 },
    /// Periodic update with running totals.
    Progress(ScanProgress),
    /// Enumeration found nothing to size.
    NoFilesFound,
    /// Every file was sized.
    Completed(ScanResult),
    /// Scan was cancelled by the user.
    Cancelled(ScanResult),
    /// The root became unavailable after `start_scan` validated it.
    Failed(ScanError),
}

impl ScanEvent {
    /// `true` for the last message a scan sends.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::NoFilesFound | Self::Completed(_) | Self::Cancelled(_) | Self::Failed(_)
        )
    }
}
