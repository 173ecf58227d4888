/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. The scan
/// thread communicates only via its event channel; state updates happen in
/// `process_scan_messages()` which runs once per frame, and the rolling
/// display is advanced by `advance_animation()`.
use crate::rolling::RollingTotal;
use foldertally_core::scanner::{
    ScanEvent, ScanHandle, ScanPhase, ScanProgress, ScanRequest, ScanResult,
};
use foldertally_core::{ScanConfig, ScanError};
use std::path::PathBuf;
use tracing::{info, warn};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No scan has run yet, or the user is choosing a folder.
    Idle,
    /// Scanning — live counters and rolling total.
    Scanning,
    /// The true total is known; the display is rolling onto it.
    Settling,
    /// Scan finished (in any way) and the result is on screen.
    Results,
}

/// How the most recent scan ended, as far as the user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalSignal {
    Completed,
    Cancelled,
    NoFilesFound,
    RootNotFound,
    AccessDenied,
}

impl TerminalSignal {
    /// User-facing headline for the signal.
    pub fn message(self) -> &'static str {
        match self {
            Self::Completed => "Scan complete",
            Self::Cancelled => "Scan stopped (partial total)",
            Self::NoFilesFound => "No files found in this folder",
            Self::RootNotFound => "That folder doesn't exist",
            Self::AccessDenied => "Access denied to that folder",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::RootNotFound | Self::AccessDenied)
    }

    fn from_error(err: &ScanError) -> Self {
        match err {
            ScanError::RootNotFound { .. } => Self::RootNotFound,
            ScanError::AccessDenied { .. } => Self::AccessDenied,
        }
    }
}

/// Maximum number of scan events drained from the channel per frame.
///
/// The scanner can send one snapshot per file, so this is generous; it only
/// exists so a huge backlog (window restored after being hidden) cannot
/// stall the render thread for a perceptible duration.
const MAX_MESSAGES_PER_FRAME: usize = 20_000;

/// All application state.
pub struct AppState {
    pub config: ScanConfig,

    // ── Input ──────────────────────────────────────────
    /// Contents of the folder path text field.
    pub path_input: String,

    // ── Scan ───────────────────────────────────────────
    pub phase: AppPhase,
    pub scan_handle: Option<ScanHandle>,
    pub scan_root: Option<PathBuf>,
    pub scan_phase: ScanPhase,
    pub progress: ScanProgress,
    pub scan_skipped_dirs: u64,

    // ── Results ────────────────────────────────────────
    pub result: Option<ScanResult>,
    pub terminal: Option<TerminalSignal>,
    /// Detail line for fatal errors (the failing path and OS message).
    pub error_detail: Option<String>,
    pub finished_at: Option<chrono::DateTime<chrono::Local>>,

    // ── Display ────────────────────────────────────────
    pub rolling: RollingTotal,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
    pub show_about: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl AppState {
    /// Create initial application state.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            path_input: String::new(),
            phase: AppPhase::Idle,
            scan_handle: None,
            scan_root: None,
            scan_phase: ScanPhase::Idle,
            progress: ScanProgress::default(),
            scan_skipped_dirs: 0,
            result: None,
            terminal: None,
            error_detail: None,
            finished_at: None,
            rolling: RollingTotal::new(),
            dark_mode: true,
            show_about: false,
        }
    }

    /// `true` while a scan thread is live.
    pub fn is_scanning(&self) -> bool {
        self.phase == AppPhase::Scanning
    }

    /// Start a scan of the folder in the path field.
    pub fn start_scan_from_input(&mut self) {
        let trimmed = self.path_input.trim();
        if trimmed.is_empty() {
            return;
        }
        let path = PathBuf::from(trimmed);
        self.start_scan(path);
    }

    /// Start a scan of `path`.
    ///
    /// Ignored while another scan is running; one scan at a time.
    pub fn start_scan(&mut self, path: PathBuf) {
        if self.is_scanning() {
            warn!(
                "Ignoring scan request for {}: a scan is already running",
                path.display()
            );
            return;
        }

        // Reset scan state.
        self.scan_handle = None;
        self.scan_root = Some(path.clone());
        self.scan_phase = ScanPhase::Idle;
        self.progress = ScanProgress::default();
        self.scan_skipped_dirs = 0;
        self.result = None;
        self.terminal = None;
        self.error_detail = None;
        self.finished_at = None;
        self.rolling.reset();

        match foldertally_core::scanner::start_scan(ScanRequest::new(path), self.config.clone()) {
            Ok(handle) => {
                self.phase = AppPhase::Scanning;
                self.scan_handle = Some(handle);
            }
            Err(err) => {
                info!("Scan refused: {err}");
                self.finish_with_error(&err);
            }
        }
    }

    /// Cancel the running scan, or cut the settle animation short.
    ///
    /// Does nothing when neither is active.
    pub fn cancel_scan(&mut self) {
        if let Some(ref handle) = self.scan_handle {
            handle.request_cancel();
        }
        if self.phase == AppPhase::Settling {
            self.rolling.cancel_settle();
        }
    }

    /// Process pending scan events. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint (new data arrived).
    pub fn process_scan_messages(&mut self) -> bool {
        let handle = match &self.scan_handle {
            Some(h) => h,
            None => return false,
        };

        let mut repaint = false;
        let mut latest: Option<ScanProgress> = None;
        let mut terminal: Option<ScanEvent> = None;

        // Drain without blocking. Only the newest snapshot matters for drawing.
        for event in handle.events.try_iter().take(MAX_MESSAGES_PER_FRAME) {
            repaint = true;
            match event {
                ScanEvent::Phase(phase) => self.scan_phase = phase,
                ScanEvent::Enumerated {
                    total_files,
                    skipped_dirs,
                } => {
                    self.progress.total_files = total_files;
                    self.scan_skipped_dirs = skipped_dirs;
                }
                ScanEvent::Progress(p) => latest = Some(p),
                other => {
                    terminal = Some(other);
                    break;
                }
            }
        }

        if let Some(p) = latest {
            self.progress = p;
            self.rolling.chase(p.bytes_so_far);
        }

        if let Some(event) = terminal {
            self.handle_terminal(event);
        }

        repaint
    }

    fn handle_terminal(&mut self, event: ScanEvent) {
        self.scan_handle = None;
        self.finished_at = Some(chrono::Local::now());

        match event {
            ScanEvent::Completed(result) => {
                self.progress = ScanProgress {
                    bytes_so_far: result.total_bytes,
                    files_processed: result.files_processed,
                    total_files: result.total_files,
                };
                self.rolling
                    .begin_settle(result.total_bytes, self.config.settle_steps);
                self.terminal = Some(TerminalSignal::Completed);
                self.result = Some(result);
                self.phase = AppPhase::Settling;
            }
            ScanEvent::Cancelled(result) => {
                self.rolling.snap(result.total_bytes);
                self.terminal = Some(TerminalSignal::Cancelled);
                self.result = Some(result);
                self.phase = AppPhase::Results;
            }
            ScanEvent::NoFilesFound => {
                self.rolling.snap(0);
                self.terminal = Some(TerminalSignal::NoFilesFound);
                self.phase = AppPhase::Results;
            }
            ScanEvent::Failed(err) => self.finish_with_error(&err),
            ScanEvent::Phase(_) | ScanEvent::Enumerated { .. } | ScanEvent::Progress(_) => {}
        }
    }

    fn finish_with_error(&mut self, err: &ScanError) {
        self.scan_handle = None;
        self.terminal = Some(TerminalSignal::from_error(err));
        self.error_detail = Some(err.to_string());
        self.rolling.snap(0);
        self.phase = AppPhase::Results;
    }

    /// Advance the rolling display by one frame.
    ///
    /// Returns `true` while the display is still animating.
    pub fn advance_animation(&mut self) -> bool {
        let moving = self.rolling.step();
        if self.phase == AppPhase::Settling && !self.rolling.is_settling() {
            self.phase = AppPhase::Results;
        }
        moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_messages_are_distinct() {
        let all = [
            TerminalSignal::Completed,
            TerminalSignal::Cancelled,
            TerminalSignal::NoFilesFound,
            TerminalSignal::RootNotFound,
            TerminalSignal::AccessDenied,
        ];
        let mut messages: Vec<&str> = all.iter().map(|s| s.message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn test_blank_input_does_nothing() {
        let mut state = AppState::default();
        state.path_input = "   ".into();
        state.start_scan_from_input();
        assert_eq!(state.phase, AppPhase::Idle);
        assert!(state.scan_root.is_none());
    }

    #[test]
    fn test_cancel_without_scan_is_noop() {
        let mut state = AppState::default();
        state.cancel_scan();
        state.cancel_scan();
        assert_eq!(state.phase, AppPhase::Idle);
        assert!(!state.process_scan_messages());
    }
}
