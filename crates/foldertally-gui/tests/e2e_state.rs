/// End-to-end tests for `AppState` — the GUI application state machine.
///
/// These tests exercise the real business-logic paths of `AppState` without
/// spinning up an egui window, keeping them fast and deterministic.
///
/// **Scope:** All user-visible state transitions are covered:
///   - Scan lifecycle (start, progress, completion, settle, cancellation)
///   - Terminal signals (no files, missing folder)
///   - Overlapping scan requests
///
/// The real background scanner is used so no mocking is needed.
use foldertally_core::ScanConfig;
use foldertally_gui::state::{AppPhase, AppState, TerminalSignal};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// Build a minimal temp directory (600 bytes in 3 files) and return the guard.
fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("a.txt"), 100);
    write_bytes(&tmp.path().join("b.bin"), 200);
    let sub = tmp.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    write_bytes(&sub.join("c.rs"), 300);
    tmp
}

fn test_state() -> AppState {
    AppState::new(ScanConfig {
        settle_steps: 6,
        ..ScanConfig::default()
    })
}

/// Pump messages and animation frames until the phase leaves `Scanning`.
fn pump_until_scan_ends(state: &mut AppState) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while state.phase == AppPhase::Scanning {
        assert!(
            std::time::Instant::now() < deadline,
            "scan did not complete within 30 seconds"
        );
        state.process_scan_messages();
        state.advance_animation();
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Run animation frames until the settle roll has landed.
fn pump_until_results(state: &mut AppState) {
    pump_until_scan_ends(state);
    for _ in 0..1_000 {
        if state.phase == AppPhase::Results {
            return;
        }
        state.advance_animation();
    }
    panic!("settle animation never finished");
}

// ── Scan lifecycle ─────────────────────────────────────────────────────────────

/// After `start_scan`, the phase must be `Scanning`.
#[test]
fn start_scan_sets_scanning_phase() {
    let tmp = make_temp_tree();
    let mut state = test_state();
    state.start_scan(tmp.path().to_path_buf());
    assert_eq!(state.phase, AppPhase::Scanning);
    assert!(state.scan_handle.is_some());
}

/// A completed scan rolls onto the exact total and ends in `Results`.
#[test]
fn scan_completes_and_display_settles_on_total() {
    let tmp = make_temp_tree();
    let mut state = test_state();
    state.start_scan(tmp.path().to_path_buf());
    pump_until_results(&mut state);

    assert_eq!(state.terminal, Some(TerminalSignal::Completed));
    let result = state.result.as_ref().expect("result must exist");
    assert_eq!(result.total_bytes, 600);
    assert_eq!(result.files_processed, 3);
    assert_eq!(state.rolling.displayed(), 600);
    assert!(state.finished_at.is_some());
    assert!(state.scan_handle.is_none());
}

/// The path text field drives the same scan.
#[test]
fn scan_from_input_field() {
    let tmp = make_temp_tree();
    let mut state = test_state();
    state.path_input = format!("  {}  ", tmp.path().display());
    state.start_scan_from_input();
    pump_until_results(&mut state);

    assert_eq!(state.result.as_ref().map(|r| r.total_bytes), Some(600));
}

/// A folder with no files reports `NoFilesFound` rather than a result.
#[test]
fn empty_folder_reports_no_files_found() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("nested/empty")).unwrap();

    let mut state = test_state();
    state.start_scan(tmp.path().to_path_buf());
    pump_until_results(&mut state);

    assert_eq!(state.terminal, Some(TerminalSignal::NoFilesFound));
    assert!(state.result.is_none());
    assert_eq!(state.rolling.displayed(), 0);
}

/// A missing folder fails immediately without ever entering `Scanning`.
#[test]
fn missing_folder_reports_root_not_found() {
    let tmp = TempDir::new().unwrap();
    let mut state = test_state();
    state.start_scan(tmp.path().join("gone"));

    assert_eq!(state.phase, AppPhase::Results);
    assert_eq!(state.terminal, Some(TerminalSignal::RootNotFound));
    assert!(state.error_detail.as_deref().unwrap_or("").contains("gone"));
    assert!(state.scan_handle.is_none());
}

/// Cancelling must leave `Scanning`; the scan may finish before the flag is
/// read, so either a cancelled or a completed terminal is accepted.
#[test]
fn cancel_scan_leaves_scanning() {
    let tmp = make_temp_tree();
    let mut state = test_state();
    state.start_scan(tmp.path().to_path_buf());
    state.cancel_scan();
    state.cancel_scan();
    pump_until_results(&mut state);

    match state.terminal {
        Some(TerminalSignal::Cancelled) => {
            let result = state.result.as_ref().unwrap();
            assert!(result.was_cancelled);
            assert_eq!(state.rolling.displayed(), result.total_bytes);
        }
        Some(TerminalSignal::Completed) => {}
        other => panic!("unexpected terminal {other:?}"),
    }
}

/// Esc during the settle roll jumps straight to the true total.
#[test]
fn cancel_during_settle_shows_true_total() {
    let tmp = make_temp_tree();
    let mut state = AppState::new(ScanConfig {
        settle_steps: 10_000,
        ..ScanConfig::default()
    });
    state.start_scan(tmp.path().to_path_buf());
    pump_until_scan_ends(&mut state);
    assert_eq!(state.phase, AppPhase::Settling);

    state.cancel_scan();
    state.advance_animation();
    assert_eq!(state.rolling.displayed(), 600);
    state.advance_animation();
    assert_eq!(state.phase, AppPhase::Results);
}

/// A second scan request while one is running is ignored.
#[test]
fn overlapping_scan_request_is_ignored() {
    let first = make_temp_tree();
    let second = make_temp_tree();
    let mut state = test_state();
    state.start_scan(first.path().to_path_buf());
    state.start_scan(second.path().to_path_buf());

    assert_eq!(state.scan_root.as_deref(), Some(first.path()));
    pump_until_results(&mut state);
}

/// Starting a second scan after the first resets counters and results.
#[test]
fn start_scan_resets_previous_results() {
    let tmp = make_temp_tree();
    let mut state = test_state();
    state.start_scan(tmp.path().to_path_buf());
    pump_until_results(&mut state);
    assert!(state.result.is_some());

    state.start_scan(tmp.path().to_path_buf());
    assert_eq!(state.phase, AppPhase::Scanning);
    assert!(state.result.is_none());
    assert!(state.terminal.is_none());
    assert_eq!(state.progress.bytes_so_far, 0);
    pump_until_results(&mut state);
}
