/// FolderTally Core — folder size scanning with live progress.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (GUI, CLI, TUI).
///
/// # Modules
///
/// - [`scanner`] — Enumeration, aggregation, cancellation, and the cosmetic settle sequence.
/// - [`config`] — Scan tuning knobs, loadable from JSON.
/// - [`error`] — Fatal scan errors.
pub mod config;
pub mod error;
pub mod scanner;

pub use config::{CancellationGranularity, ConfigError, ScanConfig};
pub use error::ScanError;
