/// FolderTally GUI — egui-based desktop frontend.
///
/// This crate contains all UI code. Business logic lives in `foldertally-core`.
pub mod app;
pub mod format;
pub mod rolling;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{FolderTallyApp, FolderTallyState};
