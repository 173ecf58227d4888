//! FolderTally — measure how big a folder really is.
//!
//! Thin binary entry point. All logic lives in the `foldertally-core`
//! and `foldertally-gui` crates.
//!
//! Usage: `FolderTally [FOLDER]` — scanning starts immediately when a folder
//! is given. Scan tuning is read from the JSON file named by
//! `FOLDERTALLY_CONFIG`, if set.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("FolderTally starting");

    let config = foldertally_core::ScanConfig::from_env()?;
    let initial_path = std::env::args_os().nth(1).map(PathBuf::from);

    // Build application state *before* opening the window so a scan passed
    // on the command line is already running when the first frame renders.
    let state = foldertally_gui::FolderTallyState::build(config, initial_path);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("FolderTally")
            .with_inner_size([760.0, 420.0])
            .with_min_inner_size([560.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FolderTally",
        options,
        Box::new(|cc| {
            Ok(Box::new(foldertally_gui::FolderTallyApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
