/// Main `eframe::App` implementation for FolderTally.
///
/// This is the top-level UI layout that composes all widgets.
use crate::state::{AppPhase, AppState};
use crate::theme::FolderTallyTheme;
use crate::widgets;
use foldertally_core::ScanConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Frame interval while the scan or the rolling display is moving.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that the
/// initial scan (if a folder was passed on the command line) is already
/// running when the first frame is drawn.
pub struct FolderTallyState {
    pub(crate) inner: AppState,
}

impl FolderTallyState {
    /// Build state and optionally start scanning `initial_path` right away.
    pub fn build(config: ScanConfig, initial_path: Option<PathBuf>) -> Self {
        let mut state = AppState::new(config);

        if let Some(path) = initial_path {
            state.path_input = path.to_string_lossy().into_owned();
            state.start_scan(path);
        }

        Self { inner: state }
    }
}

/// The FolderTally application.
pub struct FolderTallyApp {
    state: AppState,
    /// Tracks which theme was last applied so the style is only rebuilt on change.
    applied_dark_mode: Option<bool>,
}

impl FolderTallyApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(_cc: &eframe::CreationContext<'_>, state: FolderTallyState) -> Self {
        Self {
            state: state.inner,
            applied_dark_mode: None,
        }
    }
}

impl eframe::App for FolderTallyApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.applied_dark_mode != Some(self.state.dark_mode) {
            FolderTallyTheme::for_dark_mode(self.state.dark_mode).apply(ctx);
            self.applied_dark_mode = Some(self.state.dark_mode);
        }

        // ── Keyboard: Esc stops the scan or skips the settle roll ────────
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.cancel_scan();
        }

        // ── Process background messages and animation ─────────────────────
        let data_changed = self.state.process_scan_messages();
        let animating = self.state.advance_animation();

        if data_changed || animating || self.state.phase == AppPhase::Scanning {
            ctx.request_repaint_after(ANIMATION_FRAME);
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About FolderTally")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("📏 FolderTally")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Measures how big a folder really is,\n\
                             with a live rolling total while it counts.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Central panel (rolling total) ─────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::tally_display::tally_display(ui, &self.state);
        });
    }
}
