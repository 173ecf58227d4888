/// Central tally display — the rolling byte count, progress bar, and caption.
use crate::format::{flavor_text, format_count, format_size};
use crate::state::{AppPhase, AppState};
use crate::theme::FolderTallyTheme;
use egui::Ui;

/// Draw the rolling total in the middle of the window.
pub fn tally_display(ui: &mut Ui, state: &AppState) {
    let theme = FolderTallyTheme::for_dark_mode(state.dark_mode);
    let shown = state.rolling.displayed();

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);

        if let Some(ref root) = state.scan_root {
            ui.label(
                egui::RichText::new(root.display().to_string())
                    .size(13.0)
                    .color(theme.text_muted),
            );
            ui.add_space(8.0);
        }

        // Digits roll through `shown`; the unit string follows the same value.
        ui.label(
            egui::RichText::new(format!("{} bytes", format_count(shown)))
                .size(44.0)
                .strong()
                .monospace()
                .color(theme.total_color(state.rolling.flash())),
        );
        ui.label(
            egui::RichText::new(format_size(shown))
                .size(20.0)
                .color(theme.text_secondary),
        );
        ui.add_space(12.0);

        match state.phase {
            AppPhase::Idle => {
                ui.label(
                    egui::RichText::new("Type a folder path above and press Scan.")
                        .size(13.0)
                        .color(theme.text_muted),
                );
            }
            AppPhase::Scanning => {
                let bar = egui::ProgressBar::new(state.progress.fraction())
                    .desired_width(420.0)
                    .show_percentage();
                ui.add(bar);
                ui.label(
                    egui::RichText::new("Press Esc to stop")
                        .size(11.0)
                        .color(theme.text_muted),
                );
            }
            AppPhase::Settling => {}
            AppPhase::Results => {
                if let Some(signal) = state.terminal {
                    if signal.is_error() || state.result.is_none() {
                        let color = if signal.is_error() {
                            theme.error
                        } else {
                            theme.text_secondary
                        };
                        ui.label(egui::RichText::new(signal.message()).size(16.0).color(color));
                        if let Some(ref detail) = state.error_detail {
                            ui.label(
                                egui::RichText::new(detail)
                                    .size(11.0)
                                    .color(theme.text_muted),
                            );
                        }
                    } else if let Some(ref result) = state.result {
                        let caption = if result.was_cancelled {
                            signal.message()
                        } else {
                            flavor_text(result.total_bytes)
                        };
                        ui.label(
                            egui::RichText::new(caption)
                                .size(16.0)
                                .italics()
                                .color(theme.text_secondary),
                        );
                    }
                }
            }
        }
    });
}
