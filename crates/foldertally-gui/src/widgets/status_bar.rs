/// Bottom status bar — scan phase and counters.
use crate::format::{format_count, format_size};
use crate::state::{AppPhase, AppState};
use crate::theme::FolderTallyTheme;
use foldertally_core::scanner::ScanPhase;
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let theme = FolderTallyTheme::for_dark_mode(state.dark_mode);
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();

    ui.horizontal(|ui| match state.phase {
        AppPhase::Idle => {
            ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
        }
        AppPhase::Scanning => {
            ui.spinner();

            let phase_label = match state.scan_phase {
                ScanPhase::Enumerating => "Finding files",
                ScanPhase::Summing => "Measuring",
                _ => "Starting",
            };
            ui.label(egui::RichText::new(phase_label).size(12.0).color(color_normal));
            ui.separator();

            let p = &state.progress;
            let files = if p.total_files > 0 {
                format!(
                    "{} / {} files",
                    format_count(p.files_processed),
                    format_count(p.total_files)
                )
            } else {
                "counting files...".to_string()
            };
            ui.label(egui::RichText::new(files).size(12.0).color(color_normal));
            ui.separator();

            ui.label(
                egui::RichText::new(format_size(p.bytes_so_far))
                    .size(12.0)
                    .color(theme.accent),
            );

            skipped_label(ui, state.scan_skipped_dirs, 0, theme.warning);
        }
        AppPhase::Settling | AppPhase::Results => {
            if let Some(signal) = state.terminal {
                let color = if signal.is_error() {
                    theme.error
                } else if state.result.as_ref().is_some_and(|r| r.was_cancelled) {
                    theme.warning
                } else {
                    theme.success
                };
                ui.label(egui::RichText::new(signal.message()).size(12.0).color(color));
            }

            if let Some(ref result) = state.result {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} files", format_count(result.files_processed)))
                        .size(12.0)
                        .color(color_normal),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.1}s", result.duration.as_secs_f64()))
                        .size(12.0)
                        .color(color_weak),
                );
                skipped_label(
                    ui,
                    result.skipped_dirs,
                    result.unreadable_files,
                    theme.warning,
                );
            }

            if let Some(at) = state.finished_at {
                ui.separator();
                ui.label(
                    egui::RichText::new(at.format("at %H:%M:%S").to_string())
                        .size(11.0)
                        .color(color_weak),
                );
            }
        }
    });
}

/// Diagnostic counters for skipped directories and unreadable files.
fn skipped_label(ui: &mut Ui, dirs: u64, files: u64, color: egui::Color32) {
    if dirs == 0 && files == 0 {
        return;
    }
    ui.separator();
    let text = match (dirs, files) {
        (d, 0) => format!("{} folders skipped", format_count(d)),
        (0, f) => format!("{} files unreadable", format_count(f)),
        (d, f) => format!(
            "{} folders skipped, {} files unreadable",
            format_count(d),
            format_count(f)
        ),
    };
    ui.label(egui::RichText::new(text).size(12.0).color(color));
}
