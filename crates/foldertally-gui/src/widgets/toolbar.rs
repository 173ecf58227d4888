/// Top action bar -- folder path, scan controls, theme toggle, and branding.
use crate::state::AppState;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // App title -- uses the egui accent/hyperlink colour so it adapts to
        // dark and light mode automatically.
        ui.label(
            egui::RichText::new("📏 FolderTally")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Folder path. Enter starts a scan.
        let scanning = state.is_scanning();
        let path_field = ui.add_enabled(
            !scanning,
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("Folder to measure")
                .desired_width(360.0),
        );
        let submitted =
            path_field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        // Scan button.
        let can_scan = !scanning && !state.path_input.trim().is_empty();
        let scan_btn = ui.add_enabled(
            can_scan,
            egui::Button::new("▶ Scan").min_size(egui::vec2(70.0, 28.0)),
        );
        if (scan_btn.clicked() || submitted) && can_scan {
            state.start_scan_from_input();
        }

        // Stop button (only during scan).
        let stop_btn = ui
            .add_enabled(
                scanning,
                egui::Button::new("⏹ Stop").min_size(egui::vec2(70.0, 28.0)),
            )
            .on_hover_text("Stop scanning (Esc)");
        if stop_btn.clicked() {
            state.cancel_scan();
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About FolderTally").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
