//! Session panel: the new-session form with Browse/Start/Stop controls.

use egui::{self, RichText, Vec2};
use octo_types::session::SessionForm;
use crate::theme::*;

/// What the caller should do after rendering the session panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    None,
    Browse,
    Start,
    Stop,
}

/// Render the session form. `form` is edited in place; the caller compares
/// it against the stored form to pick up edits.
pub fn session_panel(
    ui: &mut egui::Ui,
    form: &mut SessionForm,
    connected: bool,
    busy: bool,
) -> SessionAction {
    let mut action = SessionAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Session").color(TEXT_PRIMARY));
            ui.separator();

            // Name
            ui.label(RichText::new("Name (optional)").color(TEXT_SECONDARY).small());
            let name_edit =
                egui::TextEdit::singleline(&mut form.session_name).hint_text("auto-generated");
            ui.add(name_edit);

            ui.add_space(4.0);

            // Directory
            ui.label(RichText::new("Working Directory").color(TEXT_SECONDARY).small());
            ui.horizontal(|ui| {
                let dir_edit = egui::TextEdit::singleline(&mut form.directory)
                    .desired_width(ui.available_width() - 70.0);
                ui.add(dir_edit);
                if ui.add_enabled(!busy, egui::Button::new("Browse")).clicked() {
                    action = SessionAction::Browse;
                }
            });

            ui.add_space(12.0);
            ui.separator();

            ui.label(RichText::new("Model").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Role").color(TEXT_SECONDARY).small());
            ui.text_edit_singleline(&mut form.role);

            ui.add_space(4.0);

            ui.label(RichText::new("Model (optional)").color(TEXT_SECONDARY).small());
            let model_edit =
                egui::TextEdit::singleline(&mut form.model).hint_text("backend default");
            ui.add(model_edit);

            ui.add_space(4.0);

            ui.label(RichText::new("Temperature").color(TEXT_SECONDARY).small());
            ui.add(egui::Slider::new(&mut form.temperature, 0.0..=2.0));

            ui.label(RichText::new("Max Tokens (optional)").color(TEXT_SECONDARY).small());
            let tokens_edit =
                egui::TextEdit::singleline(&mut form.max_tokens).hint_text("backend default");
            ui.add(tokens_edit);
            if form.max_tokens().is_err() {
                ui.label(RichText::new("Must be a whole number").color(ERROR).small());
            }

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let can_start = !busy && !form.directory.trim().is_empty();
                let start = ui.add_enabled(
                    can_start,
                    egui::Button::new(RichText::new("Start Session").color(TEXT_PRIMARY).strong())
                        .fill(if can_start { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if start.clicked() {
                    action = SessionAction::Start;
                }

                if connected
                    && ui
                        .add_enabled(!busy, egui::Button::new("Stop").corner_radius(PANEL_ROUNDING))
                        .clicked()
                {
                    action = SessionAction::Stop;
                }
            });
        });

    action
}
