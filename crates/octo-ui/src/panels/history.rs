//! History panel: past sessions, newest first, with resume/remove.

use egui::{self, RichText, ScrollArea};
use octo_types::session::SessionHistoryEntry;
use crate::theme::*;

pub enum HistoryAction {
    Resume(SessionHistoryEntry),
    /// Entries without an id are matched by name
    Remove(SessionHistoryEntry),
}

pub fn history_panel(
    ui: &mut egui::Ui,
    entries: &[SessionHistoryEntry],
    busy: bool,
) -> Option<HistoryAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("History").color(TEXT_PRIMARY).strong());
                ui.label(
                    RichText::new(format!(" ({} sessions)", entries.len()))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            });

            ui.separator();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if entries.is_empty() {
                        ui.label(
                            RichText::new("No sessions yet")
                                .color(TEXT_SECONDARY)
                                .italics(),
                        );
                    }

                    for entry in entries {
                        ui.group(|ui| {
                            ui.label(RichText::new(&entry.name).color(TEXT_PRIMARY).monospace());
                            ui.label(
                                RichText::new(format!("{}  ·  {}", entry.directory, created(entry)))
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            );
                            ui.horizontal(|ui| {
                                if ui.add_enabled(!busy, egui::Button::new("Resume")).clicked() {
                                    action = Some(HistoryAction::Resume(entry.clone()));
                                }
                                if ui
                                    .small_button(RichText::new("Remove").color(TEXT_SECONDARY))
                                    .clicked()
                                {
                                    action = Some(HistoryAction::Remove(entry.clone()));
                                }
                            });
                        });
                    }
                });
        });

    action
}

/// Creation time as "YYYY-MM-DD HH:MM", or the raw value if it is not RFC 3339
fn created(entry: &SessionHistoryEntry) -> String {
    match entry.created_at.get(..16) {
        Some(prefix) if entry.created_at.contains('T') => prefix.replacen('T', " ", 1),
        _ => entry.created_at.clone(),
    }
}
