//! Chat panel: message log, in-flight assistant output and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use octo_core::store::UiStore;
use octo_types::message::{ChatMessage, Role};
use crate::markup::layout_job;
use crate::state::ViewState;
use crate::theme::*;

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, store: &UiStore, view: &mut ViewState) -> Option<String> {
    let mut submitted = None;
    let connection = store.connection.get();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Octomind").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let color = if connection.is_connected() { SUCCESS } else { ERROR };
                        ui.label(RichText::new(&connection.status_text).color(color).small());
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        store.messages.with(|messages| {
                            for message in messages {
                                render_message(ui, message);
                                ui.add_space(4.0);
                            }
                        });

                        if let Some(message) = store.current_streaming_message.get() {
                            render_message(ui, &message);
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let hint = if connection.is_connected() {
                        "Type a message..."
                    } else {
                        "Start a session to chat"
                    };
                    let input = egui::TextEdit::singleline(&mut view.input_text)
                        .hint_text(hint)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(BODY_SIZE));

                    let response = ui.add_enabled(connection.is_connected(), input);

                    let send_enabled =
                        connection.is_connected() && !view.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if send_enabled && (enter || send_btn.clicked()) {
                        submitted = view.take_input();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    egui::Frame::default()
        .fill(role_fill(message.role))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(message.role.label())
                    .color(role_color(message.role))
                    .strong()
                    .small(),
            );
            match message.role {
                // Typed by the user; shown verbatim
                Role::User => {
                    ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                }
                Role::Assistant | Role::System => {
                    ui.label(layout_job(&message.content, TEXT_PRIMARY));
                }
            }
            if message.streaming {
                ui.label(RichText::new("▌").color(ACCENT).strong());
            }
        });
}
