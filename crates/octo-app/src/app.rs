//! Main egui application: composes the panels and dispatches user actions
//! to the session controller.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use octo_core::controller::SessionController;
use octo_core::event_bus::EventBus;
use octo_core::ports::HostBridge;
use octo_types::event::{HostEvent, SESSION_ENDED_EVENT, SESSION_OUTPUT_EVENT};
use octo_types::Result;
use octo_ui::panels::chat::chat_panel;
use octo_ui::panels::history::{history_panel, HistoryAction};
use octo_ui::panels::session::{session_panel, SessionAction};
use octo_ui::state::ViewState;
use octo_ui::theme;

pub struct OctoApp {
    controller: Rc<SessionController>,
    event_bus: EventBus,
    view: ViewState,
    /// Host calls still running
    in_flight: Rc<Cell<usize>>,
    /// Most recent action failure, picked up by the next frame
    failure: Rc<RefCell<Option<String>>>,
    host_available: bool,
}

impl OctoApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: Rc<SessionController>,
        bridge: Option<Rc<dyn HostBridge>>,
    ) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        let event_bus = EventBus::new();
        let store = &controller.store;

        // Store changes made by async actions happen between frames
        let ctx = cc.egui_ctx.clone();
        store.messages.subscribe(move |_| ctx.request_repaint());
        let ctx = cc.egui_ctx.clone();
        store.current_streaming_message.subscribe(move |_| ctx.request_repaint());
        let ctx = cc.egui_ctx.clone();
        store.connection.subscribe(move |_| ctx.request_repaint());
        let ctx = cc.egui_ctx.clone();
        store.session_form.subscribe(move |_| ctx.request_repaint());

        if let Some(bridge) = &bridge {
            Self::listen_host_events(bridge.clone(), event_bus.clone(), cc.egui_ctx.clone());
        }

        let app = Self {
            controller,
            event_bus,
            view: ViewState::new(),
            in_flight: Rc::new(Cell::new(0)),
            failure: Rc::new(RefCell::new(None)),
            host_available: bridge.is_some(),
        };

        let controller = app.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.init_directory().await;
        });

        app
    }

    /// Forward both host events onto the bus
    fn listen_host_events(bridge: Rc<dyn HostBridge>, bus: EventBus, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            for name in [SESSION_OUTPUT_EVENT, SESSION_ENDED_EVENT] {
                let bus = bus.clone();
                let ctx = ctx.clone();
                let handler = Box::new(move |payload| {
                    match HostEvent::from_payload(name, payload) {
                        Ok(event) => bus.emit(event),
                        Err(e) => log::error!("Bad {} payload: {}", name, e),
                    }
                    ctx.request_repaint();
                });
                if let Err(e) = bridge.listen(name, handler).await {
                    log::error!("Failed to listen for {}: {}", name, e);
                }
            }
        });
    }

    /// Run a controller action in the background; failures land in the error bar
    fn dispatch<F, Fut>(&self, ctx: &egui::Context, action: F)
    where
        F: FnOnce(Rc<SessionController>) -> Fut + 'static,
        Fut: Future<Output = Result<()>> + 'static,
    {
        let controller = self.controller.clone();
        let in_flight = self.in_flight.clone();
        let failure = self.failure.clone();
        let ctx = ctx.clone();

        in_flight.set(in_flight.get() + 1);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = action(controller).await {
                log::error!("Action failed: {}", e);
                *failure.borrow_mut() = Some(e.to_string());
            }
            in_flight.set(in_flight.get().saturating_sub(1));
            ctx.request_repaint();
        });
    }

    fn handle_session_action(&mut self, action: SessionAction, ctx: &egui::Context) {
        match action {
            SessionAction::None => {}
            SessionAction::Browse => self.dispatch(ctx, |c| async move {
                c.browse_directory().await.map(|_| ())
            }),
            SessionAction::Start => self.dispatch(ctx, |c| async move {
                c.start_new_session().await.map(|_| ())
            }),
            SessionAction::Stop => {
                self.dispatch(ctx, |c| async move { c.stop_session().await })
            }
        }
    }

    fn handle_history_action(&mut self, action: HistoryAction, ctx: &egui::Context) {
        match action {
            HistoryAction::Resume(entry) => self.dispatch(ctx, move |c| async move {
                c.resume_session(&entry).await.map(|_| ())
            }),
            HistoryAction::Remove(entry) => self.controller.store.remove_session(&entry),
        }
    }
}

impl eframe::App for OctoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply host events in arrival order
        for event in self.event_bus.drain() {
            self.controller.handle_event(event);
        }

        self.view.pending = self.in_flight.get();
        if let Some(message) = self.failure.borrow_mut().take() {
            self.view.set_error(message);
        }

        let store = self.controller.store.clone();
        let connected = store.is_connected();
        let busy = self.view.is_busy();

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Octomind")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                let session = store
                    .current_session_config
                    .with(|c| c.as_ref().map(|c| c.directory.clone()));
                ui.label(
                    RichText::new(session.unwrap_or_else(|| "No session".to_string()))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                if !self.host_available {
                    ui.label(RichText::new("Host unavailable").color(theme::WARNING).small());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.view.show_history, "History")
                        .clicked()
                    {
                        self.view.show_history = !self.view.show_history;
                    }
                });
            });
        });

        // ── Error bar ────────────────────────────────────────
        if let Some(error) = self.view.last_error.clone() {
            TopBottomPanel::bottom("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(error).color(theme::ERROR));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Dismiss").clicked() {
                            self.view.clear_error();
                        }
                    });
                });
            });
        }

        // ── Session form + history ───────────────────────────
        let mut session_action = SessionAction::None;
        let mut history_action = None;
        SidePanel::left("session_panel")
            .min_width(280.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                let mut form = store.session_form.get();
                session_action = session_panel(ui, &mut form, connected, busy);
                if store.session_form.with(|f| *f != form) {
                    store.session_form.set(form);
                }

                if self.view.show_history {
                    ui.add_space(8.0);
                    history_action = store
                        .session_history
                        .with(|entries| history_panel(ui, entries, busy));
                }
            });

        self.handle_session_action(session_action, ctx);
        if let Some(action) = history_action {
            self.handle_history_action(action, ctx);
        }

        // ── Chat ─────────────────────────────────────────────
        let mut submitted = None;
        CentralPanel::default().show(ctx, |ui| {
            submitted = chat_panel(ui, &store, &mut self.view);
        });

        if let Some(text) = submitted {
            self.dispatch(ctx, move |c| async move { c.send_message(&text).await });
        }

        if busy || self.event_bus.has_pending() {
            ctx.request_repaint();
        }
    }
}
