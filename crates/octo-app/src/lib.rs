//! Octomind UI: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It waits for the host bridge, assembles the platform adapters into a
//! session controller and hands everything to the egui app.

mod app;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use octo_core::backend::SessionClient;
use octo_core::controller::SessionController;
use octo_core::directory::DirectoryAccess;
use octo_core::readiness::wait_for_host;
use octo_core::store::UiStore;
use octo_platform::storage::auto_detect_store;
use octo_platform::BrowserEnvironment;
use octo_types::config::UiConfig;

const CANVAS_ID: &str = "octo_canvas";

/// WASM entry point: called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Octomind UI starting...");

    if let Err(e) = run().await {
        log::error!("Failed to start UI: {:?}", e);
    }
}

async fn run() -> Result<(), JsValue> {
    let config = UiConfig::default();

    let readiness = wait_for_host(&BrowserEnvironment, config.readiness_timeout_ms).await;
    let bridge = readiness.bridge();
    if bridge.is_none() {
        log::warn!("Running without host bridge; session commands are disabled");
    }

    let store = UiStore::new(auto_detect_store(), &config.history_key);
    let controller = Rc::new(SessionController::new(
        store,
        SessionClient::new(bridge.clone()),
        DirectoryAccess::new(bridge.clone(), &config),
    ));

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("No canvas element with id 'octo_canvas'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(move |cc| Ok(Box::new(app::OctoApp::new(cc, controller, bridge)))),
        )
        .await
}
