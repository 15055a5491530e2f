//! The web-view document as a `HostEnvironment`.

use std::rc::Rc;
use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;

use octo_core::ports::{HostBridge, HostEnvironment};
use crate::bridge::TauriBridge;

pub struct BrowserEnvironment;

#[async_trait(?Send)]
impl HostEnvironment for BrowserEnvironment {
    fn probe(&self) -> Option<Rc<dyn HostBridge>> {
        TauriBridge::probe().map(|bridge| Rc::new(bridge) as Rc<dyn HostBridge>)
    }

    async fn content_loaded(&self) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        // DOMContentLoaded has already fired; waiting for it would hang
        if document.ready_state() != "loading" {
            return;
        }

        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for DOMContentLoaded: {:?}", e);
            return;
        }
        callback.forget();

        let _ = rx.await;
    }

    async fn sleep(&self, ms: u64) {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
