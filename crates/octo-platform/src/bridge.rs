//! Host bridge adapter: talks to the shell through `window.__TAURI__`.
//!
//! The shell injects a namespaced global with:
//! - `core.invoke` (v2) or `tauri.invoke` (v1): `(cmd, args) -> Promise`
//! - `dialog.open`: `(options) -> Promise<string | string[] | null>`
//! - `event.listen`: `(name, cb) -> Promise<unlisten>`
//!
//! Values cross the boundary as JSON text (stringify/parse) so the core
//! only ever sees `serde_json::Value`.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use octo_core::ports::{DialogOptions, DialogSelection, EventHandler, HostBridge};
use octo_types::{Result, UiError};

const TAURI_GLOBAL: &str = "__TAURI__";

pub struct TauriBridge {
    invoke_fn: Option<Function>,
    dialog_open_fn: Option<Function>,
    listen_fn: Option<Function>,
}

impl TauriBridge {
    /// Look for the shell's global. `None` when it has not been injected (yet).
    pub fn probe() -> Option<Self> {
        let window = web_sys::window()?;
        let root = Reflect::get(&window, &JsValue::from_str(TAURI_GLOBAL)).ok()?;
        if root.is_undefined() || root.is_null() {
            return None;
        }
        Some(Self::from_root(&root))
    }

    fn from_root(root: &JsValue) -> Self {
        let invoke_fn =
            lookup(root, &["core", "invoke"]).or_else(|| lookup(root, &["tauri", "invoke"]));
        let bridge = Self {
            invoke_fn,
            dialog_open_fn: lookup(root, &["dialog", "open"]),
            listen_fn: lookup(root, &["event", "listen"]),
        };
        log::info!(
            "Host bridge found (commands: {}, dialog: {}, events: {})",
            bridge.invoke_fn.is_some(),
            bridge.dialog_open_fn.is_some(),
            bridge.listen_fn.is_some()
        );
        bridge
    }
}

#[async_trait(?Send)]
impl HostBridge for TauriBridge {
    fn has_commands(&self) -> bool {
        self.invoke_fn.is_some()
    }

    fn has_dialog(&self) -> bool {
        self.dialog_open_fn.is_some()
    }

    async fn invoke(&self, command: &str, args: Value) -> Result<Value> {
        let invoke = self.invoke_fn.as_ref().ok_or(UiError::BridgeUnavailable)?;
        let result = invoke
            .call2(&JsValue::UNDEFINED, &JsValue::from_str(command), &to_js(&args)?)
            .map_err(|e| UiError::Bridge(js_error_message(&e)))?;
        let value = await_promise(result)
            .await
            .map_err(|e| UiError::Bridge(format!("{}: {}", command, e)))?;
        from_js(&value)
    }

    async fn open_dialog(&self, options: &DialogOptions) -> Result<DialogSelection> {
        let open = self.dialog_open_fn.as_ref().ok_or(UiError::BridgeUnavailable)?;
        let options = to_js(&serde_json::to_value(options)?)?;
        let result = open
            .call1(&JsValue::UNDEFINED, &options)
            .map_err(|e| UiError::Bridge(js_error_message(&e)))?;
        let value = await_promise(result).await.map_err(UiError::Bridge)?;
        Ok(DialogSelection::from_value(from_js(&value)?))
    }

    async fn listen(&self, event: &str, handler: EventHandler) -> Result<()> {
        let listen = self.listen_fn.as_ref().ok_or(UiError::BridgeUnavailable)?;

        let mut handler = handler;
        let name = event.to_string();
        let callback = Closure::wrap(Box::new(move |event: JsValue| {
            let payload = Reflect::get(&event, &JsValue::from_str("payload"))
                .unwrap_or(JsValue::NULL);
            match from_js(&payload) {
                Ok(value) => handler(value),
                Err(e) => log::error!("Dropping {} event: {}", name, e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        let result = listen
            .call2(&JsValue::UNDEFINED, &JsValue::from_str(event), callback.as_ref())
            .map_err(|e| UiError::Bridge(js_error_message(&e)))?;
        await_promise(result).await.map_err(UiError::Bridge)?;

        // Listeners live for the whole app
        callback.forget();
        log::info!("Listening for host event {}", event);
        Ok(())
    }
}

/// Walk `root.a.b...` and return it if it is a function
fn lookup(root: &JsValue, path: &[&str]) -> Option<Function> {
    let mut current = root.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    current.dyn_into::<Function>().ok()
}

/// Await the value if it is a promise, pass it through otherwise
async fn await_promise(value: JsValue) -> std::result::Result<JsValue, String> {
    match value.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .map_err(|e| js_error_message(&e)),
        Err(plain) => Ok(plain),
    }
}

fn to_js(value: &Value) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|e| UiError::JsInterop(js_error_message(&e)))
}

fn from_js(value: &JsValue) -> Result<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let json: String = js_sys::JSON::stringify(value)
        .map_err(|e| UiError::JsInterop(js_error_message(&e)))?
        .into();
    Ok(serde_json::from_str(&json)?)
}

/// Best-effort text for a JS rejection: strings as-is, Error.message, else debug
fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
