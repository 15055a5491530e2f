//! Port traits: the boundary between the front-end logic and the host.
//!
//! These traits are defined here in `octo-core` (pure Rust).
//! Implementations live in `octo-platform` (web-view adapters).
//! The core never touches `window` or `localStorage` directly; the bridge is
//! handed to whatever needs it.

use std::rc::Rc;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use octo_types::Result;

// ─── Host Bridge Port ────────────────────────────────────────

/// Options for the host's native file dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogOptions {
    pub directory: bool,
    pub multiple: bool,
    pub title: String,
}

impl DialogOptions {
    /// Single directory picker with the given window title
    pub fn directory(title: impl Into<String>) -> Self {
        Self {
            directory: true,
            multiple: false,
            title: title.into(),
        }
    }
}

/// What the host dialog returned
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSelection {
    Cancelled,
    Single(String),
    Multiple(Vec<String>),
}

impl DialogSelection {
    /// Decode the dialog's raw JSON result (path, array of paths, or null)
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(path) => DialogSelection::Single(path),
            Value::Array(items) => DialogSelection::Multiple(
                items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => DialogSelection::Cancelled,
        }
    }

    /// First usable path, if the user picked anything
    pub fn into_path(self) -> Option<String> {
        match self {
            DialogSelection::Cancelled => None,
            DialogSelection::Single(path) => Some(path).filter(|p| !p.is_empty()),
            DialogSelection::Multiple(paths) => paths.into_iter().find(|p| !p.is_empty()),
        }
    }
}

/// Callback for host-emitted events; receives the event payload
pub type EventHandler = Box<dyn FnMut(Value)>;

/// The shell-provided capability object.
#[async_trait(?Send)]
pub trait HostBridge {
    /// Whether the generic command-invocation function is exposed
    fn has_commands(&self) -> bool;

    /// Whether the dialog subsystem is exposed
    fn has_dialog(&self) -> bool;

    /// Invoke a named host command. Rejections become `UiError::Bridge`.
    async fn invoke(&self, command: &str, args: Value) -> Result<Value>;

    /// Open the native file dialog
    async fn open_dialog(&self, options: &DialogOptions) -> Result<DialogSelection>;

    /// Register a handler for a named host event
    async fn listen(&self, event: &str, handler: EventHandler) -> Result<()>;
}

// ─── Host Environment Port ───────────────────────────────────

/// The document the front-end runs in, as seen by the startup probe.
#[async_trait(?Send)]
pub trait HostEnvironment {
    /// Look for the host capability object right now
    fn probe(&self) -> Option<Rc<dyn HostBridge>>;

    /// Resolves once the document has finished loading
    /// (immediately if it already has)
    async fn content_loaded(&self);

    /// Resolves after `ms` milliseconds
    async fn sleep(&self, ms: u64);
}

// ─── Blob Store Port ─────────────────────────────────────────

/// Local key-value storage for small JSON blobs.
/// Synchronous so that a cell update and its persisted copy never diverge.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
