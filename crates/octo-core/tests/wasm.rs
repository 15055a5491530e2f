//! WASM-target tests for octo-core.
//!
//! Runs the event bus, formatter, observable cells and an end-to-end
//! session flow under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use octo_core::backend::{commands, SessionClient};
use octo_core::controller::SessionController;
use octo_core::directory::DirectoryAccess;
use octo_core::event_bus::EventBus;
use octo_core::formatter::format_message;
use octo_core::observable::Observable;
use octo_core::ports::*;
use octo_core::store::UiStore;
use octo_types::config::UiConfig;
use octo_types::event::*;
use octo_types::message::Role;
use octo_types::Result;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use async_trait::async_trait;
use serde_json::{json, Value};

// ─── Test doubles ────────────────────────────────────────

/// Bridge answering every command with a fixed value
struct ScriptedBridge {
    responses: HashMap<&'static str, Value>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedBridge {
    fn new() -> Self {
        let mut responses = HashMap::new();
        responses.insert(commands::CREATE_SESSION_CONFIG, json!("cfg-1"));
        responses.insert("list_directories", json!(["/home/dev/project"]));
        Self {
            responses,
            calls: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl HostBridge for ScriptedBridge {
    fn has_commands(&self) -> bool {
        true
    }

    fn has_dialog(&self) -> bool {
        false
    }

    async fn invoke(&self, command: &str, _args: Value) -> Result<Value> {
        self.calls.borrow_mut().push(command.to_string());
        Ok(self.responses.get(command).cloned().unwrap_or(Value::Null))
    }

    async fn open_dialog(&self, _options: &DialogOptions) -> Result<DialogSelection> {
        Ok(DialogSelection::Cancelled)
    }

    async fn listen(&self, _event: &str, _handler: EventHandler) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct Blobs(RefCell<HashMap<String, String>>);

impl BlobStore for Blobs {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "test"
    }
}

fn controller(bridge: Rc<ScriptedBridge>) -> SessionController {
    let config = UiConfig::default();
    let store = UiStore::new(Rc::new(Blobs::default()), &config.history_key);
    let host: Rc<dyn HostBridge> = bridge;
    SessionController::new(
        store,
        SessionClient::new(Some(host.clone())),
        DirectoryAccess::new(Some(host), &config),
    )
}

fn stdout(session_id: &str, content: &str) -> HostEvent {
    HostEvent::Output(SessionOutput {
        session_id: session_id.to_string(),
        kind: OutputKind::Stdout,
        content: content.to_string(),
    })
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_drains_in_order() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());

    bus.emit(stdout("s", "one"));
    bus.emit(stdout("s", "two"));
    assert!(bus.has_pending());

    let drained = bus.drain();
    assert_eq!(drained, vec![stdout("s", "one"), stdout("s", "two")]);
    assert!(!bus.has_pending());
}

// ─── Formatter Tests ─────────────────────────────────────

#[wasm_bindgen_test]
fn formatter_renders_markdown_subset() {
    assert_eq!(
        format_message("**bold** and `code`\nnext"),
        "<strong>bold</strong> and <code>code</code><br>next"
    );
}

// ─── Observable Tests ────────────────────────────────────

#[wasm_bindgen_test]
fn observable_notifies_each_set() {
    let cell = Observable::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    cell.subscribe(move |v| sink.borrow_mut().push(*v));

    cell.set(1);
    cell.set(1);
    assert_eq!(*seen.borrow(), vec![0, 1, 1]);
}

// ─── Session flow ────────────────────────────────────────

#[wasm_bindgen_test]
async fn session_round_trip() {
    let bridge = Rc::new(ScriptedBridge::new());
    let ctl = controller(bridge.clone());

    ctl.init_directory().await;
    assert_eq!(ctl.store.session_form.get().directory, "/home/dev/project");

    let session = ctl.start_new_session().await.unwrap();
    assert_eq!(session.id.as_deref(), Some("cfg-1"));
    assert!(session.name.ends_with("-project"));
    assert!(ctl.store.is_connected());

    ctl.send_message("hello").await.unwrap();
    ctl.handle_event(stdout("cfg-1", "Hi **there**"));
    assert!(ctl.store.is_streaming());

    ctl.handle_event(HostEvent::Ended(SessionEnded {
        session_id: "cfg-1".to_string(),
    }));
    assert!(!ctl.store.is_connected());
    assert!(!ctl.store.is_streaming());

    let roles: Vec<Role> = ctl.store.messages.with(|m| m.iter().map(|m| m.role).collect());
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::System]
    );
    assert_eq!(ctl.store.session_history.with(Vec::len), 1);

    let calls = bridge.calls.borrow();
    assert!(calls.contains(&commands::START_SESSION_PROCESS.to_string()));
    assert!(calls.contains(&commands::SEND_MESSAGE_TO_SESSION.to_string()));
}
