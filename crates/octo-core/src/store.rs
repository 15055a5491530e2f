//! UI state store: every piece of front-end state, one observable cell each.
//!
//! The store is created once by the app and passed to whatever renders or
//! mutates state. Session history is written through to the blob store on
//! every change (including the initial value), newest entry first.

use std::rc::Rc;
use octo_types::{
    connection::Connection,
    message::ChatMessage,
    session::{SessionConfig, SessionForm, SessionHistoryEntry},
};
use crate::formatter::format_message;
use crate::observable::Observable;
use crate::ports::BlobStore;

#[derive(Clone)]
pub struct UiStore {
    // Session
    pub current_session_id: Observable<Option<String>>,
    pub current_session_config: Observable<Option<SessionConfig>>,
    pub session_history: Observable<Vec<SessionHistoryEntry>>,

    // Chat
    pub messages: Observable<Vec<ChatMessage>>,
    pub connection: Observable<Connection>,

    // Form
    pub session_form: Observable<SessionForm>,

    // Streaming
    pub current_streaming_message: Observable<Option<ChatMessage>>,
    pub streaming_buffer: Observable<String>,
}

impl UiStore {
    /// Build the store, seeding history from `blobs[history_key]`.
    /// Undecodable history is logged and replaced by an empty list.
    pub fn new(blobs: Rc<dyn BlobStore>, history_key: &str) -> Self {
        let history = load_history(blobs.as_ref(), history_key);

        let store = Self {
            current_session_id: Observable::new(None),
            current_session_config: Observable::new(None),
            session_history: Observable::new(history),
            messages: Observable::new(Vec::new()),
            connection: Observable::new(Connection::disconnected()),
            session_form: Observable::new(SessionForm::default()),
            current_streaming_message: Observable::new(None),
            streaming_buffer: Observable::new(String::new()),
        };

        let key = history_key.to_string();
        store.session_history.subscribe(move |entries| {
            persist_history(blobs.as_ref(), &key, entries);
        });

        log::info!("UI store ready ({} history entries)", store.session_history.with(Vec::len));
        store
    }

    // ─── History ─────────────────────────────────────────────

    /// Put `entry` at the front, replacing any entry for the same session
    pub fn record_session(&self, entry: SessionHistoryEntry) {
        self.session_history.update(|entries| {
            entries.retain(|e| !e.same_session(&entry));
            entries.insert(0, entry);
        });
    }

    /// Record a resumed session. The backend hands out a fresh id on resume,
    /// so the entry it was resumed from is dropped in the same update.
    pub fn replace_session(&self, previous: &SessionHistoryEntry, entry: SessionHistoryEntry) {
        self.session_history.update(|entries| {
            entries.retain(|e| !e.same_session(previous) && !e.same_session(&entry));
            entries.insert(0, entry);
        });
    }

    /// Remove an entry. Entries saved without an id match by name.
    pub fn remove_session(&self, entry: &SessionHistoryEntry) {
        self.session_history.update(|entries| {
            entries.retain(|e| !e.same_session(entry));
        });
    }

    // ─── Connection ──────────────────────────────────────────

    pub fn set_connection(&self, connection: Connection) {
        self.connection.set(connection);
    }

    pub fn is_connected(&self) -> bool {
        self.connection.with(Connection::is_connected)
    }

    // ─── Messages ────────────────────────────────────────────

    pub fn push_message(&self, message: ChatMessage) {
        self.messages.update(|log| log.push(message));
    }

    pub fn clear_messages(&self) {
        self.messages.set(Vec::new());
        self.streaming_buffer.set(String::new());
        self.current_streaming_message.set(None);
    }

    /// Append one line of assistant output to the in-flight message
    pub fn append_stream(&self, chunk: &str) {
        let mut buffer = self.streaming_buffer.get();
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(chunk);

        let formatted = format_message(&buffer);
        self.streaming_buffer.set(buffer);
        self.current_streaming_message
            .set(Some(ChatMessage::streaming(formatted)));
    }

    /// Move the in-flight message into the log. No-op when nothing streamed.
    pub fn finish_stream(&self) {
        let Some(message) = self.current_streaming_message.get() else {
            return;
        };
        self.push_message(message.finalize());
        self.current_streaming_message.set(None);
        self.streaming_buffer.set(String::new());
    }

    pub fn is_streaming(&self) -> bool {
        self.current_streaming_message.with(Option::is_some)
    }
}

fn load_history(blobs: &dyn BlobStore, key: &str) -> Vec<SessionHistoryEntry> {
    let raw = match blobs.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::error!("Failed to read session history: {}", e);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::error!("Failed to parse session history: {}", e);
        Vec::new()
    })
}

fn persist_history(blobs: &dyn BlobStore, key: &str, entries: &[SessionHistoryEntry]) {
    let json = match serde_json::to_string(entries) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to encode session history: {}", e);
            return;
        }
    };
    if let Err(e) = blobs.set(key, &json) {
        log::error!("Failed to save session history to {}: {}", blobs.backend_name(), e);
    }
}
