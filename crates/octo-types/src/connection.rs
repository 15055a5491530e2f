use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Connection flag and its status line. Kept in one value so a reader
/// never sees the flag from one transition and the text from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub state: ConnectionState,
    pub status_text: String,
}

impl Connection {
    pub fn connected() -> Self {
        Self {
            state: ConnectionState::Connected,
            status_text: "🟢 Connected".to_string(),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            status_text: "🔴 Disconnected".to_string(),
        }
    }

    /// Connected, with a custom status line (e.g. the session name)
    pub fn connected_to(name: &str) -> Self {
        Self {
            state: ConnectionState::Connected,
            status_text: format!("🟢 Connected: {}", name),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::disconnected()
    }
}
