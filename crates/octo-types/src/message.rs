use serde::{Deserialize, Serialize};

/// Author of a chat entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Octomind",
            Role::System => "System",
        }
    }
}

/// A single entry in the message log.
/// `content` is display markup; assistant output has already been formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// True while the assistant is still producing this message
    #[serde(default)]
    pub streaming: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            streaming: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            streaming: false,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
            streaming: false,
        }
    }

    /// An in-flight assistant message
    pub fn streaming(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            streaming: true,
        }
    }

    pub fn finalize(mut self) -> Self {
        self.streaming = false;
        self
    }
}
