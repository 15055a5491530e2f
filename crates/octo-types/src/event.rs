use serde::{Deserialize, Serialize};

pub const SESSION_OUTPUT_EVENT: &str = "session_output";
pub const SESSION_ENDED_EVENT: &str = "session_ended";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Stdout,
    Stderr,
    Error,
}

/// One line of backend output, already converted from ANSI to markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutput {
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnded {
    pub session_id: String,
}

/// Events pushed by the native shell
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Output(SessionOutput),
    Ended(SessionEnded),
}

impl HostEvent {
    /// Decode an event payload by its host event name
    pub fn from_payload(name: &str, payload: serde_json::Value) -> crate::Result<Self> {
        match name {
            SESSION_OUTPUT_EVENT => Ok(HostEvent::Output(serde_json::from_value(payload)?)),
            SESSION_ENDED_EVENT => Ok(HostEvent::Ended(serde_json::from_value(payload)?)),
            other => Err(crate::UiError::Other(format!("Unknown host event: {}", other))),
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            HostEvent::Output(o) => &o.session_id,
            HostEvent::Ended(e) => &e.session_id,
        }
    }
}
