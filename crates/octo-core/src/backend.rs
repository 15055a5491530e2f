//! Typed wrappers over the shell's session commands.
//!
//! The shell deserializes command arguments from camelCase keys, so every
//! argument object here is built with camelCase names.

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use octo_types::{Result, UiError, session::SessionConfig};
use crate::ports::HostBridge;

pub mod commands {
    pub const GET_AVAILABLE_SESSIONS: &str = "get_available_sessions";
    pub const CREATE_SESSION_CONFIG: &str = "create_session_config";
    pub const RESUME_SESSION_CONFIG: &str = "resume_session_config";
    pub const START_SESSION_PROCESS: &str = "start_session_process";
    pub const SEND_MESSAGE_TO_SESSION: &str = "send_message_to_session";
    pub const STOP_SESSION_PROCESS: &str = "stop_session_process";
    pub const GET_SESSION_INFO: &str = "get_session_info";
}

/// Parameters shared by new and resumed sessions
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub directory: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub role: Option<String>,
}

impl SessionParams {
    fn to_args(&self) -> serde_json::Map<String, Value> {
        let mut args = serde_json::Map::new();
        args.insert("directory".to_string(), json!(self.directory));
        args.insert("model".to_string(), json!(self.model));
        args.insert("temperature".to_string(), json!(self.temperature));
        args.insert("maxTokens".to_string(), json!(self.max_tokens));
        args.insert("role".to_string(), json!(self.role));
        args
    }
}

pub struct SessionClient {
    bridge: Option<Rc<dyn HostBridge>>,
}

impl SessionClient {
    pub fn new(bridge: Option<Rc<dyn HostBridge>>) -> Self {
        Self { bridge }
    }

    pub fn is_available(&self) -> bool {
        self.bridge.as_ref().is_some_and(|b| b.has_commands())
    }

    pub async fn available_sessions(&self) -> Result<Vec<String>> {
        self.call(commands::GET_AVAILABLE_SESSIONS, json!({})).await
    }

    /// Register a new session config; returns the backend-assigned id
    pub async fn create_session(&self, name: Option<&str>, params: &SessionParams) -> Result<String> {
        let mut args = params.to_args();
        args.insert("name".to_string(), json!(name));
        self.call(commands::CREATE_SESSION_CONFIG, Value::Object(args)).await
    }

    /// Register a config that resumes a named session; returns the new id
    pub async fn resume_session(&self, session_name: &str, params: &SessionParams) -> Result<String> {
        let mut args = params.to_args();
        args.insert("sessionName".to_string(), json!(session_name));
        self.call(commands::RESUME_SESSION_CONFIG, Value::Object(args)).await
    }

    pub async fn start_process(&self, session_id: &str) -> Result<()> {
        self.call_unit(commands::START_SESSION_PROCESS, json!({ "sessionId": session_id }))
            .await
    }

    pub async fn send_message(&self, session_id: &str, message: &str) -> Result<()> {
        self.call_unit(
            commands::SEND_MESSAGE_TO_SESSION,
            json!({ "sessionId": session_id, "message": message }),
        )
        .await
    }

    pub async fn stop_process(&self, session_id: &str) -> Result<()> {
        self.call_unit(commands::STOP_SESSION_PROCESS, json!({ "sessionId": session_id }))
            .await
    }

    pub async fn session_info(&self, session_id: &str) -> Result<SessionConfig> {
        self.call(commands::GET_SESSION_INFO, json!({ "sessionId": session_id }))
            .await
    }

    fn bridge(&self) -> Result<&Rc<dyn HostBridge>> {
        self.bridge
            .as_ref()
            .filter(|b| b.has_commands())
            .ok_or(UiError::BridgeUnavailable)
    }

    async fn call<T: DeserializeOwned>(&self, command: &str, args: Value) -> Result<T> {
        let value = self.bridge()?.invoke(command, args).await?;
        serde_json::from_value(value)
            .map_err(|e| UiError::Bridge(format!("Unexpected {} response: {}", command, e)))
    }

    async fn call_unit(&self, command: &str, args: Value) -> Result<()> {
        self.bridge()?.invoke(command, args).await.map(|_| ())
    }
}
