use serde::{Deserialize, Serialize};
use crate::{Result, UiError};

pub const DEFAULT_ROLE: &str = "developer";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Session parameters as the native shell stores them.
/// Field names follow the shell's wire format (snake_case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: Option<String>,
    pub resume: Option<String>,
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub role: String,
    pub directory: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: None,
            resume: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            role: DEFAULT_ROLE.to_string(),
            directory: String::new(),
        }
    }
}

/// The live session. `id` is assigned by the backend once the config exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<String>,
    pub config: Option<SessionConfig>,
    pub directory: String,
    pub name: String,
}

/// A persisted snapshot of a past session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHistoryEntry {
    pub id: Option<String>,
    pub name: String,
    pub directory: String,
    #[serde(default)]
    pub config: Option<SessionConfig>,
    pub created_at: String,
}

impl SessionHistoryEntry {
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            name: session.name.clone(),
            directory: session.directory.clone(),
            config: session.config.clone(),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Two entries describe the same session when their ids match,
    /// or, lacking ids, when their names match.
    pub fn same_session(&self, other: &SessionHistoryEntry) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }
}

/// Draft values behind the "new session" form. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionForm {
    pub session_name: String,
    pub directory: String,
    pub role: String,
    pub model: String,
    pub temperature: f32,
    /// Free text; parsed when the form is submitted
    pub max_tokens: String,
}

impl Default for SessionForm {
    fn default() -> Self {
        Self {
            session_name: String::new(),
            directory: String::new(),
            role: DEFAULT_ROLE.to_string(),
            model: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: String::new(),
        }
    }
}

impl SessionForm {
    pub fn model(&self) -> Option<String> {
        non_blank(&self.model)
    }

    pub fn role(&self) -> String {
        non_blank(&self.role).unwrap_or_else(|| DEFAULT_ROLE.to_string())
    }

    pub fn max_tokens(&self) -> Result<Option<u32>> {
        let raw = self.max_tokens.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<u32>()
            .map(Some)
            .map_err(|_| UiError::Config(format!("Invalid max tokens: {}", raw)))
    }

    /// Directory with surrounding whitespace removed, or an error if blank
    pub fn directory(&self) -> Result<String> {
        non_blank(&self.directory)
            .ok_or_else(|| UiError::Config("Working directory is required".to_string()))
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
