use serde::{Deserialize, Serialize};

/// Blob-store key holding the session history
pub const HISTORY_KEY: &str = "octomind_sessions";

/// Working directory shown when the host cannot tell us one
pub const FALLBACK_DIRECTORY: &str = ".";

pub const DIALOG_TITLE: &str = "Select Working Directory";

/// Delay before the last bridge check at startup
pub const READINESS_TIMEOUT_MS: u64 = 500;

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub history_key: String,
    pub fallback_directory: String,
    pub dialog_title: String,
    pub readiness_timeout_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_key: HISTORY_KEY.to_string(),
            fallback_directory: FALLBACK_DIRECTORY.to_string(),
            dialog_title: DIALOG_TITLE.to_string(),
            readiness_timeout_ms: READINESS_TIMEOUT_MS,
        }
    }
}
