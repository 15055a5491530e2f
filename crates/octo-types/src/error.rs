use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A host command rejected or returned something unusable
    #[error("Host command failed: {0}")]
    Bridge(String),

    #[error("Host bridge not available")]
    BridgeUnavailable,

    #[error("No directory selection method available")]
    NoSelectionMethod,

    #[error("No active session")]
    NoSession,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for UiError {
    fn from(e: serde_json::Error) -> Self {
        UiError::Serialization(e.to_string())
    }
}
