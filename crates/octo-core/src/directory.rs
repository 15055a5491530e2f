//! Directory access through the host bridge.
//!
//! `current_directory` is total: any failure yields the fallback path.
//! `select_directory` reports failures to the caller.

use std::rc::Rc;
use serde_json::{json, Value};
use octo_types::{Result, UiError, config::UiConfig};
use crate::ports::{DialogOptions, HostBridge};

pub const LIST_DIRECTORIES: &str = "list_directories";
pub const SELECT_DIRECTORY_NATIVE: &str = "select_directory_native";

pub struct DirectoryAccess {
    bridge: Option<Rc<dyn HostBridge>>,
    fallback: String,
    dialog_title: String,
}

impl DirectoryAccess {
    pub fn new(bridge: Option<Rc<dyn HostBridge>>, config: &UiConfig) -> Self {
        Self {
            bridge,
            fallback: config.fallback_directory.clone(),
            dialog_title: config.dialog_title.clone(),
        }
    }

    /// First directory the host lists, `""` for an empty list,
    /// the fallback path on any failure.
    pub async fn current_directory(&self) -> String {
        let bridge = match self.bridge.as_ref().filter(|b| b.has_commands()) {
            Some(b) => b,
            None => {
                log::warn!("Host bridge unavailable, using fallback directory");
                return self.fallback.clone();
            }
        };

        match bridge.invoke(LIST_DIRECTORIES, json!({})).await.and_then(parse_directories) {
            Ok(dirs) => dirs.into_iter().next().unwrap_or_default(),
            Err(e) => {
                log::error!("Failed to get current directory: {}", e);
                self.fallback.clone()
            }
        }
    }

    /// Ask the user for a directory: host dialog first, then the native
    /// command. Fails with `NoSelectionMethod` when neither produced a path.
    pub async fn select_directory(&self) -> Result<String> {
        self.try_select().await.map_err(|e| {
            log::error!("Failed to select directory: {}", e);
            e
        })
    }

    async fn try_select(&self) -> Result<String> {
        let Some(bridge) = self.bridge.as_ref() else {
            return Err(UiError::NoSelectionMethod);
        };

        if bridge.has_dialog() {
            log::info!("Trying host dialog for directory selection");
            let options = DialogOptions::directory(self.dialog_title.clone());
            if let Some(path) = bridge.open_dialog(&options).await?.into_path() {
                return Ok(path);
            }
        }

        if bridge.has_commands() {
            log::info!("Trying native directory selection");
            let selected = bridge.invoke(SELECT_DIRECTORY_NATIVE, json!({})).await?;
            if let Some(path) = selected.as_str().filter(|p| !p.is_empty()) {
                return Ok(path.to_string());
            }
        }

        Err(UiError::NoSelectionMethod)
    }
}

fn parse_directories(value: Value) -> Result<Vec<String>> {
    serde_json::from_value(value).map_err(|e| {
        UiError::Bridge(format!("Unexpected {} response: {}", LIST_DIRECTORIES, e))
    })
}
