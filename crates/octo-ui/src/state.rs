//! View-local state that is not part of the shared store.
//! Session data lives in `UiStore`; this only holds what the panels
//! need between frames.

use std::fmt::Display;

pub struct ViewState {
    /// Input field content
    pub input_text: String,
    /// Whether the history side panel is open
    pub show_history: bool,
    /// Last failed action, shown until dismissed or replaced
    pub last_error: Option<String>,
    /// Number of host calls in flight
    pub pending: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            show_history: true,
            last_error: None,
            pending: 0,
        }
    }

    /// Trimmed input, clearing the field. None when blank.
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }

    pub fn set_error(&mut self, error: impl Display) {
        self.last_error = Some(error.to_string());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
