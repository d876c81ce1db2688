//! Progress value object
//!
//! The screening is considered "complete" after ten user messages; the
//! percentage is only an estimate shown next to the chat.

use serde::{Deserialize, Serialize};

/// Number of user messages that fills the progress bar
pub const TARGET_MESSAGES: usize = 10;

/// Completion estimate derived from the user message count (Value Object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    message_count: usize,
}

impl Progress {
    pub fn from_count(message_count: usize) -> Self {
        Self { message_count }
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    /// `min(count / 10, 1) × 100`
    pub fn percentage(&self) -> f64 {
        // Multiply before dividing so whole-step values stay exact
        let capped = self.message_count.min(TARGET_MESSAGES);
        capped as f64 * 100.0 / TARGET_MESSAGES as f64
    }

    pub fn is_complete(&self) -> bool {
        self.message_count >= TARGET_MESSAGES
    }

    /// Counter label, e.g. "3/10"
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.message_count, TARGET_MESSAGES)
    }
}
