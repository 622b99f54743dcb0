//! Options forwarded to per-session export.

use serde::{Deserialize, Serialize};

/// Export switches handed unchanged to every selected session.
///
/// Unset fields leave the choice to the session implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Render the screen recording with gaze overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<bool>,
    /// Export raw gaze samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaze: Option<bool>,
    /// Export fixation events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixation: Option<bool>,
    /// Number of trailing fixations drawn on each rendered frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fixation_count: Option<u32>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(mut self, on: bool) -> Self {
        self.screen = Some(on);
        self
    }

    pub fn gaze(mut self, on: bool) -> Self {
        self.gaze = Some(on);
        self
    }

    pub fn fixation(mut self, on: bool) -> Self {
        self.fixation = Some(on);
        self
    }

    pub fn last_fixation_count(mut self, count: u32) -> Self {
        self.last_fixation_count = Some(count);
        self
    }
}
