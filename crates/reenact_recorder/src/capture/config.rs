//! Recorder configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a capture session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Descriptor of the surface to observe.
    pub target: String,
    /// Capture pointer-move events. Move streams dominate log size.
    pub pointer_moves: bool,
    /// Capture pointer-click events.
    pub clicks: bool,
    /// Capture key-down events.
    pub keys: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            target: "body".to_string(),
            pointer_moves: true,
            clicks: true,
            keys: true,
        }
    }
}

impl RecorderConfig {
    /// Create a config for testing (all input classes enabled).
    pub fn testing() -> Self {
        Self::default()
    }

    /// Clicks and keys only; skips the high-volume move stream.
    pub fn minimal() -> Self {
        Self {
            pointer_moves: false,
            ..Self::default()
        }
    }

    /// Set the target surface descriptor.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Enable or disable pointer-move capture.
    pub fn with_pointer_moves(mut self, enabled: bool) -> Self {
        self.pointer_moves = enabled;
        self
    }

    /// Enable or disable click capture.
    pub fn with_clicks(mut self, enabled: bool) -> Self {
        self.clicks = enabled;
        self
    }

    /// Enable or disable key capture.
    pub fn with_keys(mut self, enabled: bool) -> Self {
        self.keys = enabled;
        self
    }
}
