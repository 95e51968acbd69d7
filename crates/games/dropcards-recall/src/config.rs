use serde::{Deserialize, Serialize};

/// Data-driven configuration for the word-recall game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// Wrong guesses after which the word is revealed for the player.
    pub max_attempts: u32,
    /// Wrong guesses before skipping is offered.
    pub skip_after: u32,
    /// Highest hint level shown.
    pub max_hint_level: u8,
    /// Shake feedback after a wrong guess (seconds).
    pub shake_secs: f32,
    /// Pause on the revealed word before completion (seconds).
    pub completion_delay_secs: f32,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            skip_after: 3,
            max_hint_level: 4,
            shake_secs: 0.4,
            completion_delay_secs: 1.2,
        }
    }
}

impl RecallConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default("DROPCARDS_RECALL_CONFIG", "config/recall.toml")
    }
}
