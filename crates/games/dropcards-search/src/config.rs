use serde::{Deserialize, Serialize};

/// Data-driven configuration for the block-search game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub cols: usize,
    pub rows: usize,
    /// Glow on the found cell before the exit animation (seconds).
    pub highlight_secs: f32,
    /// Exit animation of the hidden entity (seconds).
    pub exit_secs: f32,
    /// Pause after the exit animation before completion (seconds).
    pub completion_delay_secs: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cols: 5,
            rows: 4,
            highlight_secs: 0.6,
            exit_secs: 0.8,
            completion_delay_secs: 0.3,
        }
    }
}

impl SearchConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default("DROPCARDS_SEARCH_CONFIG", "config/search.toml")
    }

    /// Grid dimensions, at least 1x1.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols.max(1), self.rows.max(1))
    }
}
