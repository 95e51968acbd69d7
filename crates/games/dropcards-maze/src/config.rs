use serde::{Deserialize, Serialize};

/// Data-driven configuration for the maze collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Seconds per agent step.
    pub tick_secs: f32,
    /// Collectibles placed at game start. Clamped to the number of open cells.
    pub collectibles: usize,
    /// Pause after the last collectible before completion (seconds).
    pub completion_delay_secs: f32,
    /// Score per plain dot.
    pub dot_score: u32,
    /// Score per collectible.
    pub collectible_score: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            tick_secs: 0.15,
            collectibles: 5,
            completion_delay_secs: 0.8,
            dot_score: 10,
            collectible_score: 50,
        }
    }
}

impl MazeConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default("DROPCARDS_MAZE_CONFIG", "config/maze.toml")
    }
}
