use serde::{Deserialize, Serialize};

/// Data-driven configuration for the fracture game.
/// Overlay coordinates are percentages of the card (0..100).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FractureConfig {
    pub min_hits: u32,
    pub max_hits: u32,
    /// Overlay opacity lost over the full hit count.
    pub opacity_drop: f32,
    /// Blur radius before the first hit (px).
    pub max_blur: f32,
    /// Blur removed over the full hit count (px).
    pub blur_drop: f32,
    pub shard_count: usize,
    pub shard_frames: u32,
    pub shard_gravity: f32,
    /// Degrees per frame.
    pub shard_spin: f32,
    /// Shake feedback after a hit (seconds).
    pub shake_secs: f32,
    /// Pause after the shards settle before completion (seconds).
    pub completion_delay_secs: f32,
}

impl Default for FractureConfig {
    fn default() -> Self {
        Self {
            min_hits: 2,
            max_hits: 6,
            opacity_drop: 0.6,
            max_blur: 8.0,
            blur_drop: 6.0,
            shard_count: 12,
            shard_frames: 30,
            shard_gravity: 0.3,
            shard_spin: 5.0,
            shake_secs: 0.15,
            completion_delay_secs: 0.3,
        }
    }
}

impl FractureConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default(
            "DROPCARDS_FRACTURE_CONFIG",
            "config/fracture.toml",
        )
    }

    /// Hit target range with `min <= max` and a floor of one hit.
    pub fn hit_range(&self) -> (u32, u32) {
        let lo = self.min_hits.max(1);
        (lo, self.max_hits.max(lo))
    }
}
