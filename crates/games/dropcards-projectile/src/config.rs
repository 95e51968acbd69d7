use serde::{Deserialize, Serialize};

/// Data-driven configuration for the projectile game.
/// Distances are in view units of a 320x380 board, speeds per 60 Hz frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Smallest hit target drawn at game start (inclusive).
    pub min_hits: u32,
    /// Largest hit target drawn at game start (inclusive).
    pub max_hits: u32,
    /// Projectile spawn height (the ship's nose).
    pub launch_y: f32,
    /// Height at which a projectile strikes the target.
    pub target_y: f32,
    /// Horizontal center of the board.
    pub center_x: f32,
    /// Projectile travel per frame.
    pub projectile_speed: f32,
    /// Debris particles spawned by the final explosion.
    pub particle_count: usize,
    /// Frames the explosion plays before the game counts as won.
    pub explosion_frames: u32,
    pub particle_gravity: f32,
    pub particle_fade: f32,
    pub particle_shrink: f32,
    /// Pause after the explosion before completion is signaled (seconds).
    pub completion_delay_secs: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            min_hits: 2,
            max_hits: 12,
            launch_y: 320.0,
            target_y: 80.0,
            center_x: 160.0,
            projectile_speed: 14.0,
            particle_count: 24,
            explosion_frames: 50,
            particle_gravity: 0.15,
            particle_fade: 0.025,
            particle_shrink: 0.97,
            completion_delay_secs: 0.2,
        }
    }
}

impl ProjectileConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        dropcards_core::config::load_or_default(
            "DROPCARDS_PROJECTILE_CONFIG",
            "config/projectile.toml",
        )
    }

    /// Hit target range with `min <= max` and a floor of one hit.
    pub fn hit_range(&self) -> (u32, u32) {
        let lo = self.min_hits.max(1);
        (lo, self.max_hits.max(lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_normalized() {
        let cfg = ProjectileConfig {
            min_hits: 5,
            max_hits: 2,
            ..Default::default()
        };
        assert_eq!(cfg.hit_range(), (5, 5));
    }

    #[test]
    fn zero_minimum_becomes_one() {
        let cfg = ProjectileConfig {
            min_hits: 0,
            max_hits: 0,
            ..Default::default()
        };
        assert_eq!(cfg.hit_range(), (1, 1));
    }
}
