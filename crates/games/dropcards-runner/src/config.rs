use serde::{Deserialize, Serialize};

/// Data-driven configuration for the timed runner.
/// Distances are in view units of a 400x240 board, rates per 60 Hz frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Ground line (y grows downward).
    pub ground_y: f32,
    /// Runner bounding square side.
    pub runner_size: f32,
    /// Fixed horizontal position of the runner's left edge.
    pub runner_x: f32,
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up).
    pub jump_velocity: f32,
    /// Obstacle speed at t = 0.
    pub base_speed: f32,
    /// Speed gained per second survived.
    pub speed_ramp: f32,
    /// Frames between spawns at t = 0.
    pub spawn_interval_start: u32,
    /// Frames shaved off the spawn interval per second survived.
    pub spawn_interval_ramp: f32,
    /// Spawn interval never drops below this many frames.
    pub spawn_interval_floor: u32,
    pub spawn_x: f32,
    /// Obstacles left of this x are culled.
    pub cull_x: f32,
    /// Seconds to survive for the win.
    pub survive_secs: f32,
    /// Pause after the win before completion (seconds).
    pub completion_delay_secs: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            ground_y: 200.0,
            runner_size: 32.0,
            runner_x: 50.0,
            gravity: 0.8,
            jump_velocity: -13.0,
            base_speed: 4.0,
            speed_ramp: 0.3,
            spawn_interval_start: 90,
            spawn_interval_ramp: 3.0,
            spawn_interval_floor: 50,
            spawn_x: 420.0,
            cull_x: -40.0,
            survive_secs: 10.0,
            completion_delay_secs: 0.8,
        }
    }
}

impl RunnerConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default("DROPCARDS_RUNNER_CONFIG", "config/runner.toml")
    }

    /// Obstacle speed after `secs` of running.
    pub fn speed_at(&self, secs: f32) -> f32 {
        self.base_speed + secs * self.speed_ramp
    }

    /// Spawn interval in frames after `secs` of running.
    pub fn spawn_interval_at(&self, secs: f32) -> u32 {
        let shaved = (secs * self.spawn_interval_ramp).floor().max(0.0) as u32;
        self.spawn_interval_start
            .saturating_sub(shaved)
            .max(self.spawn_interval_floor)
    }
}
