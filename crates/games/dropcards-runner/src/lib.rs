pub mod config;
pub mod obstacle;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{
    GameEvent, GameInput, GameMetadata, GameSetup, GatingGame, SnapshotCheck,
};
use dropcards_core::gating_game_boilerplate;
use dropcards_core::timing::{Countdown, FRAME_SECS, FixedStep};

use config::RunnerConfig;
use obstacle::{Aabb, Obstacle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerPhase {
    /// Waiting for the first jump action to start the clock.
    Waiting,
    Running,
    /// Hit an obstacle. A restart returns to `Waiting`.
    Dead,
    /// Survived the full duration; completion pending.
    Won,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    pub phase: RunnerPhase,
    /// Top edge of the runner.
    pub runner_y: f32,
    pub velocity: f32,
    pub airborne: bool,
    pub obstacles: Vec<Obstacle>,
    /// Frames simulated in the current run.
    pub run_frames: u32,
    pub last_spawn_frame: u32,
    pub next_obstacle_id: u32,
    pub score: u32,
    pub exit: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl RunnerState {
    fn fresh(config: &RunnerConfig, color: String) -> Self {
        Self {
            phase: RunnerPhase::Waiting,
            runner_y: config.ground_y - config.runner_size,
            velocity: 0.0,
            airborne: false,
            obstacles: Vec::new(),
            run_frames: 0,
            last_spawn_frame: 0,
            next_obstacle_id: 0,
            score: 0,
            exit: None,
            elapsed: 0.0,
            color,
            complete: false,
        }
    }

    /// Seconds survived in the current run.
    pub fn run_secs(&self) -> f32 {
        self.run_frames as f32 * FRAME_SECS
    }
}

impl SnapshotCheck for RunnerState {
    fn is_consistent(&self) -> bool {
        self.last_spawn_frame <= self.run_frames
    }
}

/// Jump over obstacles until the survival clock runs out.
pub struct RunnerGame {
    state: RunnerState,
    clock: FixedStep,
    rng: StdRng,
    config: RunnerConfig,
}

impl RunnerGame {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::load())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            state: RunnerState::fresh(&config, String::new()),
            clock: FixedStep::frames(),
            rng: StdRng::seed_from_u64(0),
            config,
        }
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    /// Seconds left on the survival clock.
    pub fn time_left(&self) -> f32 {
        (self.config.survive_secs - self.state.run_secs()).max(0.0)
    }

    fn ground_top(&self) -> f32 {
        self.config.ground_y - self.config.runner_size
    }

    fn jump(&mut self) {
        match self.state.phase {
            RunnerPhase::Waiting => {
                tracing::debug!("Runner started");
                self.state.phase = RunnerPhase::Running;
                self.clock.reset();
            },
            RunnerPhase::Running if !self.state.airborne => {
                self.state.velocity = self.config.jump_velocity;
                self.state.airborne = true;
            },
            _ => tracing::debug!(phase = ?self.state.phase, "Jump ignored"),
        }
    }

    fn restart(&mut self) -> Vec<GameEvent> {
        if self.state.phase != RunnerPhase::Dead {
            tracing::debug!(phase = ?self.state.phase, "Restart ignored");
            return Vec::new();
        }
        let elapsed = self.state.elapsed;
        self.state = RunnerState {
            elapsed,
            ..RunnerState::fresh(&self.config, std::mem::take(&mut self.state.color))
        };
        self.clock.reset();
        vec![GameEvent::Restarted]
    }

    fn step_frame(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.phase != RunnerPhase::Running {
            return;
        }
        let secs = self.state.run_secs();
        if secs >= self.config.survive_secs {
            self.state.phase = RunnerPhase::Won;
            self.state.exit = Some(Countdown::new(self.config.completion_delay_secs));
            events.push(GameEvent::Won);
            return;
        }
        self.state.score = (secs * 10.0).floor() as u32;

        self.state.velocity += self.config.gravity;
        self.state.runner_y += self.state.velocity;
        let ground = self.ground_top();
        if self.state.runner_y >= ground {
            self.state.runner_y = ground;
            self.state.velocity = 0.0;
            self.state.airborne = false;
        }

        let speed = self.config.speed_at(secs);
        self.state.run_frames = self.state.run_frames.saturating_add(1);
        let since_spawn = self.state.run_frames.saturating_sub(self.state.last_spawn_frame);
        if since_spawn > self.config.spawn_interval_at(secs) {
            self.state.last_spawn_frame = self.state.run_frames;
            let id = self.state.next_obstacle_id;
            self.state.next_obstacle_id = self.state.next_obstacle_id.wrapping_add(1);
            self.state
                .obstacles
                .push(Obstacle::spawn(id, self.config.spawn_x, &mut self.rng));
        }

        let cull_x = self.config.cull_x;
        for ob in self.state.obstacles.iter_mut() {
            ob.x -= speed;
        }
        self.state.obstacles.retain(|ob| ob.x > cull_x);

        let runner = Aabb::runner(
            self.config.runner_x,
            self.state.runner_y,
            self.config.runner_size,
        );
        let hit = self
            .state
            .obstacles
            .iter()
            .any(|ob| runner.overlaps(&Aabb::obstacle(ob, self.config.ground_y)));
        if hit {
            tracing::debug!(secs, "Runner crashed");
            self.state.phase = RunnerPhase::Dead;
            events.push(GameEvent::Failed);
        }
    }
}

impl Default for RunnerGame {
    fn default() -> Self {
        Self::with_config(RunnerConfig::default())
    }
}

impl GatingGame for RunnerGame {
    fn kind(&self) -> GameKind {
        GameKind::TimedRunner
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Dino Runner".to_string(),
            banner: "[FIREWALL_ACTIVE] // SURVIVE TO BREACH".to_string(),
            prompt: "[ TAP / SPACE TO JUMP ]".to_string(),
            estimated_duration: Duration::from_secs(12),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        self.rng = setup.rng();
        self.state = RunnerState::fresh(&self.config, setup.color.clone());
        self.clock.reset();
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        self.state.elapsed += dt.max(0.0);
        let mut events = Vec::new();

        if let Some(exit) = self.state.exit.as_mut() {
            if exit.tick(dt) {
                self.state.complete = true;
                events.push(GameEvent::Completed);
            }
            return events;
        }

        for _ in 0..self.clock.advance(dt) {
            self.step_frame(&mut events);
        }
        events
    }

    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        match input {
            GameInput::Activate => {
                self.jump();
                Vec::new()
            },
            GameInput::Restart => self.restart(),
            other => {
                tracing::debug!(input = ?other, "Dropped input not used by runner game");
                Vec::new()
            },
        }
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        match code {
            "Space" | "ArrowUp" | "KeyW" => Some(GameInput::Activate),
            "Enter" => Some(GameInput::Restart),
            _ => None,
        }
    }

    gating_game_boilerplate!(state_type: RunnerState);
}
