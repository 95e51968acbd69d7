pub mod config;

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{
    GameEvent, GameInput, GameMetadata, GameSetup, GatingGame, SnapshotCheck,
};
use dropcards_core::gating_game_boilerplate;
use dropcards_core::particles::{Burst, Particle, ParticleMotion, radial_burst, step_particles};
use dropcards_core::timing::{Countdown, FixedStep};

use config::FractureConfig;

/// A cosmetic crack line on the overlay, in card percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crack {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub length: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FracturePhase {
    Intact,
    /// Overlay gone, shards flying.
    Shattering,
    /// Shards settled, completion pending.
    Done,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractureState {
    pub phase: FracturePhase,
    pub hits: u32,
    pub hits_needed: u32,
    /// Text under the overlay.
    pub card_text: String,
    pub cracks: Vec<Crack>,
    pub shards: Vec<Particle>,
    pub shard_frame: u32,
    pub shake: Option<Countdown>,
    pub exit: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl FractureState {
    fn empty() -> Self {
        Self {
            phase: FracturePhase::Intact,
            hits: 0,
            hits_needed: 1,
            card_text: String::new(),
            cracks: Vec::new(),
            shards: Vec::new(),
            shard_frame: 0,
            shake: None,
            exit: None,
            elapsed: 0.0,
            color: String::new(),
            complete: false,
        }
    }

    fn progress(&self) -> f32 {
        if self.hits_needed == 0 {
            return 1.0;
        }
        self.hits as f32 / self.hits_needed as f32
    }

    pub fn shattered(&self) -> bool {
        self.phase != FracturePhase::Intact
    }

    pub fn hits_remaining(&self) -> u32 {
        self.hits_needed.saturating_sub(self.hits)
    }

    pub fn shaking(&self) -> bool {
        self.shake.is_some_and(|s| !s.has_fired())
    }
}

impl SnapshotCheck for FractureState {
    fn is_consistent(&self) -> bool {
        let intact = self.phase == FracturePhase::Intact;
        self.hits_needed >= 1 && intact == (self.hits < self.hits_needed)
    }
}

/// Break the frosted overlay to read the card.
pub struct FractureGame {
    state: FractureState,
    clock: FixedStep,
    config: FractureConfig,
}

impl FractureGame {
    pub fn new() -> Self {
        Self::with_config(FractureConfig::load())
    }

    pub fn with_config(config: FractureConfig) -> Self {
        Self {
            state: FractureState::empty(),
            clock: FixedStep::frames(),
            config,
        }
    }

    pub fn state(&self) -> &FractureState {
        &self.state
    }

    /// Overlay opacity; non-increasing in the hit count.
    pub fn overlay_opacity(&self) -> f32 {
        if self.state.shattered() {
            return 0.0;
        }
        (1.0 - self.state.progress() * self.config.opacity_drop).max(0.0)
    }

    /// Blur radius over the text in px; zero once shattered.
    pub fn blur_px(&self) -> f32 {
        if self.state.shattered() {
            return 0.0;
        }
        (self.config.max_blur - self.state.progress() * self.config.blur_drop).max(0.0)
    }

    fn hit(&mut self) -> Vec<GameEvent> {
        if self.state.shattered() {
            tracing::debug!("Hit ignored after shatter");
            return Vec::new();
        }
        self.state.hits = self.state.hits.saturating_add(1);
        self.state.shake = Some(Countdown::new(self.config.shake_secs));
        let hits = self.state.hits;
        let new_cracks = 2 + fastrand::usize(0..2);
        self.state.cracks.extend((0..new_cracks).map(|_| Crack {
            x: 20.0 + fastrand::f32() * 60.0,
            y: 15.0 + fastrand::f32() * 70.0,
            rotation: fastrand::f32() * 360.0,
            length: 20.0 + fastrand::f32() * 40.0 + hits as f32 * 5.0,
        }));

        let mut events = vec![GameEvent::Hit {
            hits,
            needed: self.state.hits_needed,
        }];
        if hits >= self.state.hits_needed {
            self.shatter();
            events.push(GameEvent::Won);
        }
        events
    }

    fn shatter(&mut self) {
        self.state.phase = FracturePhase::Shattering;
        self.state.shard_frame = 0;
        self.state.shards = radial_burst(&Burst {
            count: self.config.shard_count,
            origin: (50.0, 50.0),
            spawn_radius: 20.0,
            speed: (3.0, 7.0),
            size: (15.0, 40.0),
            jitter: 0.0,
            palette_len: 1,
        });
        self.clock.reset();
    }

    fn step_frame(&mut self) {
        if self.state.phase != FracturePhase::Shattering {
            return;
        }
        step_particles(
            &mut self.state.shards,
            &ParticleMotion {
                gravity: self.config.shard_gravity,
                fade: 0.0,
                shrink: 1.0,
                spin: self.config.shard_spin,
            },
        );
        self.state.shard_frame = self.state.shard_frame.saturating_add(1);
        if self.state.shard_frame >= self.config.shard_frames {
            self.state.phase = FracturePhase::Done;
            self.state.exit = Some(Countdown::new(self.config.completion_delay_secs));
        }
    }
}

impl Default for FractureGame {
    fn default() -> Self {
        Self::with_config(FractureConfig::default())
    }
}

impl GatingGame for FractureGame {
    fn kind(&self) -> GameKind {
        GameKind::FractureBreak
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Ice Break".to_string(),
            banner: "[DATA_FROZEN] // BREAK ICE TO DECRYPT".to_string(),
            prompt: "[ TAP TO BREAK ]".to_string(),
            estimated_duration: Duration::from_secs(5),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        let (lo, hi) = self.config.hit_range();
        let mut rng = setup.rng();
        self.state = FractureState {
            hits_needed: rng.random_range(lo..=hi),
            card_text: setup.card_text.clone(),
            color: setup.color.clone(),
            ..FractureState::empty()
        };
        self.clock.reset();
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        self.state.elapsed += dt.max(0.0);
        if let Some(shake) = self.state.shake.as_mut() {
            shake.tick(dt);
        }
        let mut events = Vec::new();

        if let Some(exit) = self.state.exit.as_mut() {
            if exit.tick(dt) {
                self.state.complete = true;
                events.push(GameEvent::Completed);
            }
            return events;
        }

        for _ in 0..self.clock.advance(dt) {
            self.step_frame();
        }
        events
    }

    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        match input {
            GameInput::Activate => self.hit(),
            other => {
                tracing::debug!(input = ?other, "Dropped input not used by fracture game");
                Vec::new()
            },
        }
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        match code {
            "Space" | "Enter" => Some(GameInput::Activate),
            _ => None,
        }
    }

    gating_game_boilerplate!(state_type: FractureState);
}
