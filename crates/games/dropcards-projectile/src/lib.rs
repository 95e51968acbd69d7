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

use config::ProjectileConfig;

/// Palette size for debris: theme color, white, amber, orange, red.
pub const DEBRIS_PALETTE_LEN: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    /// Waiting for the player to fire.
    Ready,
    /// A projectile is in flight; further fire actions are ignored.
    Firing,
    /// Target destroyed, debris animating.
    Exploding,
    /// Explosion finished, completion pending.
    Done,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    pub phase: ProjectilePhase,
    pub hits: u32,
    pub hits_needed: u32,
    /// Height of the projectile in flight.
    pub projectile_y: Option<f32>,
    pub particles: Vec<Particle>,
    pub explosion_frame: u32,
    pub exit: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl ProjectileState {
    fn empty() -> Self {
        Self {
            phase: ProjectilePhase::Ready,
            hits: 0,
            hits_needed: 1,
            projectile_y: None,
            particles: Vec::new(),
            explosion_frame: 0,
            exit: None,
            elapsed: 0.0,
            color: String::new(),
            complete: false,
        }
    }

    /// Visual damage level of the target in `[0, 1]`.
    pub fn damage(&self) -> f32 {
        if self.hits_needed == 0 {
            return 1.0;
        }
        (self.hits as f32 / self.hits_needed as f32).min(1.0)
    }
}

impl SnapshotCheck for ProjectileState {
    fn is_consistent(&self) -> bool {
        let destroyed = matches!(self.phase, ProjectilePhase::Exploding | ProjectilePhase::Done);
        self.hits_needed >= 1 && (self.hits < self.hits_needed) != destroyed
    }
}

/// Shoot the target N times to break through.
pub struct ProjectileGame {
    state: ProjectileState,
    clock: FixedStep,
    config: ProjectileConfig,
}

impl ProjectileGame {
    pub fn new() -> Self {
        Self::with_config(ProjectileConfig::load())
    }

    pub fn with_config(config: ProjectileConfig) -> Self {
        Self {
            state: ProjectileState::empty(),
            clock: FixedStep::frames(),
            config,
        }
    }

    pub fn state(&self) -> &ProjectileState {
        &self.state
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    fn fire(&mut self) {
        if self.state.phase != ProjectilePhase::Ready {
            tracing::debug!(phase = ?self.state.phase, "Fire ignored");
            return;
        }
        self.state.phase = ProjectilePhase::Firing;
        self.state.projectile_y = Some(self.config.launch_y);
    }

    fn step_frame(&mut self, events: &mut Vec<GameEvent>) {
        match self.state.phase {
            ProjectilePhase::Firing => {
                let Some(y) = self.state.projectile_y else {
                    self.state.phase = ProjectilePhase::Ready;
                    return;
                };
                let y = y - self.config.projectile_speed;
                if y > self.config.target_y {
                    self.state.projectile_y = Some(y);
                    return;
                }
                self.state.projectile_y = None;
                self.state.hits = self.state.hits.saturating_add(1);
                events.push(GameEvent::Hit {
                    hits: self.state.hits,
                    needed: self.state.hits_needed,
                });
                if self.state.hits >= self.state.hits_needed {
                    self.explode();
                    events.push(GameEvent::Won);
                } else {
                    self.state.phase = ProjectilePhase::Ready;
                }
            },
            ProjectilePhase::Exploding => {
                step_particles(
                    &mut self.state.particles,
                    &ParticleMotion {
                        gravity: self.config.particle_gravity,
                        fade: self.config.particle_fade,
                        shrink: self.config.particle_shrink,
                        spin: 0.0,
                    },
                );
                self.state.explosion_frame = self.state.explosion_frame.saturating_add(1);
                if self.state.explosion_frame >= self.config.explosion_frames {
                    self.state.phase = ProjectilePhase::Done;
                    self.state.exit = Some(Countdown::new(self.config.completion_delay_secs));
                }
            },
            ProjectilePhase::Ready | ProjectilePhase::Done => {},
        }
    }

    fn explode(&mut self) {
        self.state.phase = ProjectilePhase::Exploding;
        self.state.explosion_frame = 0;
        self.state.particles = radial_burst(&Burst {
            count: self.config.particle_count,
            origin: (self.config.center_x, self.config.target_y),
            spawn_radius: 0.0,
            speed: (2.0, 7.0),
            size: (3.0, 9.0),
            jitter: 0.5,
            palette_len: DEBRIS_PALETTE_LEN,
        });
    }
}

impl Default for ProjectileGame {
    fn default() -> Self {
        Self::with_config(ProjectileConfig::default())
    }
}

impl GatingGame for ProjectileGame {
    fn kind(&self) -> GameKind {
        GameKind::ProjectileDestroy
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Asteroid Shoot".to_string(),
            banner: "[THREAT_DETECTED] // DESTROY TO PROCEED".to_string(),
            prompt: "[ TAP TO FIRE ]".to_string(),
            estimated_duration: Duration::from_secs(8),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        let (lo, hi) = self.config.hit_range();
        let mut rng = setup.rng();
        self.state = ProjectileState {
            hits_needed: rng.random_range(lo..=hi),
            color: setup.color.clone(),
            ..ProjectileState::empty()
        };
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
            GameInput::Activate => self.fire(),
            other => tracing::debug!(input = ?other, "Dropped input not used by projectile game"),
        }
        Vec::new()
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        match code {
            "Space" | "Enter" => Some(GameInput::Activate),
            _ => None,
        }
    }

    gating_game_boilerplate!(state_type: ProjectileState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropcards_core::test_helpers::{count_completions, make_setup, run_game_ticks};

    const FRAME: f32 = 1.0 / 60.0;

    fn game_with_hits(n: u32) -> ProjectileGame {
        let mut game = ProjectileGame::with_config(ProjectileConfig {
            min_hits: n,
            max_hits: n,
            ..Default::default()
        });
        game.init(&make_setup(1));
        game
    }

    /// Fire once and let the projectile land.
    fn fire_and_land(game: &mut ProjectileGame) -> Vec<GameEvent> {
        let mut events = game.apply_input(&GameInput::Activate);
        events.extend(run_game_ticks(game, 30, FRAME));
        events
    }

    #[test]
    fn hit_target_drawn_in_range() {
        for seed in 0..200 {
            let mut game = ProjectileGame::default();
            game.init(&make_setup(seed));
            assert!((2..=12).contains(&game.state.hits_needed));
        }
    }

    #[test]
    fn hit_target_reproducible_per_seed() {
        let mut a = ProjectileGame::default();
        let mut b = ProjectileGame::default();
        a.init(&make_setup(99));
        b.init(&make_setup(99));
        assert_eq!(a.state.hits_needed, b.state.hits_needed);
    }

    #[test]
    fn exactly_n_hits_required() {
        for n in [2, 3, 7, 12] {
            let mut game = game_with_hits(n);
            for i in 1..n {
                let events = fire_and_land(&mut game);
                assert!(events.contains(&GameEvent::Hit { hits: i, needed: n }));
                // Plenty of idle time after hit N-1 must not complete the game.
                let idle = run_game_ticks(&mut game, 300, FRAME);
                assert_eq!(count_completions(&idle), 0);
                assert!(!game.is_complete());
                assert_eq!(game.state.phase, ProjectilePhase::Ready);
            }
            let mut events = fire_and_land(&mut game);
            assert!(events.contains(&GameEvent::Won));
            events.extend(run_game_ticks(&mut game, 120, FRAME));
            assert_eq!(count_completions(&events), 1, "n = {n}");
            assert!(game.is_complete());
        }
    }

    #[test]
    fn fire_ignored_while_in_flight() {
        let mut game = game_with_hits(5);
        game.apply_input(&GameInput::Activate);
        run_game_ticks(&mut game, 3, FRAME);
        let y = game.state.projectile_y;
        game.apply_input(&GameInput::Activate);
        assert_eq!(game.state.projectile_y, y);
        run_game_ticks(&mut game, 30, FRAME);
        assert_eq!(game.state.hits, 1);
    }

    #[test]
    fn damage_scales_with_hits() {
        let mut game = game_with_hits(4);
        assert_eq!(game.state.damage(), 0.0);
        fire_and_land(&mut game);
        assert!((game.state.damage() - 0.25).abs() < 1e-6);
        fire_and_land(&mut game);
        assert!((game.state.damage() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn explosion_spawns_particles_then_waits() {
        let mut game = game_with_hits(1);
        fire_and_land(&mut game);
        assert!(matches!(
            game.state.phase,
            ProjectilePhase::Exploding | ProjectilePhase::Done
        ));
        assert!(!game.is_complete(), "completion waits for the explosion");
        run_game_ticks(&mut game, 60, FRAME);
        assert!(game.is_complete());
    }

    #[test]
    fn fire_and_enter_are_bound() {
        let game = ProjectileGame::default();
        assert_eq!(game.key_binding("Space"), Some(GameInput::Activate));
        assert_eq!(game.key_binding("Enter"), Some(GameInput::Activate));
        assert_eq!(game.key_binding("ArrowRight"), None);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_init_creates_state() {
        let mut game = ProjectileGame::default();
        dropcards_core::test_helpers::contract_init_creates_state(&mut game);
    }

    #[test]
    fn contract_apply_input_changes_state() {
        let mut game = game_with_hits(3);
        dropcards_core::test_helpers::contract_apply_input_changes_state(
            &mut game,
            &GameInput::Activate,
        );
    }

    #[test]
    fn contract_update_advances_time() {
        let mut game = game_with_hits(3);
        dropcards_core::test_helpers::contract_update_advances_time(&mut game);
    }

    #[test]
    fn contract_completes_exactly_once() {
        let mut game = game_with_hits(2);
        dropcards_core::test_helpers::contract_completes_exactly_once(&mut game, |g| {
            let mut events = Vec::new();
            for _ in 0..2 {
                events.extend(g.apply_input(&GameInput::Activate));
                events.extend(run_game_ticks(g, 30, FRAME));
            }
            events
        });
        dropcards_core::test_helpers::contract_update_after_complete_is_noop(&mut game);
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = game_with_hits(3);
        fire_and_land(&mut game);
        dropcards_core::test_helpers::contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_apply_state_garbage_ignored() {
        let mut game = game_with_hits(3);
        dropcards_core::test_helpers::contract_apply_state_garbage_ignored(&mut game);
    }

    #[test]
    fn contract_apply_state_inconsistent_ignored() {
        let mut game = game_with_hits(3);
        let mut no_target = game.state.clone();
        no_target.hits_needed = 0;
        let mut overshot = game.state.clone();
        overshot.hits = 7;
        for broken in [no_target, overshot] {
            let bytes = rmp_serde::to_vec(&broken).unwrap();
            dropcards_core::test_helpers::contract_apply_state_inconsistent_ignored(
                &mut game,
                &bytes,
            );
        }
        assert_eq!(game.state.hits_needed, 3);
        assert!(game.state.hits < 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hits_never_exceed_target(seed in 0u64..500, presses in 0usize..40) {
                let mut game = ProjectileGame::default();
                game.init(&make_setup(seed));
                for _ in 0..presses {
                    game.apply_input(&GameInput::Activate);
                    game.update(0.25);
                }
                prop_assert!(game.state.hits <= game.state.hits_needed);
                prop_assert!((0.0..=1.0).contains(&game.state.damage()));
            }
        }
    }
}
