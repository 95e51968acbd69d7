pub mod config;
pub mod maze;

use std::time::Duration;

use rand::seq::index;
use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{
    Direction, GameEvent, GameInput, GameMetadata, GameSetup, GatingGame, SnapshotCheck,
};
use dropcards_core::gating_game_boilerplate;
use dropcards_core::timing::{Countdown, FixedStep};

use config::MazeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazePhase {
    /// Board drawn, waiting for the first direction or start press.
    Ready,
    Playing,
    /// Every collectible eaten; completion pending.
    Cleared,
}

/// A pellet on an open cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
    /// Collectibles gate completion; plain dots only add score.
    pub collectible: bool,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub phase: MazePhase,
    pub agent: (i32, i32),
    pub facing: Direction,
    /// Buffered turn, applied on the first step where it is legal.
    pub queued: Option<Direction>,
    pub dots: Vec<Dot>,
    pub score: u32,
    pub mouth_open: bool,
    pub exit: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl MazeState {
    fn empty() -> Self {
        Self {
            phase: MazePhase::Ready,
            agent: maze::START,
            facing: Direction::Right,
            queued: None,
            dots: Vec::new(),
            score: 0,
            mouth_open: true,
            exit: None,
            elapsed: 0.0,
            color: String::new(),
            complete: false,
        }
    }

    /// Collectibles still on the board.
    pub fn collectibles_left(&self) -> u32 {
        self.dots.iter().filter(|d| d.collectible).count() as u32
    }
}

impl SnapshotCheck for MazeState {
    fn is_consistent(&self) -> bool {
        maze::is_path(self.agent.0, self.agent.1)
            && self.dots.iter().all(|d| maze::is_path(d.x, d.y))
            && (self.phase == MazePhase::Cleared || self.collectibles_left() > 0)
    }
}

/// Steer the agent through the maze and eat every collectible.
pub struct MazeGame {
    state: MazeState,
    clock: FixedStep,
    config: MazeConfig,
}

impl MazeGame {
    pub fn new() -> Self {
        Self::with_config(MazeConfig::load())
    }

    pub fn with_config(config: MazeConfig) -> Self {
        Self {
            state: MazeState::empty(),
            clock: FixedStep::new(config.tick_secs),
            config,
        }
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    fn steer(&mut self, dir: Direction) {
        self.state.queued = Some(dir);
        if self.state.phase == MazePhase::Ready {
            self.start();
        }
    }

    fn start(&mut self) {
        if self.state.phase != MazePhase::Ready {
            return;
        }
        self.state.phase = MazePhase::Playing;
        self.clock.reset();
    }

    fn step(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.phase != MazePhase::Playing {
            return;
        }
        let (x, y) = self.state.agent;
        if let Some(dir) = self.state.queued
            && maze::can_move(x, y, dir)
        {
            self.state.facing = dir;
            self.state.queued = None;
        }
        self.state.mouth_open = !self.state.mouth_open;
        if !maze::can_move(x, y, self.state.facing) {
            return;
        }
        let next = maze::neighbor(x, y, self.state.facing);
        self.state.agent = next;

        let Some(pos) = self
            .state
            .dots
            .iter()
            .position(|d| (d.x, d.y) == next)
        else {
            return;
        };
        let dot = self.state.dots.swap_remove(pos);
        if !dot.collectible {
            self.state.score = self.state.score.saturating_add(self.config.dot_score);
            return;
        }
        self.state.score = self.state.score.saturating_add(self.config.collectible_score);
        let remaining = self.state.collectibles_left();
        events.push(GameEvent::Collected { remaining });
        if remaining == 0 {
            self.state.phase = MazePhase::Cleared;
            self.state.exit = Some(Countdown::new(self.config.completion_delay_secs));
            events.push(GameEvent::Won);
        }
    }
}

impl Default for MazeGame {
    fn default() -> Self {
        Self::with_config(MazeConfig::default())
    }
}

impl GatingGame for MazeGame {
    fn kind(&self) -> GameKind {
        GameKind::MazeCollector
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Maze Run".to_string(),
            banner: "[DATA_LOCKED] // COLLECT ALL NODES".to_string(),
            prompt: "ARROWS / WASD / D-PAD TO MOVE".to_string(),
            estimated_duration: Duration::from_secs(20),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        let cells = maze::dot_cells();
        let count = self.config.collectibles.max(1).min(cells.len());
        let mut rng = setup.rng();
        let picked = index::sample(&mut rng, cells.len(), count);
        let mut dots: Vec<Dot> = cells
            .iter()
            .map(|&(x, y)| Dot {
                x,
                y,
                collectible: false,
            })
            .collect();
        for i in picked.iter() {
            dots[i].collectible = true;
        }
        self.state = MazeState {
            dots,
            color: setup.color.clone(),
            ..MazeState::empty()
        };
        self.clock = FixedStep::new(self.config.tick_secs);
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
            self.step(&mut events);
            if self.state.phase == MazePhase::Cleared {
                break;
            }
        }
        events
    }

    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        if self.state.complete || self.state.phase == MazePhase::Cleared {
            return Vec::new();
        }
        match input {
            GameInput::Steer(dir) => self.steer(*dir),
            GameInput::Activate => self.start(),
            other => tracing::debug!(input = ?other, "Dropped input not used by maze game"),
        }
        Vec::new()
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        if let Some(dir) = Direction::from_key(code) {
            return Some(GameInput::Steer(dir));
        }
        match code {
            "Space" | "Enter" => Some(GameInput::Activate),
            _ => None,
        }
    }

    fn tick_rate(&self) -> f32 {
        1.0 / self.config.tick_secs.max(0.01)
    }

    gating_game_boilerplate!(state_type: MazeState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropcards_core::test_helpers::{count_completions, make_setup, run_game_ticks};
    use std::collections::{HashMap, VecDeque};

    const TICK: f32 = 0.15;

    fn started(seed: u64) -> MazeGame {
        let mut game = MazeGame::default();
        game.init(&make_setup(seed));
        game.apply_input(&GameInput::Activate);
        game
    }

    fn step_once(game: &mut MazeGame) -> Vec<GameEvent> {
        game.update(TICK)
    }

    /// Direction of the first move on a shortest path from `from` to `to`.
    fn first_step_toward(from: (i32, i32), to: (i32, i32)) -> Option<Direction> {
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut came: HashMap<(i32, i32), Direction> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            if cell == to {
                break;
            }
            for dir in dirs {
                let next = maze::neighbor(cell.0, cell.1, dir);
                if maze::is_path(next.0, next.1) && next != from && !came.contains_key(&next) {
                    let first = came.get(&cell).copied().unwrap_or(dir);
                    came.insert(next, first);
                    queue.push_back(next);
                }
            }
        }
        came.get(&to).copied()
    }

    /// Steer toward the nearest collectible each step until the board clears.
    fn autopilot(
        game: &mut dyn GatingGame,
        state: impl Fn(&dyn GatingGame) -> MazeState,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..2000 {
            let snapshot = state(&*game);
            if snapshot.phase == MazePhase::Cleared || snapshot.complete {
                break;
            }
            let target = snapshot
                .dots
                .iter()
                .filter(|d| d.collectible)
                .map(|d| (d.x, d.y))
                .next();
            if let Some(target) = target
                && let Some(dir) = first_step_toward(snapshot.agent, target)
            {
                events.extend(game.apply_input(&GameInput::Steer(dir)));
            }
            events.extend(game.update(TICK));
        }
        events
    }

    fn decode(game: &dyn GatingGame) -> MazeState {
        rmp_serde::from_slice(&game.serialize_state()).unwrap()
    }

    #[test]
    fn init_places_configured_collectibles() {
        for seed in 0..20 {
            let mut game = MazeGame::default();
            game.init(&make_setup(seed));
            assert_eq!(game.state.collectibles_left(), 5);
            assert_eq!(game.state.dots.len(), maze::dot_cells().len());
            assert!(
                game.state
                    .dots
                    .iter()
                    .all(|d| (d.x, d.y) != maze::START)
            );
        }
    }

    #[test]
    fn placement_reproducible_per_seed() {
        let mut a = MazeGame::default();
        let mut b = MazeGame::default();
        a.init(&make_setup(42));
        b.init(&make_setup(42));
        assert_eq!(a.state.dots, b.state.dots);
    }

    #[test]
    fn agent_waits_until_started() {
        let mut game = MazeGame::default();
        game.init(&make_setup(1));
        run_game_ticks(&mut game, 20, TICK);
        assert_eq!(game.state.agent, maze::START);
        assert_eq!(game.state.phase, MazePhase::Ready);
    }

    #[test]
    fn direction_starts_the_run() {
        let mut game = MazeGame::default();
        game.init(&make_setup(1));
        game.apply_input(&GameInput::Steer(Direction::Down));
        assert_eq!(game.state.phase, MazePhase::Playing);
        step_once(&mut game);
        assert_eq!(game.state.agent, (1, 2));
        assert_eq!(game.state.facing, Direction::Down);
    }

    #[test]
    fn buffered_turn_applies_when_legal() {
        let mut game = started(1);
        step_once(&mut game);
        assert_eq!(game.state.agent, (2, 1));

        // Down is walled at (2,1) and (3,1) but open at (4,1).
        game.apply_input(&GameInput::Steer(Direction::Down));
        step_once(&mut game);
        assert_eq!(game.state.agent, (3, 1));
        assert_eq!(game.state.queued, Some(Direction::Down));
        step_once(&mut game);
        assert_eq!(game.state.agent, (4, 1));
        step_once(&mut game);
        assert_eq!(game.state.agent, (4, 2));
        assert_eq!(game.state.facing, Direction::Down);
        assert_eq!(game.state.queued, None);
    }

    #[test]
    fn agent_stops_at_walls() {
        let mut game = started(1);
        for _ in 0..20 {
            step_once(&mut game);
        }
        // The corridor from (1,1) heading right ends at the wall at (8,1).
        assert_eq!(game.state.agent, (7, 1));
    }

    #[test]
    fn plain_dots_only_add_score() {
        let mut game = MazeGame::default();
        game.init(&make_setup(1));
        for dot in game.state.dots.iter_mut() {
            dot.collectible = (dot.x, dot.y) == (9, 9);
        }
        game.apply_input(&GameInput::Activate);
        let events = step_once(&mut game);
        assert!(events.is_empty());
        assert_eq!(game.state.score, 10);
        assert_eq!(game.state.collectibles_left(), 1);
        assert!(!game.is_complete());
    }

    #[test]
    fn clearing_collectibles_completes_after_delay() {
        let mut game = MazeGame::default();
        game.init(&make_setup(3));
        let events = autopilot(&mut game, decode);
        assert!(events.contains(&GameEvent::Won));
        assert!(events.contains(&GameEvent::Collected { remaining: 0 }));
        assert_eq!(game.state.phase, MazePhase::Cleared);
        assert!(!game.is_complete());

        let events = run_game_ticks(&mut game, 4, 0.15);
        assert_eq!(count_completions(&events), 0);
        let events = run_game_ticks(&mut game, 3, 0.15);
        assert_eq!(count_completions(&events), 1);
        assert!(game.is_complete());
    }

    #[test]
    fn steering_ignored_after_clear() {
        let mut game = MazeGame::default();
        game.init(&make_setup(5));
        autopilot(&mut game, decode);
        let agent = game.state.agent;
        game.apply_input(&GameInput::Steer(Direction::Left));
        run_game_ticks(&mut game, 3, TICK);
        assert_eq!(game.state.agent, agent);
    }

    #[test]
    fn keys_map_to_steer_and_start() {
        let game = MazeGame::default();
        assert_eq!(
            game.key_binding("KeyW"),
            Some(GameInput::Steer(Direction::Up))
        );
        assert_eq!(
            game.key_binding("ArrowLeft"),
            Some(GameInput::Steer(Direction::Left))
        );
        assert_eq!(game.key_binding("Space"), Some(GameInput::Activate));
        assert_eq!(game.key_binding("KeyQ"), None);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_init_creates_state() {
        let mut game = MazeGame::default();
        dropcards_core::test_helpers::contract_init_creates_state(&mut game);
    }

    #[test]
    fn contract_apply_input_changes_state() {
        let mut game = MazeGame::default();
        game.init(&make_setup(1));
        dropcards_core::test_helpers::contract_apply_input_changes_state(
            &mut game,
            &GameInput::Steer(Direction::Down),
        );
    }

    #[test]
    fn contract_update_advances_time() {
        let mut game = started(1);
        dropcards_core::test_helpers::contract_update_advances_time(&mut game);
    }

    #[test]
    fn contract_completes_exactly_once() {
        let mut game = MazeGame::default();
        game.init(&make_setup(9));
        dropcards_core::test_helpers::contract_completes_exactly_once(&mut game, |g| {
            autopilot(g, decode)
        });
        dropcards_core::test_helpers::contract_update_after_complete_is_noop(&mut game);
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = started(1);
        run_game_ticks(&mut game, 4, TICK);
        dropcards_core::test_helpers::contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_apply_state_garbage_ignored() {
        let mut game = started(1);
        dropcards_core::test_helpers::contract_apply_state_garbage_ignored(&mut game);
    }

    #[test]
    fn contract_apply_state_inconsistent_ignored() {
        let mut game = started(1);
        let mut in_wall = game.state.clone();
        in_wall.agent = (0, 0);
        let mut no_collectibles = game.state.clone();
        no_collectibles.dots.retain(|d| !d.collectible);
        for broken in [in_wall, no_collectibles] {
            let bytes = rmp_serde::to_vec(&broken).unwrap();
            dropcards_core::test_helpers::contract_apply_state_inconsistent_ignored(
                &mut game,
                &bytes,
            );
        }
        assert_eq!(game.state.collectibles_left(), 5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dir_strategy() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        proptest! {
            #[test]
            fn agent_stays_on_path(
                seed in 0u64..500,
                moves in proptest::collection::vec(dir_strategy(), 1..80)
            ) {
                let mut game = MazeGame::default();
                game.init(&make_setup(seed));
                for dir in moves {
                    game.apply_input(&GameInput::Steer(dir));
                    game.update(TICK);
                    let (x, y) = game.state.agent;
                    prop_assert!(maze::is_path(x, y), "agent in wall at ({x}, {y})");
                }
            }
        }
    }
}
