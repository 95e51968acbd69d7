use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game_kind::GameKind;

/// Core trait that every gating mini-game implements.
///
/// The viewer owns reveal timing, input routing, and teardown; the game only
/// handles its own rules and reports progress through the returned events.
/// A game is driven entirely by the host: it never schedules its own timers,
/// so dropping the boxed game is all the cancellation teardown needs.
pub trait GatingGame: Send {
    /// Which kind of game this is.
    fn kind(&self) -> GameKind;

    /// Display metadata (title banner, instructions).
    fn metadata(&self) -> GameMetadata;

    /// Called once when the gating phase for a card begins.
    fn init(&mut self, setup: &GameSetup);

    /// Advance the game clock by `dt` seconds. Returns events raised this tick.
    fn update(&mut self, dt: f32) -> Vec<GameEvent>;

    /// Apply a routed player action. Returns events raised immediately.
    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent>;

    /// Translate a keyboard code (`KeyboardEvent.code` naming) into an action.
    /// Only consulted while this game owns the gating phase.
    fn key_binding(&self, code: &str) -> Option<GameInput>;

    /// Whether free text entry should be routed to this game.
    fn accepts_text(&self) -> bool {
        false
    }

    /// Preferred driver rate in Hz. The viewer may tick faster or slower;
    /// games step internally on their own fixed clocks.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Serialize the render snapshot for the presentation shell.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the current state with a previously serialized snapshot.
    /// Data that fails to decode or breaks the state's invariants is ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Whether the game has emitted its single `Completed` event.
    fn is_complete(&self) -> bool;
}

/// Game metadata for the gating banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub banner: String,
    pub prompt: String,
    pub estimated_duration: Duration,
}

/// Everything a game receives when its gating phase starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSetup {
    /// Accent color of the deck, as a CSS color string.
    pub color: String,
    /// Literal card text. Only the word-recall and fracture games read it.
    pub card_text: String,
    /// Seed for gameplay randomness (targets, placements, keyword choice).
    pub seed: u64,
}

impl GameSetup {
    /// Seeded generator for gameplay randomness.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

/// Cardinal direction for grid movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit grid offset `(dx, dy)`, y growing downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map arrow keys and WASD to a direction.
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Direction::Up),
            "ArrowDown" | "KeyS" => Some(Direction::Down),
            "ArrowLeft" | "KeyA" => Some(Direction::Left),
            "ArrowRight" | "KeyD" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A player action routed to the active game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameInput {
    /// Primary action: fire, hit, jump, start (space/enter/tap).
    Activate,
    /// Directional request (arrow keys, WASD, on-screen pad).
    Steer(Direction),
    /// Pointer activation on a numbered cell.
    Select(usize),
    /// Submitted free-text guess.
    Guess(String),
    /// Give up on a text challenge.
    Skip,
    /// Retry after a failed run.
    Restart,
}

/// Events emitted by a game during update or input handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A hit landed against a hit-count target.
    Hit { hits: u32, needed: u32 },
    /// An action that made no progress (empty cell, wrong guess).
    Miss,
    /// A collectible was picked up.
    Collected { remaining: u32 },
    /// A new hint level became visible.
    Hint { level: u8 },
    /// The run failed; the game is waiting for a retry.
    Failed,
    /// A failed run was reset.
    Restarted,
    /// Win condition satisfied; the exit animation is playing.
    Won,
    /// Terminal event. Emitted exactly once per game instance.
    Completed,
}

/// Invariants a decoded snapshot must satisfy before a game adopts it.
pub trait SnapshotCheck {
    fn is_consistent(&self) -> bool;
}

/// Generates the boilerplate `GatingGame` methods shared by every game:
/// `serialize_state`, `apply_state`, `is_complete`.
///
/// Requires the implementing struct to have a `state: $StateType` field,
/// and `$StateType` to have a `complete: bool` field and implement
/// [`SnapshotCheck`].
#[macro_export]
macro_rules! gating_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) if $crate::game_trait::SnapshotCheck::is_consistent(&s) => self.state = s,
                Ok(_) => tracing::debug!("Ignored inconsistent game state"),
                Err(e) => tracing::debug!(error = %e, "Ignored malformed game state"),
            }
        }

        fn is_complete(&self) -> bool {
            self.state.complete
        }
    };
}
