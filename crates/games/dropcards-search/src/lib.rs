pub mod config;

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{
    Direction, GameEvent, GameInput, GameMetadata, GameSetup, GatingGame, SnapshotCheck,
};
use dropcards_core::gating_game_boilerplate;
use dropcards_core::timing::Countdown;

use config::SearchConfig;

/// Decorative glyphs printed on covered blocks.
pub const BLOCK_GLYPHS: [char; 10] = ['#', '*', '~', '+', '@', '%', '&', '^', '!', '?'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    Playing,
    /// Target uncovered, cell glowing.
    Found,
    /// Hidden entity leaving the board.
    Exiting,
    /// Animations finished, completion pending.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub glyph: char,
    pub revealed: bool,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchState {
    pub cols: usize,
    pub rows: usize,
    pub blocks: Vec<Block>,
    target: usize,
    /// Keyboard cursor cell.
    pub cursor: usize,
    pub phase: SearchPhase,
    pub timer: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl SearchState {
    fn empty() -> Self {
        Self {
            cols: 0,
            rows: 0,
            blocks: Vec::new(),
            target: 0,
            cursor: 0,
            phase: SearchPhase::Playing,
            timer: None,
            elapsed: 0.0,
            color: String::new(),
            complete: false,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.revealed).count()
    }

    /// Whether a revealed cell holds the hidden entity. Covered cells never
    /// report it. The raw position is still part of the snapshot, so
    /// renderers should draw from this query only.
    pub fn shows_target(&self, index: usize) -> bool {
        index == self.target && self.blocks.get(index).is_some_and(|b| b.revealed)
    }

    /// `(col, row)` of a cell index.
    pub fn cell_position(&self, index: usize) -> (usize, usize) {
        let cols = self.cols.max(1);
        (index % cols, index / cols)
    }
}

impl SnapshotCheck for SearchState {
    fn is_consistent(&self) -> bool {
        let cells = self.cols.checked_mul(self.rows).unwrap_or(0);
        self.cols >= 1
            && self.rows >= 1
            && self.blocks.len() == cells
            && self.target < cells
            && self.cursor < cells
    }
}

/// Uncover blocks until the hidden one turns up.
pub struct SearchGame {
    state: SearchState,
    config: SearchConfig,
}

impl SearchGame {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::load())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            state: SearchState::empty(),
            config,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[cfg(test)]
    fn target(&self) -> usize {
        self.state.target
    }

    fn reveal(&mut self, index: usize) -> Vec<GameEvent> {
        if self.state.phase != SearchPhase::Playing {
            return Vec::new();
        }
        let Some(block) = self.state.blocks.get_mut(index) else {
            tracing::debug!(index, "Reveal ignored: cell out of range");
            return Vec::new();
        };
        if block.revealed {
            return Vec::new();
        }
        block.revealed = true;
        self.state.cursor = index;

        if index == self.state.target {
            self.state.phase = SearchPhase::Found;
            self.state.timer = Some(Countdown::new(self.config.highlight_secs));
            vec![GameEvent::Won]
        } else {
            vec![GameEvent::Miss]
        }
    }

    fn move_cursor(&mut self, dir: Direction) {
        if self.state.blocks.is_empty() {
            return;
        }
        let (col, row) = self.state.cell_position(self.state.cursor);
        let (dx, dy) = dir.offset();
        let col = (col as i32 + dx).clamp(0, self.state.cols as i32 - 1) as usize;
        let row = (row as i32 + dy).clamp(0, self.state.rows as i32 - 1) as usize;
        self.state.cursor = row * self.state.cols + col;
    }
}

impl Default for SearchGame {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl GatingGame for SearchGame {
    fn kind(&self) -> GameKind {
        GameKind::HiddenObjectSearch
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Block Uncover".to_string(),
            banner: "[ENTITY_HIDDEN] // LOCATE THE FROG TO PROCEED".to_string(),
            prompt: "[ CLICK BLOCKS TO SEARCH ]".to_string(),
            estimated_duration: Duration::from_secs(10),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        let (cols, rows) = self.config.dimensions();
        let total = cols * rows;
        let mut rng = setup.rng();
        let target = rng.random_range(0..total);
        let blocks = (0..total)
            .map(|_| Block {
                glyph: BLOCK_GLYPHS[fastrand::usize(..BLOCK_GLYPHS.len())],
                revealed: false,
            })
            .collect();
        self.state = SearchState {
            cols,
            rows,
            blocks,
            target,
            color: setup.color.clone(),
            ..SearchState::empty()
        };
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        self.state.elapsed += dt.max(0.0);

        let Some(timer) = self.state.timer.as_mut() else {
            return Vec::new();
        };
        if !timer.tick(dt) {
            return Vec::new();
        }
        match self.state.phase {
            SearchPhase::Found => {
                self.state.phase = SearchPhase::Exiting;
                self.state.timer = Some(Countdown::new(self.config.exit_secs));
                Vec::new()
            },
            SearchPhase::Exiting => {
                self.state.phase = SearchPhase::Done;
                self.state.timer = Some(Countdown::new(self.config.completion_delay_secs));
                Vec::new()
            },
            SearchPhase::Done => {
                self.state.timer = None;
                self.state.complete = true;
                vec![GameEvent::Completed]
            },
            SearchPhase::Playing => {
                self.state.timer = None;
                Vec::new()
            },
        }
    }

    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        match input {
            GameInput::Select(index) => self.reveal(*index),
            GameInput::Activate => self.reveal(self.state.cursor),
            GameInput::Steer(dir) => {
                if self.state.phase == SearchPhase::Playing {
                    self.move_cursor(*dir);
                }
                Vec::new()
            },
            other => {
                tracing::debug!(input = ?other, "Dropped input not used by search game");
                Vec::new()
            },
        }
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        match code {
            "Space" | "Enter" => Some(GameInput::Activate),
            _ => Direction::from_key(code).map(GameInput::Steer),
        }
    }

    gating_game_boilerplate!(state_type: SearchState);
}
