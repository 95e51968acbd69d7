pub mod config;
pub mod keyword;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{
    GameEvent, GameInput, GameMetadata, GameSetup, GatingGame, SnapshotCheck,
};
use dropcards_core::gating_game_boilerplate;
use dropcards_core::timing::Countdown;

use config::RecallConfig;
use keyword::{Keyword, hint, masked_text, normalize_guess, pick_keyword};

/// How the word ended up revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    Solved,
    /// Too many wrong guesses.
    Forced,
    Skipped,
}

/// Serializable render snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallState {
    pub card_text: String,
    pub keyword: Keyword,
    /// Wrong guesses so far.
    pub attempts: u32,
    pub hint_level: u8,
    pub revealed: Option<Reveal>,
    pub shake: Option<Countdown>,
    pub exit: Option<Countdown>,
    pub elapsed: f32,
    pub color: String,
    pub complete: bool,
}

impl RecallState {
    fn empty() -> Self {
        Self {
            card_text: String::new(),
            keyword: Keyword {
                word: String::new(),
                index: 0,
            },
            attempts: 0,
            hint_level: 0,
            revealed: None,
            shake: None,
            exit: None,
            elapsed: 0.0,
            color: String::new(),
            complete: false,
        }
    }

    /// Card text as shown: masked until revealed.
    pub fn display_text(&self) -> String {
        if self.revealed.is_some() {
            return self.card_text.clone();
        }
        masked_text(&self.card_text, &self.keyword)
    }

    /// Current hint, if any wrong guess has been made.
    pub fn hint(&self) -> Option<String> {
        hint(&self.keyword.word, self.hint_level)
    }
}

impl SnapshotCheck for RecallState {
    /// The keyword must be the letters of the token it points at.
    fn is_consistent(&self) -> bool {
        match self.card_text.split_whitespace().nth(self.keyword.index) {
            Some(token) => keyword::letters_only(token) == self.keyword.word,
            None => self.keyword.word.is_empty() && self.keyword.index == 0,
        }
    }
}

/// Fill in the missing word of the card.
pub struct RecallGame {
    state: RecallState,
    config: RecallConfig,
}

impl RecallGame {
    pub fn new() -> Self {
        Self::with_config(RecallConfig::load())
    }

    pub fn with_config(config: RecallConfig) -> Self {
        Self {
            state: RecallState::empty(),
            config,
        }
    }

    pub fn state(&self) -> &RecallState {
        &self.state
    }

    /// Whether the skip action is currently offered.
    pub fn can_skip(&self) -> bool {
        self.state.revealed.is_none() && self.state.attempts >= self.config.skip_after
    }

    fn reveal(&mut self, how: Reveal) {
        tracing::debug!(?how, attempts = self.state.attempts, "Keyword revealed");
        self.state.revealed = Some(how);
        self.state.exit = Some(Countdown::new(self.config.completion_delay_secs));
    }

    fn guess(&mut self, raw: &str) -> Vec<GameEvent> {
        if raw.trim().is_empty() {
            return Vec::new();
        }
        if normalize_guess(raw) == self.state.keyword.word {
            self.reveal(Reveal::Solved);
            return vec![GameEvent::Won];
        }

        self.state.attempts = self.state.attempts.saturating_add(1);
        self.state.shake = Some(Countdown::new(self.config.shake_secs));
        let mut events = vec![GameEvent::Miss];
        if self.state.hint_level < self.config.max_hint_level {
            self.state.hint_level += 1;
            events.push(GameEvent::Hint {
                level: self.state.hint_level,
            });
        }
        if self.state.attempts >= self.config.max_attempts {
            self.reveal(Reveal::Forced);
        }
        events
    }

    fn skip(&mut self) {
        if !self.can_skip() {
            tracing::debug!(attempts = self.state.attempts, "Skip not available yet");
            return;
        }
        self.reveal(Reveal::Skipped);
    }
}

impl Default for RecallGame {
    fn default() -> Self {
        Self::with_config(RecallConfig::default())
    }
}

impl GatingGame for RecallGame {
    fn kind(&self) -> GameKind {
        GameKind::WordRecall
    }

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Word Guess".to_string(),
            banner: "[PARTIAL_DECRYPT] // COMPLETE THE SEQUENCE".to_string(),
            prompt: "TYPE YOUR GUESS...".to_string(),
            estimated_duration: Duration::from_secs(15),
        }
    }

    fn init(&mut self, setup: &GameSetup) {
        let mut rng = setup.rng();
        self.state = RecallState {
            keyword: pick_keyword(&setup.card_text, &mut rng),
            card_text: setup.card_text.clone(),
            color: setup.color.clone(),
            ..RecallState::empty()
        };
    }

    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.complete {
            return Vec::new();
        }
        self.state.elapsed += dt.max(0.0);
        if let Some(shake) = self.state.shake.as_mut() {
            shake.tick(dt);
        }
        if let Some(exit) = self.state.exit.as_mut()
            && exit.tick(dt)
        {
            self.state.complete = true;
            return vec![GameEvent::Completed];
        }
        Vec::new()
    }

    fn apply_input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        if self.state.complete || self.state.revealed.is_some() {
            return Vec::new();
        }
        match input {
            GameInput::Guess(text) => self.guess(text),
            GameInput::Skip => {
                self.skip();
                Vec::new()
            },
            other => {
                tracing::debug!(input = ?other, "Dropped input not used by recall game");
                Vec::new()
            },
        }
    }

    fn key_binding(&self, code: &str) -> Option<GameInput> {
        match code {
            "Escape" if self.can_skip() => Some(GameInput::Skip),
            _ => None,
        }
    }

    fn accepts_text(&self) -> bool {
        true
    }

    gating_game_boilerplate!(state_type: RecallState);
}
