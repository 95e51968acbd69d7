//! Card navigation controller.
//!
//! Walks a deck intro → (gate → reveal)* → finished. Owns the current
//! index, the active mini-game, reveal timing, and input routing: shell
//! input goes to the active game while a card is gated and to the advance
//! action otherwise.

use dropcards_core::assignment::{Assignment, card_seed};
use dropcards_core::deck::Deck;
use dropcards_core::game_kind::GameKind;
use dropcards_core::game_trait::{GameEvent, GameInput, GameSetup, GatingGame};

use crate::celebration::Celebration;
use crate::config::ViewerConfig;
use crate::input::{ViewerInput, is_advance_key};
use crate::registry::GameRegistry;

/// Index value while the intro screen is shown.
pub const INTRO_INDEX: isize = -1;

/// Shell tick rate when no game is running.
pub const IDLE_TICK_RATE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Intro,
    /// A mini-game stands between the user and the current card.
    Gating,
    Revealed,
    Finished,
}

/// What changed in response to an input or tick.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    CardGated { index: usize, kind: GameKind },
    CardRevealed { index: usize },
    /// Pass-through of an event raised by the active game.
    Game { index: usize, event: GameEvent },
    DeckFinished,
    Restarted,
}

pub struct DeckNavigator {
    deck: Deck,
    assignment: Assignment,
    registry: GameRegistry,
    config: ViewerConfig,
    index: isize,
    phase: NavPhase,
    active: Option<Box<dyn GatingGame>>,
    /// Seconds until the next advance is accepted.
    cooldown: f32,
    celebration: Celebration,
}

impl DeckNavigator {
    /// Mount a deck. The gate plan is computed once here.
    pub fn new(deck: Deck, registry: GameRegistry, config: ViewerConfig) -> Self {
        let mut assignment = deck.assignment();
        if let Some(kind) = config.forced_kind() {
            assignment = assignment.force_kind(kind);
        }
        Self::with_assignment(deck, assignment, registry, config)
    }

    /// Mount a deck with an explicit gate plan.
    pub fn with_assignment(
        deck: Deck,
        assignment: Assignment,
        registry: GameRegistry,
        config: ViewerConfig,
    ) -> Self {
        let gated = assignment.gates().iter().filter(|g| g.game().is_some()).count();
        tracing::info!(deck = %deck.id, cards = deck.len(), gated, "Deck mounted");
        Self {
            deck,
            assignment,
            registry,
            config,
            index: INTRO_INDEX,
            phase: NavPhase::Intro,
            active: None,
            cooldown: 0.0,
            celebration: Celebration::default(),
        }
    }

    /// Leave the intro for the first card.
    pub fn start(&mut self) -> Vec<NavEvent> {
        if self.phase != NavPhase::Intro {
            tracing::debug!(phase = ?self.phase, "Start ignored outside intro");
            return Vec::new();
        }
        self.advance()
    }

    /// The global "next" action. Inert while a card is gated and during
    /// the cooldown after an accepted advance.
    pub fn advance(&mut self) -> Vec<NavEvent> {
        if self.phase == NavPhase::Gating {
            tracing::debug!(index = self.index, "Advance ignored while gated");
            return Vec::new();
        }
        if self.cooldown > 0.0 {
            tracing::debug!(cooldown = self.cooldown, "Advance ignored during cooldown");
            return Vec::new();
        }
        self.cooldown = self.config.advance_cooldown_secs;

        match self.phase {
            NavPhase::Intro => self.enter_card(0),
            NavPhase::Revealed => self.enter_card((self.index + 1) as usize),
            NavPhase::Finished => self.restart(),
            NavPhase::Gating => Vec::new(),
        }
    }

    /// Back to the intro. Any running game is dropped.
    pub fn restart(&mut self) -> Vec<NavEvent> {
        if self.active.take().is_some() {
            tracing::debug!(index = self.index, "Active game torn down by restart");
        }
        self.index = INTRO_INDEX;
        self.phase = NavPhase::Intro;
        self.celebration.reset();
        vec![NavEvent::Restarted]
    }

    /// Advance timers and the active game by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Vec<NavEvent> {
        self.cooldown = (self.cooldown - dt.max(0.0)).max(0.0);
        let Some(game) = self.active.as_mut() else {
            return Vec::new();
        };
        let events = game.update(dt);
        self.absorb(events)
    }

    /// Route one shell input by the current phase.
    pub fn handle(&mut self, input: &ViewerInput) -> Vec<NavEvent> {
        if self.phase != NavPhase::Gating {
            return match input {
                ViewerInput::Key(code) if is_advance_key(code) => self.advance(),
                ViewerInput::Pointer => self.advance(),
                other => {
                    tracing::debug!(input = ?other, phase = ?self.phase, "Dropped viewer input");
                    Vec::new()
                },
            };
        }

        let Some(game) = self.active.as_mut() else {
            return Vec::new();
        };
        let routed = match input {
            ViewerInput::Key(code) => game.key_binding(code),
            ViewerInput::Pointer => Some(GameInput::Activate),
            ViewerInput::Cell(i) => Some(GameInput::Select(*i)),
            ViewerInput::Pad(dir) => Some(GameInput::Steer(*dir)),
            ViewerInput::Text(text) if game.accepts_text() => Some(GameInput::Guess(text.clone())),
            ViewerInput::Text(_) => None,
            ViewerInput::Skip => Some(GameInput::Skip),
            ViewerInput::Retry => Some(GameInput::Restart),
        };
        match routed {
            Some(game_input) => {
                let events = game.apply_input(&game_input);
                self.absorb(events)
            },
            None => {
                tracing::debug!(
                    input = ?input,
                    kind = %game.kind(),
                    "Input not bound by active game"
                );
                Vec::new()
            },
        }
    }

    fn enter_card(&mut self, index: usize) -> Vec<NavEvent> {
        if index >= self.deck.len() {
            return self.finish();
        }
        self.index = index as isize;

        let Some(kind) = self.assignment.gate(index).game() else {
            return self.reveal(index);
        };
        let Some(mut game) = self.registry.create(kind) else {
            tracing::warn!(%kind, index, "Game not available in this build, auto-revealing card");
            return self.reveal(index);
        };

        let seed = if self.config.reproducible_difficulty {
            card_seed(&self.deck.id, index)
        } else {
            rand::random()
        };
        game.init(&GameSetup {
            color: self.deck.color.accent().to_string(),
            card_text: self.deck.card(index).unwrap_or_default().to_string(),
            seed,
        });
        tracing::debug!(index, %kind, seed, "Card gated");
        self.active = Some(game);
        self.phase = NavPhase::Gating;
        vec![NavEvent::CardGated { index, kind }]
    }

    fn reveal(&mut self, index: usize) -> Vec<NavEvent> {
        self.active = None;
        self.phase = NavPhase::Revealed;
        vec![NavEvent::CardRevealed { index }]
    }

    fn finish(&mut self) -> Vec<NavEvent> {
        self.active = None;
        self.index = self.deck.len() as isize;
        self.phase = NavPhase::Finished;
        if self.celebration.trigger(self.config.confetti_count) {
            tracing::info!(deck = %self.deck.id, cards = self.deck.len(), "Deck finished");
        }
        vec![NavEvent::DeckFinished]
    }

    /// Wrap game events and reveal the card once the game completes.
    fn absorb(&mut self, events: Vec<GameEvent>) -> Vec<NavEvent> {
        let index = self.index.max(0) as usize;
        let completed = events.contains(&GameEvent::Completed);
        let mut out: Vec<NavEvent> = events
            .into_iter()
            .map(|event| NavEvent::Game { index, event })
            .collect();
        if completed {
            out.extend(self.reveal(index));
        }
        out
    }

    /// -1 at the intro, the deck length once finished.
    pub fn index(&self) -> isize {
        self.index
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn active_game(&self) -> Option<&dyn GatingGame> {
        self.active.as_deref()
    }

    /// How often per second the shell should call [`Self::tick`]: the
    /// active game's rate, or [`IDLE_TICK_RATE`].
    pub fn tick_rate(&self) -> f32 {
        self.active.as_ref().map_or(IDLE_TICK_RATE, |game| game.tick_rate())
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    /// Text of the current card, only once it is revealed.
    pub fn current_card(&self) -> Option<&str> {
        if self.phase != NavPhase::Revealed {
            return None;
        }
        self.deck.card(self.index as usize)
    }

    /// Progress bar fill in percent.
    pub fn progress_percent(&self) -> f32 {
        let n = self.deck.len();
        if self.phase == NavPhase::Intro {
            return 0.0;
        }
        if n == 0 {
            return 100.0;
        }
        ((self.index + 1) as f32 / n as f32 * 100.0).min(100.0)
    }

    /// `[k/n]` counter.
    pub fn progress_label(&self) -> String {
        let n = self.deck.len();
        let k = if self.phase == NavPhase::Intro {
            0
        } else {
            ((self.index + 1) as usize).min(n)
        };
        format!("[{k}/{n}]")
    }

    /// `NODE_01`-style label of the current card.
    pub fn node_label(&self) -> Option<String> {
        match self.phase {
            NavPhase::Gating | NavPhase::Revealed => Some(format!("NODE_{:02}", self.index + 1)),
            NavPhase::Intro | NavPhase::Finished => None,
        }
    }
}
