use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_trait::GameMetadata;

/// The six gating mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    ProjectileDestroy,
    HiddenObjectSearch,
    MazeCollector,
    TimedRunner,
    FractureBreak,
    WordRecall,
}

impl GameKind {
    /// All kinds, in assignment index order.
    pub const ALL: [GameKind; 6] = [
        GameKind::ProjectileDestroy,
        GameKind::HiddenObjectSearch,
        GameKind::MazeCollector,
        GameKind::TimedRunner,
        GameKind::FractureBreak,
        GameKind::WordRecall,
    ];

    /// Look up a kind by its assignment index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable snake_case name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            GameKind::ProjectileDestroy => "projectile_destroy",
            GameKind::HiddenObjectSearch => "hidden_object_search",
            GameKind::MazeCollector => "maze_collector",
            GameKind::TimedRunner => "timed_runner",
            GameKind::FractureBreak => "fracture_break",
            GameKind::WordRecall => "word_recall",
        }
    }

    /// Parse a config name (case-insensitive, `-` and `_` interchangeable).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.name() == normalized)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What stands between the user and one card's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardGate {
    /// No game; the card is revealed as soon as it is reached.
    AutoReveal,
    Game(GameKind),
}

impl CardGate {
    /// Gate for a raw kind index. Indices that name no game degrade to
    /// auto-reveal so progress is never blocked.
    pub fn from_index(index: usize) -> Self {
        match GameKind::from_index(index) {
            Some(kind) => CardGate::Game(kind),
            None => {
                tracing::warn!(index, "Unknown game kind index, auto-revealing card");
                CardGate::AutoReveal
            },
        }
    }

    /// Gate for a config name. Unknown names degrade to auto-reveal.
    pub fn from_name(name: &str) -> Self {
        match GameKind::from_name(name) {
            Some(kind) => CardGate::Game(kind),
            None => {
                tracing::warn!(name, "Unknown game kind name, auto-revealing card");
                CardGate::AutoReveal
            },
        }
    }

    pub fn game(self) -> Option<GameKind> {
        match self {
            CardGate::AutoReveal => None,
            CardGate::Game(kind) => Some(kind),
        }
    }
}

/// A registered game entry in the game catalog.
#[derive(Debug, Clone)]
pub struct GameEntry {
    pub kind: GameKind,
    pub metadata: GameMetadata,
}
