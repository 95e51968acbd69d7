use serde::{Deserialize, Serialize};

use dropcards_core::game_kind::GameKind;

/// Viewer configuration, loaded from `config/viewer.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Advances are ignored for this long after an accepted one (seconds).
    pub advance_cooldown_secs: f32,
    /// Confetti pieces spawned when the deck is finished.
    pub confetti_count: usize,
    /// Seed each card's game from the deck and card index. When false every
    /// gating attempt draws a fresh seed.
    pub reproducible_difficulty: bool,
    /// Play this game on every gated card instead of the assigned one.
    pub forced_game: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            advance_cooldown_secs: 0.5,
            confetti_count: 50,
            reproducible_difficulty: true,
            forced_game: None,
        }
    }
}

impl ViewerConfig {
    pub fn load() -> Self {
        dropcards_core::config::load_or_default("DROPCARDS_VIEWER_CONFIG", "config/viewer.toml")
    }

    /// The forced game kind, if one is configured and recognized.
    pub fn forced_kind(&self) -> Option<GameKind> {
        let name = self.forced_game.as_deref()?;
        let kind = GameKind::from_name(name);
        if kind.is_none() {
            tracing::warn!(name, "Unknown forced_game, using the deck assignment");
        }
        kind
    }
}
