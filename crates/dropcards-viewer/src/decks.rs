//! Deck sources the viewer consumes: the built-in catalog, the
//! session-scoped custom deck, and the authoring draft that produces it.

use chrono::NaiveDate;

use dropcards_core::deck::{Deck, DeckColor};

const BUILTIN_DECKS: &str = include_str!("../assets/decks.json");

pub const DEFAULT_DESCRIPTION: &str = "Tap through to discover.";
pub const DEFAULT_ICON: &str = "lightning";
pub const MIN_CARDS: usize = 2;

/// Read-only deck lookup.
pub trait DeckCatalog {
    fn decks(&self) -> &[Deck];

    fn deck_by_id(&self, id: &str) -> Option<Deck> {
        self.decks().iter().find(|d| d.id == id).cloned()
    }
}

/// The decks shipped with the app.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    decks: Vec<Deck>,
}

impl BuiltinCatalog {
    pub fn load() -> Self {
        let decks = match serde_json::from_str::<Vec<Deck>>(BUILTIN_DECKS) {
            Ok(decks) => decks,
            Err(e) => {
                tracing::warn!(error = %e, "Built-in deck catalog is malformed");
                Vec::new()
            },
        };
        Self { decks }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::load()
    }
}

impl DeckCatalog for BuiltinCatalog {
    fn decks(&self) -> &[Deck] {
        &self.decks
    }
}

/// Holds at most one user-authored deck for the current session.
pub trait SessionDeckStore {
    fn save(&mut self, deck: &Deck);
    fn load(&self) -> Option<Deck>;
    fn clear(&mut self);
}

/// Session store keeping the deck JSON-encoded, like browser session
/// storage would.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    raw: Option<String>,
}

impl MemorySessionStore {
    /// Store pre-encoded data as-is.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl SessionDeckStore for MemorySessionStore {
    fn save(&mut self, deck: &Deck) {
        match serde_json::to_string(deck) {
            Ok(json) => self.raw = Some(json),
            Err(e) => tracing::warn!(error = %e, deck = %deck.id, "Failed to encode custom deck"),
        }
    }

    fn load(&self) -> Option<Deck> {
        let raw = self.raw.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(deck) => Some(deck),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparseable session deck");
                None
            },
        }
    }

    fn clear(&mut self) {
        self.raw = None;
    }
}

/// Why a deck draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    MissingTitle,
    MissingCards,
    TooFewCards(usize),
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Title is required"),
            Self::MissingCards => write!(f, "Cards are required"),
            Self::TooFewCards(n) => write!(f, "Add at least {MIN_CARDS} cards (got {n})"),
        }
    }
}

impl std::error::Error for DeckError {}

/// Raw form fields of the deck creator.
#[derive(Debug, Clone, Default)]
pub struct DeckDraft {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    /// One card per line.
    pub cards_raw: String,
}

impl DeckDraft {
    pub fn build(&self, today: NaiveDate) -> Result<Deck, DeckError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DeckError::MissingTitle);
        }
        let cards_raw = self.cards_raw.trim();
        if cards_raw.is_empty() {
            return Err(DeckError::MissingCards);
        }
        let cards: Vec<String> = cards_raw
            .lines()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if cards.len() < MIN_CARDS {
            return Err(DeckError::TooFewCards(cards.len()));
        }

        let description = match self.description.trim() {
            "" => DEFAULT_DESCRIPTION,
            d => d,
        };
        let icon = match self.icon.trim() {
            "" => DEFAULT_ICON,
            i => i,
        };

        Ok(Deck {
            id: slug(title),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: DeckColor::from_tag(&self.color),
            cards,
            created_at: today.format("%Y-%m-%d").to_string(),
        })
    }

    /// Build with the current UTC date.
    pub fn build_today(&self) -> Result<Deck, DeckError> {
        self.build(chrono::Utc::now().date_naive())
    }
}

/// Lowercase, runs of anything but `[a-z0-9]` collapsed to `-`, no
/// leading or trailing `-`.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}
