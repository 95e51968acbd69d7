use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, assign};

/// Fixed set of deck accent colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckColor {
    #[default]
    Cyan,
    Purple,
    Green,
    Orange,
    Pink,
}

impl DeckColor {
    pub const ALL: [DeckColor; 5] = [
        DeckColor::Cyan,
        DeckColor::Purple,
        DeckColor::Green,
        DeckColor::Orange,
        DeckColor::Pink,
    ];

    /// Parse a color tag. Unknown tags fall back to cyan.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "purple" => DeckColor::Purple,
            "green" => DeckColor::Green,
            "orange" => DeckColor::Orange,
            "pink" => DeckColor::Pink,
            _ => DeckColor::Cyan,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            DeckColor::Cyan => "cyan",
            DeckColor::Purple => "purple",
            DeckColor::Green => "green",
            DeckColor::Orange => "orange",
            DeckColor::Pink => "pink",
        }
    }

    /// CSS accent color handed to the mini-games as their theme color.
    pub fn accent(self) -> &'static str {
        match self {
            DeckColor::Cyan => "hsl(187, 100%, 50%)",
            DeckColor::Purple => "hsl(270, 80%, 65%)",
            DeckColor::Green => "hsl(150, 60%, 50%)",
            DeckColor::Orange => "hsl(30, 90%, 55%)",
            DeckColor::Pink => "hsl(340, 75%, 55%)",
        }
    }
}

/// Glyph for a deck icon tag. Unknown tags get a light bulb.
pub fn icon_glyph(tag: &str) -> &'static str {
    match tag {
        "fire" => "\u{1F525}",
        "brain" => "\u{1F9E0}",
        "money" => "\u{1F4B0}",
        "rocket" => "\u{1F680}",
        "lightning" => "\u{26A1}",
        "star" => "\u{2B50}",
        "muscle" => "\u{1F4AA}",
        "book" => "\u{1F4DA}",
        "trophy" => "\u{1F3C6}",
        "gem" => "\u{1F48E}",
        _ => "\u{1F4A1}",
    }
}

/// A deck of cards plus display metadata. Read-only to the gating engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Stable identifier; also the assignment seed.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Icon tag, see [`icon_glyph`].
    #[serde(rename = "emoji")]
    pub icon: String,
    pub color: DeckColor,
    pub cards: Vec<String>,
    /// ISO date (`YYYY-MM-DD`).
    pub created_at: String,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&str> {
        self.cards.get(index).map(String::as_str)
    }

    /// The deterministic gate plan for this deck.
    pub fn assignment(&self) -> Assignment {
        assign(self.cards.len(), &self.id)
    }

    pub fn glyph(&self) -> &'static str {
        icon_glyph(&self.icon)
    }
}
