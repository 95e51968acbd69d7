//! Deterministic per-card gate assignment.
//!
//! The plan for a deck depends only on the deck identifier and its card
//! count, so the same deck always presents the same games in the same order.

use serde::{Deserialize, Serialize};

use crate::game_kind::{CardGate, GameKind};

/// Probability that a card is gated by a game at all.
pub const GATE_CHANCE: f64 = 0.7;
/// Stride applied to the card index for the gate/no-gate draw.
const GATE_STRIDE: u64 = 7;
/// Stride and offset applied to the card index for the game-kind draw.
const KIND_STRIDE: u64 = 13;
const KIND_OFFSET: u64 = 3;

/// Ordered per-card gates for one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    gates: Vec<CardGate>,
}

impl Assignment {
    /// Build an assignment from explicit gates.
    pub fn from_gates(gates: Vec<CardGate>) -> Self {
        Self { gates }
    }

    /// Gate for a card. Indices past the end auto-reveal.
    pub fn gate(&self, index: usize) -> CardGate {
        self.gates
            .get(index)
            .copied()
            .unwrap_or(CardGate::AutoReveal)
    }

    pub fn gates(&self) -> &[CardGate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Replace every gated card's game with `kind`, keeping auto-reveal cards.
    pub fn force_kind(&self, kind: GameKind) -> Self {
        let gates = self
            .gates
            .iter()
            .map(|g| match g {
                CardGate::AutoReveal => CardGate::AutoReveal,
                CardGate::Game(_) => CardGate::Game(kind),
            })
            .collect();
        Self { gates }
    }
}

/// Seed derived from a deck identifier: the sum of its UTF-16 code units.
pub fn deck_seed(deck_id: &str) -> u64 {
    deck_id.encode_utf16().map(u64::from).sum()
}

/// Sine-hash pseudo random value in `[0, 1)`.
pub fn seeded_unit(s: f64) -> f64 {
    let x = s.sin() * 10000.0;
    x - x.floor()
}

/// Compute the gate for every card of a deck.
pub fn assign(card_count: usize, deck_id: &str) -> Assignment {
    let seed = deck_seed(deck_id);
    let gates = (0..card_count as u64)
        .map(|i| {
            let gated = seeded_unit((seed + i * GATE_STRIDE) as f64);
            if gated < GATE_CHANCE {
                let pick = seeded_unit((seed + i * KIND_STRIDE + KIND_OFFSET) as f64);
                CardGate::from_index((pick * GameKind::ALL.len() as f64).floor() as usize)
            } else {
                CardGate::AutoReveal
            }
        })
        .collect();
    Assignment { gates }
}

/// Gameplay seed for one card of a deck (splitmix64 over deck seed and index).
pub fn card_seed(deck_id: &str, card_index: usize) -> u64 {
    let mut z = deck_seed(deck_id)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(card_index as u64 + 1);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
