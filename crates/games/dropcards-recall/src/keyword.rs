use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tokens with at least this many letters are keyword candidates.
pub const MIN_KEYWORD_LETTERS: usize = 4;
/// Shortest token the fallback path will accept before giving up.
const FALLBACK_MIN_LETTERS: usize = 2;

/// The hidden token of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Letters only, lowercase. May be empty for text with no letters.
    pub word: String,
    /// Position among the whitespace-separated tokens.
    pub index: usize,
}

/// Strip everything but ASCII letters and lowercase the rest.
pub fn letters_only(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalize a typed guess for comparison.
pub fn normalize_guess(guess: &str) -> String {
    letters_only(guess.trim())
}

/// Choose the keyword of `text`.
///
/// Candidates are tokens with at least [`MIN_KEYWORD_LETTERS`] letters; one
/// is drawn from the longer half of them. Without candidates the longest
/// token with two or more letters is used, and failing that the first token.
pub fn pick_keyword(text: &str, rng: &mut impl Rng) -> Keyword {
    let tokens: Vec<(usize, String)> = text
        .split_whitespace()
        .map(letters_only)
        .enumerate()
        .collect();

    let mut candidates: Vec<&(usize, String)> = tokens
        .iter()
        .filter(|(_, w)| w.len() >= MIN_KEYWORD_LETTERS)
        .collect();

    if candidates.is_empty() {
        let fallback = tokens
            .iter()
            .filter(|(_, w)| w.len() >= FALLBACK_MIN_LETTERS)
            .max_by(|a, b| a.1.len().cmp(&b.1.len()).then(b.0.cmp(&a.0)));
        return match fallback.or(tokens.first()) {
            Some((index, word)) => Keyword {
                word: word.clone(),
                index: *index,
            },
            None => Keyword {
                word: String::new(),
                index: 0,
            },
        };
    }

    // Stable sort keeps text order among equal lengths.
    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    let top = candidates.len().div_ceil(2).max(1);
    let (index, word) = candidates[rng.random_range(0..top)];
    Keyword {
        word: word.clone(),
        index: *index,
    }
}

/// Card text with the keyword token replaced by one underscore per letter.
pub fn masked_text(text: &str, keyword: &Keyword) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            if i == keyword.index {
                "_".repeat(letters_only(token).len())
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hint text for `level` (1-based): letter count, first letter, first and
/// last letters, then the whole word.
pub fn hint(word: &str, level: u8) -> Option<String> {
    if level == 0 {
        return None;
    }
    let upper = word.to_ascii_uppercase();
    let first = upper.chars().next();
    let hint = match (level, first) {
        (1, _) => format!("{} letters", word.len()),
        (2, Some(f)) => format!("Starts with \"{f}\""),
        (3, Some(f)) if upper.len() >= 2 => {
            let last = upper.chars().last().unwrap_or(f);
            format!("{f}{}{last}", "_".repeat(upper.len() - 2))
        },
        _ => upper,
    };
    Some(hint)
}
