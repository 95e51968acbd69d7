use tracing_subscriber::EnvFilter;

use dropcards_core::assignment::assign;
use dropcards_core::game_kind::CardGate;
use dropcards_viewer::config::ViewerConfig;
use dropcards_viewer::decks::{BuiltinCatalog, DeckCatalog};

const USAGE: &str = "usage: dropcards --deck=<id> [--cards=<n>]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut deck_id = None;
    let mut cards = None;
    for arg in std::env::args().skip(1) {
        if let Some(id) = arg.strip_prefix("--deck=") {
            deck_id = Some(id.to_string());
        } else if let Some(n) = arg.strip_prefix("--cards=") {
            match n.parse::<usize>() {
                Ok(n) => cards = Some(n),
                Err(e) => {
                    eprintln!("invalid --cards value {n:?}: {e}\n{USAGE}");
                    std::process::exit(2);
                },
            }
        } else {
            eprintln!("unknown argument {arg:?}\n{USAGE}");
            std::process::exit(2);
        }
    }
    let Some(deck_id) = deck_id else {
        eprintln!("{USAGE}");
        let catalog = BuiltinCatalog::load();
        for deck in catalog.decks() {
            eprintln!("  {} {} ({} cards)", deck.glyph(), deck.id, deck.len());
        }
        std::process::exit(2);
    };

    let catalog = BuiltinCatalog::load();
    let (title, mut plan) = match (catalog.deck_by_id(&deck_id), cards) {
        (Some(deck), None) => (deck.title.clone(), deck.assignment()),
        (_, Some(n)) => (format!("{deck_id} (synthetic)"), assign(n, &deck_id)),
        (None, None) => {
            eprintln!("no built-in deck {deck_id:?}; pass --cards=<n> for a synthetic plan");
            std::process::exit(1);
        },
    };
    if let Some(kind) = ViewerConfig::load().forced_kind() {
        plan = plan.force_kind(kind);
    }

    tracing::info!(deck = %deck_id, cards = plan.len(), "Printing gate plan");
    println!("{title}");
    for (i, gate) in plan.gates().iter().enumerate() {
        let label = match gate {
            CardGate::AutoReveal => "auto_reveal".to_string(),
            CardGate::Game(kind) => kind.to_string(),
        };
        println!("NODE_{:02} {label}", i + 1);
    }
}
