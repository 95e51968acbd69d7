//! End-to-end deck traversal with real games behind the navigator.

use dropcards_core::assignment::Assignment;
#[cfg(feature = "projectile")]
use dropcards_core::deck::{Deck, DeckColor};
use dropcards_core::game_kind::{CardGate, GameKind};
#[cfg(feature = "projectile")]
use dropcards_core::game_trait::GameEvent;
#[cfg(feature = "projectile")]
use dropcards_projectile::ProjectileGame;
#[cfg(feature = "projectile")]
use dropcards_projectile::config::ProjectileConfig;
use dropcards_viewer::config::ViewerConfig;
use dropcards_viewer::decks::{
    BuiltinCatalog, DeckCatalog, DeckDraft, MemorySessionStore, SessionDeckStore,
};
#[cfg(feature = "projectile")]
use dropcards_viewer::input::InputState;
use dropcards_viewer::input::ViewerInput;
use dropcards_viewer::navigator::{DeckNavigator, NavEvent, NavPhase};
use dropcards_viewer::registry::{GameRegistry, create_registry};

const FRAME: f32 = 1.0 / 60.0;

#[cfg(feature = "projectile")]
fn two_card_deck() -> Deck {
    Deck {
        id: "scenario".to_string(),
        title: "Scenario".to_string(),
        description: String::new(),
        icon: "rocket".to_string(),
        color: DeckColor::Cyan,
        cards: vec![
            "First card is open.".to_string(),
            "Second card hides behind a target.".to_string(),
        ],
        created_at: "2026-02-10".to_string(),
    }
}

#[cfg(feature = "projectile")]
fn three_hit_registry() -> GameRegistry {
    let mut registry = GameRegistry::default();
    registry.register(GameKind::ProjectileDestroy, || {
        Box::new(ProjectileGame::with_config(ProjectileConfig {
            min_hits: 3,
            max_hits: 3,
            ..Default::default()
        }))
    });
    registry
}

#[cfg(feature = "projectile")]
fn scenario_nav() -> DeckNavigator {
    let plan = Assignment::from_gates(vec![
        CardGate::AutoReveal,
        CardGate::Game(GameKind::ProjectileDestroy),
    ]);
    DeckNavigator::with_assignment(
        two_card_deck(),
        plan,
        three_hit_registry(),
        ViewerConfig::default(),
    )
}

fn tick_for(nav: &mut DeckNavigator, secs: f32) -> Vec<NavEvent> {
    let mut events = Vec::new();
    for _ in 0..=(secs / FRAME).ceil() as usize {
        events.extend(nav.tick(FRAME));
    }
    events
}

#[cfg(feature = "projectile")]
fn hits(events: &[NavEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, NavEvent::Game { event: GameEvent::Hit { .. }, .. }))
        .count()
}

#[cfg(feature = "projectile")]
#[test]
fn open_card_then_three_hit_gate_then_finish() {
    let mut nav = scenario_nav();
    let mut input = InputState::new();

    input.on_key_down("Space".into());
    let mut events = Vec::new();
    for action in input.drain() {
        events.extend(nav.handle(&action));
    }
    input.on_key_up("Space");
    assert_eq!(events, vec![NavEvent::CardRevealed { index: 0 }]);
    assert_eq!(nav.current_card(), Some("First card is open."));

    tick_for(&mut nav, 0.5);
    let events = nav.handle(&ViewerInput::Key("ArrowRight".into()));
    assert_eq!(
        events,
        vec![NavEvent::CardGated {
            index: 1,
            kind: GameKind::ProjectileDestroy
        }]
    );
    assert!(nav.current_card().is_none());

    let mut game_events = Vec::new();
    for shot in 1..=3 {
        game_events.extend(nav.handle(&ViewerInput::Pointer));
        game_events.extend(tick_for(&mut nav, 0.5));
        assert_eq!(hits(&game_events), shot);
        if shot < 3 {
            assert_eq!(nav.phase(), NavPhase::Gating, "shot {shot} must not reveal");
        }
    }
    game_events.extend(tick_for(&mut nav, 2.0));
    let reveals: Vec<_> = game_events
        .iter()
        .filter(|e| matches!(e, NavEvent::CardRevealed { .. }))
        .collect();
    assert_eq!(reveals, vec![&NavEvent::CardRevealed { index: 1 }]);
    assert_eq!(nav.current_card(), Some("Second card hides behind a target."));

    tick_for(&mut nav, 0.5);
    let events = nav.handle(&ViewerInput::Key("Enter".into()));
    assert_eq!(events, vec![NavEvent::DeckFinished]);
    assert_eq!(nav.phase(), NavPhase::Finished);
    assert_eq!(nav.index(), 2);
    assert_eq!(nav.celebration().pieces().len(), 50);

    let later = tick_for(&mut nav, 1.0);
    assert!(later.is_empty());
    assert!(nav.celebration().has_fired());
}

#[cfg(feature = "projectile")]
#[test]
fn advance_during_gate_is_noop() {
    let mut nav = scenario_nav();
    nav.start();
    tick_for(&mut nav, 0.5);
    nav.advance();
    assert_eq!(nav.phase(), NavPhase::Gating);

    for _ in 0..5 {
        tick_for(&mut nav, 0.6);
        assert!(nav.advance().is_empty());
        assert!(nav.handle(&ViewerInput::Key("ArrowRight".into())).is_empty());
    }
    assert_eq!(nav.index(), 1);
    assert_eq!(nav.phase(), NavPhase::Gating);
}

#[cfg(feature = "projectile")]
#[test]
fn revealed_accepts_advance_once() {
    let mut nav = scenario_nav();
    nav.start();
    assert!(nav.advance().is_empty());
    assert_eq!(nav.index(), 0);
    tick_for(&mut nav, 0.5);
    assert_eq!(nav.advance().len(), 1);
    assert_eq!(nav.index(), 1);
}

#[test]
fn builtin_deck_plays_through_with_every_game() {
    let catalog = BuiltinCatalog::load();
    let deck = catalog.deck_by_id("high-performers").unwrap();
    let mut nav = DeckNavigator::new(deck, create_registry(), ViewerConfig::default());
    assert_eq!(nav.assignment().len(), 10);

    nav.start();
    let mut finished = 0;
    for _ in 0..10 {
        if nav.phase() == NavPhase::Gating {
            let kind = nav.active_game().map(|g| g.kind());
            let mut guard = 0;
            while nav.phase() == NavPhase::Gating && guard < 600 {
                // Grind every game toward its forced or skip path.
                for action in [
                    ViewerInput::Pointer,
                    ViewerInput::Text("nope".into()),
                    ViewerInput::Skip,
                    ViewerInput::Cell(guard % 20),
                ] {
                    nav.handle(&action);
                }
                tick_for(&mut nav, 0.1);
                guard += 1;
            }
            if nav.phase() == NavPhase::Gating {
                // Grid and runner games need real play; leave them to their own tests.
                assert!(
                    matches!(kind, Some(GameKind::MazeCollector | GameKind::TimedRunner)),
                    "{kind:?} did not clear"
                );
                return;
            }
        }
        tick_for(&mut nav, 0.5);
        finished += nav
            .advance()
            .iter()
            .filter(|e| **e == NavEvent::DeckFinished)
            .count();
    }
    assert_eq!(finished, 1);
}

#[test]
fn session_deck_drives_navigator() {
    let draft = DeckDraft {
        title: "Tiny Deck".into(),
        cards_raw: "one\ntwo".into(),
        ..Default::default()
    };
    let deck = draft.build_today().unwrap();
    let mut store = MemorySessionStore::default();
    store.save(&deck);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.id, "tiny-deck");
    let plan = Assignment::from_gates(vec![CardGate::AutoReveal; 2]);
    let mut nav = DeckNavigator::with_assignment(
        loaded,
        plan,
        GameRegistry::default(),
        ViewerConfig {
            advance_cooldown_secs: 0.0,
            ..Default::default()
        },
    );
    nav.start();
    nav.advance();
    assert_eq!(nav.advance(), vec![NavEvent::DeckFinished]);
}
