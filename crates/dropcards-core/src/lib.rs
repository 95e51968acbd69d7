pub mod assignment;
pub mod config;
pub mod deck;
pub mod game_kind;
pub mod game_trait;
pub mod particles;
pub mod timing;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, GameInput, GameSetup, GatingGame};

    pub const TEST_COLOR: &str = "hsl(187, 100%, 50%)";

    /// Setup with a fixed seed and a short card text.
    pub fn make_setup(seed: u64) -> GameSetup {
        make_setup_with_text("High performers read daily.", seed)
    }

    pub fn make_setup_with_text(card_text: &str, seed: u64) -> GameSetup {
        GameSetup {
            color: TEST_COLOR.to_string(),
            card_text: card_text.to_string(),
            seed,
        }
    }

    /// Run N game ticks, returning all accumulated events.
    pub fn run_game_ticks(game: &mut dyn GatingGame, n: usize, dt: f32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Number of `Completed` events in a batch.
    pub fn count_completions(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Completed))
            .count()
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every GatingGame implementation calls these from its own
    // #[cfg(test)] module with a concrete game and a valid input.

    /// After init(), serialize_state() must return non-empty bytes and the
    /// game must not be complete.
    pub fn contract_init_creates_state(game: &mut dyn GatingGame) {
        game.init(&make_setup(7));
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
        assert!(!game.is_complete(), "a fresh game must not be complete");
    }

    /// apply_input() with a valid action followed by update() must change state.
    pub fn contract_apply_input_changes_state(game: &mut dyn GatingGame, valid_input: &GameInput) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        game.update(0.05);
        let after = game.serialize_state();
        assert_ne!(
            before, after,
            "State must change after apply_input + update"
        );
    }

    /// update() with dt>0 must advance a time-driven game.
    pub fn contract_update_advances_time(game: &mut dyn GatingGame) {
        let before = game.serialize_state();
        game.update(1.0);
        let after = game.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance game state");
    }

    /// Drive a game to its win with `win`, then keep ticking and poking it:
    /// exactly one `Completed` event may ever be observed.
    pub fn contract_completes_exactly_once(
        game: &mut dyn GatingGame,
        win: impl FnOnce(&mut dyn GatingGame) -> Vec<GameEvent>,
    ) {
        let mut events = win(&mut *game);
        events.extend(run_game_ticks(game, 600, 1.0 / 60.0));
        assert_eq!(
            count_completions(&events),
            1,
            "exactly one Completed event after winning"
        );
        assert!(game.is_complete());

        let mut late = Vec::new();
        for input in [
            GameInput::Activate,
            GameInput::Select(0),
            GameInput::Guess("x".to_string()),
            GameInput::Skip,
            GameInput::Restart,
        ] {
            late.extend(game.apply_input(&input));
        }
        late.extend(run_game_ticks(game, 120, 1.0 / 60.0));
        assert_eq!(
            count_completions(&late),
            0,
            "no Completed events after the game is terminal"
        );
    }

    /// Once complete, update() must neither change state nor emit events.
    pub fn contract_update_after_complete_is_noop(game: &mut dyn GatingGame) {
        assert!(game.is_complete(), "precondition: game must be complete");
        let before = game.serialize_state();
        let events = game.update(0.5);
        assert!(events.is_empty(), "No events after completion");
        assert_eq!(before, game.serialize_state());
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn GatingGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// A snapshot that decodes but breaks the state's invariants must be
    /// ignored, and the game must keep running on its own state.
    pub fn contract_apply_state_inconsistent_ignored(game: &mut dyn GatingGame, broken: &[u8]) {
        let before = game.serialize_state();
        game.apply_state(broken);
        assert_eq!(before, game.serialize_state(), "inconsistent snapshot was adopted");
        for input in [
            GameInput::Activate,
            GameInput::Steer(crate::game_trait::Direction::Left),
            GameInput::Steer(crate::game_trait::Direction::Up),
            GameInput::Select(0),
            GameInput::Guess("word".to_string()),
        ] {
            game.apply_input(&input);
            game.update(1.0 / 60.0);
        }
    }

    /// Garbage or truncated state must be ignored.
    pub fn contract_apply_state_garbage_ignored(game: &mut dyn GatingGame) {
        let before = game.serialize_state();
        game.apply_state(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        game.apply_state(&before[..before.len() / 2]);
        assert_eq!(before, game.serialize_state());
    }
}
