use std::collections::HashMap;

use serde::de::DeserializeOwned;

use dropcards_core::game_kind::{GameEntry, GameKind};
use dropcards_core::game_trait::GatingGame;

/// Factory function type: creates a new game instance.
type GameFactory = Box<dyn Fn() -> Box<dyn GatingGame> + Send + Sync>;

/// Registry mapping game kinds to factories.
#[derive(Default)]
pub struct GameRegistry {
    factories: HashMap<GameKind, GameFactory>,
}

impl GameRegistry {
    pub fn register<F>(&mut self, kind: GameKind, factory: F)
    where
        F: Fn() -> Box<dyn GatingGame> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    pub fn create(&self, kind: GameKind) -> Option<Box<dyn GatingGame>> {
        self.factories.get(&kind).map(|f| f())
    }

    pub fn contains(&self, kind: GameKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Catalog entries for every registered game, in assignment index order.
    pub fn entries(&self) -> Vec<GameEntry> {
        GameKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.create(kind).map(|game| GameEntry {
                    kind,
                    metadata: game.metadata(),
                })
            })
            .collect()
    }
}

/// Create a registry with every game compiled into this build, each game
/// reading its own config file.
pub fn create_registry() -> GameRegistry {
    let mut registry = GameRegistry::default();
    #[cfg(feature = "projectile")]
    registry.register(GameKind::ProjectileDestroy, || {
        Box::new(dropcards_projectile::ProjectileGame::new())
    });
    #[cfg(feature = "search")]
    registry.register(GameKind::HiddenObjectSearch, || {
        Box::new(dropcards_search::SearchGame::new())
    });
    #[cfg(feature = "maze")]
    registry.register(GameKind::MazeCollector, || {
        Box::new(dropcards_maze::MazeGame::new())
    });
    #[cfg(feature = "runner")]
    registry.register(GameKind::TimedRunner, || {
        Box::new(dropcards_runner::RunnerGame::new())
    });
    #[cfg(feature = "fracture")]
    registry.register(GameKind::FractureBreak, || {
        Box::new(dropcards_fracture::FractureGame::new())
    });
    #[cfg(feature = "recall")]
    registry.register(GameKind::WordRecall, || {
        Box::new(dropcards_recall::RecallGame::new())
    });
    registry
}

/// Decode the render snapshot of a running game.
pub fn read_game_state<S: DeserializeOwned>(game: &dyn GatingGame) -> Option<S> {
    rmp_serde::from_slice(&game.serialize_state()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "projectile")]
    #[test]
    fn register_and_create() {
        let mut registry = GameRegistry::default();
        assert!(registry.create(GameKind::ProjectileDestroy).is_none());

        registry.register(GameKind::ProjectileDestroy, || {
            Box::new(dropcards_projectile::ProjectileGame::default())
        });
        let game = registry.create(GameKind::ProjectileDestroy);
        assert!(game.is_some_and(|g| g.kind() == GameKind::ProjectileDestroy));
        assert!(registry.create(GameKind::MazeCollector).is_none());
    }

    #[cfg(feature = "fracture")]
    #[test]
    fn factories_produce_fresh_instances() {
        let mut registry = GameRegistry::default();
        registry.register(GameKind::FractureBreak, || {
            Box::new(dropcards_fracture::FractureGame::default())
        });
        let setup = dropcards_core::test_helpers::make_setup(1);
        let mut first = registry.create(GameKind::FractureBreak).unwrap();
        first.init(&setup);
        first.apply_input(&dropcards_core::game_trait::GameInput::Activate);
        let mut second = registry.create(GameKind::FractureBreak).unwrap();
        second.init(&setup);
        assert_ne!(first.serialize_state(), second.serialize_state());
    }

    #[cfg(all(
        feature = "projectile",
        feature = "search",
        feature = "maze",
        feature = "runner",
        feature = "fracture",
        feature = "recall"
    ))]
    #[test]
    fn full_registry_covers_every_kind() {
        let registry = create_registry();
        for kind in GameKind::ALL {
            assert!(registry.contains(kind), "{kind} missing");
        }
        let entries = registry.entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[5].kind, GameKind::WordRecall);
        assert!(!entries[0].metadata.banner.is_empty());
    }

    #[test]
    fn registry_without_factories_is_empty() {
        let registry = GameRegistry::default();
        assert!(registry.entries().is_empty());
        assert!(GameKind::ALL.into_iter().all(|kind| registry.create(kind).is_none()));
    }

    #[cfg(feature = "recall")]
    #[test]
    fn snapshot_decodes() {
        let mut game = dropcards_recall::RecallGame::default();
        game.init(&dropcards_core::test_helpers::make_setup(2));
        let state: Option<dropcards_recall::RecallState> = read_game_state(&game);
        assert!(state.is_some_and(|s| s.card_text == "High performers read daily."));
    }
}
