pub mod celebration;
pub mod config;
pub mod decks;
pub mod input;
pub mod navigator;
pub mod registry;
