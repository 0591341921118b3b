//! Game module - frame-driven session

mod state;

pub use state::{Game, GameState};
