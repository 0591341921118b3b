//! Entity Component System module
//!
//! Components and systems that run progression over a `hecs` world.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{run_progression, update_huds};
