//! User Interface module
//!
//! Terminal HUD rendered with ratatui.

pub mod hud;

pub use hud::{HudDisplay, Slider};
