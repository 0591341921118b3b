//! Emberlevel - curved experience and level-up progression
//!
//! Tracks a character's level, experience, stat points, health and magic,
//! converts accumulated experience into level-ups along a tiered curve, and
//! pushes the results to a display.

pub mod error;
pub mod progression;
pub mod display;
pub mod data;
pub mod ecs;
pub mod game;
pub mod ui;

// Re-export commonly used types
pub use error::{ConfigError, ProgressionError};
pub use progression::{CharacterProgress, ExperienceCurve, ProgressionController, TickReport};
pub use display::{DisplayAdapter, VitalsSnapshot};
pub use data::ProgressionConfig;
