//! Progression systems

pub mod xp;
pub mod state;
pub mod controller;

pub use xp::{ExperienceCurve, required_experience, tier_for_level, LEVELS_PER_TIER};
pub use state::{CharacterProgress, Pool, Attribute, Attributes};
pub use controller::{ProgressionController, TickReport, STAT_POINTS_PER_LEVEL, MAX_LEVEL_UPS_PER_TICK};
