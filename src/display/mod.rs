//! Display adapter boundary
//!
//! The progression core pushes level-up and sync notifications through
//! [`DisplayAdapter`]. Whatever draws the sliders and labels implements it.

pub mod fade;

pub use fade::FadeCue;

use crate::progression::CharacterProgress;

/// Values shown on the health, magic and experience sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VitalsSnapshot {
    pub health: u32,
    pub max_health: u32,
    pub magic: u32,
    pub max_magic: u32,
    pub experience: u32,
    pub max_experience: u32,
    /// Unspent stat points
    pub stat_points: u32,
}

impl VitalsSnapshot {
    pub fn from_progress(progress: &CharacterProgress) -> Self {
        Self {
            health: progress.health().current(),
            max_health: progress.health().max(),
            magic: progress.magic().current(),
            max_magic: progress.magic().max(),
            experience: progress.current_experience(),
            max_experience: progress.experience_to_next_level(),
            stat_points: progress.stat_points(),
        }
    }
}

/// Receives presentation updates from the progression controller
pub trait DisplayAdapter {
    /// One or more levels were gained this tick
    fn on_level_up(&mut self, level: u32, stat_points: u32);

    /// Refresh sliders and labels; sent every tick
    fn on_sync_display(&mut self, vitals: &VitalsSnapshot);
}

/// A notification sent to a display adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    LevelUp { level: u32, stat_points: u32 },
    SyncDisplay(VitalsSnapshot),
}

/// Adapter that records every notification, for headless use and tests
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<ProgressionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_ups(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.events.iter().filter_map(|event| match event {
            ProgressionEvent::LevelUp { level, stat_points } => Some((*level, *stat_points)),
            ProgressionEvent::SyncDisplay(_) => None,
        })
    }

    pub fn last_sync(&self) -> Option<&VitalsSnapshot> {
        self.events.iter().rev().find_map(|event| match event {
            ProgressionEvent::SyncDisplay(vitals) => Some(vitals),
            ProgressionEvent::LevelUp { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplayAdapter for EventLog {
    fn on_level_up(&mut self, level: u32, stat_points: u32) {
        self.events.push(ProgressionEvent::LevelUp { level, stat_points });
    }

    fn on_sync_display(&mut self, vitals: &VitalsSnapshot) {
        self.events.push(ProgressionEvent::SyncDisplay(*vitals));
    }
}

/// Label for a slider value, e.g. `"35 / 100"`
pub fn pool_label(current: u32, max: u32) -> String {
    format!("{} / {}", current, max)
}

/// Label for the level text, e.g. `"Lvl : 4"`
pub fn level_label(level: u32) -> String {
    format!("Lvl : {}", level)
}
