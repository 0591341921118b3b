//! Level-up resolution
//!
//! Once per frame the controller turns accumulated experience into levels,
//! carrying leftover XP into the next level, then notifies the display.

use crate::data::ProgressionConfig;
use crate::display::{DisplayAdapter, VitalsSnapshot};
use crate::error::ProgressionError;
use super::state::CharacterProgress;
use super::xp::ExperienceCurve;

/// Stat points awarded per level gained
pub const STAT_POINTS_PER_LEVEL: u32 = 5;

/// Safety cap on levels resolved in a single tick
pub const MAX_LEVEL_UPS_PER_TICK: u32 = 1000;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Levels gained this tick
    pub levels_gained: u32,
    /// Level after the tick
    pub level: u32,
    /// Unspent stat points after the tick
    pub stat_points: u32,
    /// Sum of the requirements crossed
    pub experience_consumed: u64,
}

impl TickReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Drives level-ups for characters sharing one curve
#[derive(Debug, Clone)]
pub struct ProgressionController {
    curve: ExperienceCurve,
    stat_points_per_level: u32,
    max_level_ups_per_tick: u32,
}

impl ProgressionController {
    pub fn new(curve: ExperienceCurve) -> Self {
        Self {
            curve,
            stat_points_per_level: STAT_POINTS_PER_LEVEL,
            max_level_ups_per_tick: MAX_LEVEL_UPS_PER_TICK,
        }
    }

    pub fn from_config(config: &ProgressionConfig) -> Self {
        Self {
            curve: config.curve,
            stat_points_per_level: config.stat_points_per_level,
            max_level_ups_per_tick: config.max_level_ups_per_tick,
        }
    }

    pub fn with_stat_points_per_level(mut self, points: u32) -> Self {
        self.stat_points_per_level = points;
        self
    }

    pub fn with_level_up_limit(mut self, limit: u32) -> Self {
        self.max_level_ups_per_tick = limit;
        self
    }

    pub fn curve(&self) -> &ExperienceCurve {
        &self.curve
    }

    pub fn stat_points_per_level(&self) -> u32 {
        self.stat_points_per_level
    }

    /// Create a level 1 character tracked by this controller
    pub fn spawn(&self, max_health: u32, max_magic: u32) -> CharacterProgress {
        CharacterProgress::new(&self.curve, max_health, max_magic)
    }

    /// Resolve every pending level-up, then update the display.
    ///
    /// Levels gained before a guard trips stay applied and are still shown;
    /// the guard's error is returned afterwards.
    pub fn advance_tick(
        &self,
        progress: &mut CharacterProgress,
        display: Option<&mut dyn DisplayAdapter>,
    ) -> Result<TickReport, ProgressionError> {
        let mut report = TickReport::default();
        let mut fault = None;

        while progress.has_pending_level_up() {
            if progress.experience_to_next_level() == 0 {
                fault = Some(ProgressionError::DegenerateRequirement { level: progress.level() });
                break;
            }
            if report.levels_gained >= self.max_level_ups_per_tick {
                fault = Some(ProgressionError::RunawayLevelUps {
                    level: progress.level(),
                    limit: self.max_level_ups_per_tick,
                });
                break;
            }

            report.experience_consumed += u64::from(progress.experience_to_next_level());
            progress.consume_level(self.stat_points_per_level, |level| {
                self.curve.required_experience(level)
            });
            report.levels_gained += 1;

            log::debug!(
                "Reached level {} ({} XP carried, {} needed)",
                progress.level(),
                progress.current_experience(),
                progress.experience_to_next_level()
            );
        }

        report.level = progress.level();
        report.stat_points = progress.stat_points();

        if report.leveled_up() {
            log::info!(
                "Level up: +{} to level {} ({} stat points)",
                report.levels_gained,
                report.level,
                report.stat_points
            );
        }

        if let Some(display) = display {
            if report.leveled_up() {
                display.on_level_up(report.level, report.stat_points);
            }
            display.on_sync_display(&VitalsSnapshot::from_progress(progress));
        }

        match fault {
            Some(err) => {
                log::error!("{}", err);
                Err(err)
            }
            None => Ok(report),
        }
    }
}

impl Default for ProgressionController {
    fn default() -> Self {
        Self::new(ExperienceCurve::default())
    }
}
