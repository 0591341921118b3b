//! Timed fade-out for the level-up cue
//!
//! Advanced by frame time from the display's own update step, independent of
//! progression ticks.

use std::time::Duration;

/// Default fade length in seconds
pub const DEFAULT_FADE_SECONDS: f32 = 3.0;

/// Opacity right after a restart
const START_ALPHA: f32 = 1.0;
/// Opacity once the fade has finished
const END_ALPHA: f32 = 0.0;

/// Linear alpha fade from 1 to 0. Restarting mid-fade snaps back to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeCue {
    /// Fade length in seconds
    duration: f32,
    /// Seconds since the last restart
    elapsed: f32,
    /// Visible while fading; hidden once finished
    active: bool,
}

impl FadeCue {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            active: false,
        }
    }

    /// Show the cue at full opacity and run the fade from the start
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Advance the fade by a frame's worth of time
    pub fn update(&mut self, delta: Duration) {
        if !self.active {
            return;
        }

        self.elapsed += delta.as_secs_f32();
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.active = false;
        }
    }

    /// Current opacity
    pub fn alpha(&self) -> f32 {
        if !self.active || self.duration <= 0.0 {
            return END_ALPHA;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        START_ALPHA + (END_ALPHA - START_ALPHA) * t
    }

    pub fn is_visible(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl Default for FadeCue {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECONDS)
    }
}
