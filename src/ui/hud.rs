//! Character HUD
//!
//! Terminal display adapter: health/magic/experience sliders, the level label
//! and the fading level-up banner.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::display::{DisplayAdapter, FadeCue, VitalsSnapshot, level_label, pool_label};
use crate::progression::CharacterProgress;

/// Width of the slider bars in cells
const BAR_WIDTH: usize = 16;

/// A value/max bar with its text label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slider {
    value: u32,
    max: u32,
    label: String,
}

impl Slider {
    pub fn set(&mut self, value: u32, max: u32) {
        self.value = value;
        self.max = max;
        self.label = pool_label(value, max);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fill fraction in 0..=1; an empty max shows as empty
    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            (self.value as f32 / self.max as f32).clamp(0.0, 1.0)
        }
    }
}

/// HUD for one character
#[derive(Debug, Clone)]
pub struct HudDisplay {
    health_bar: Slider,
    magic_bar: Slider,
    exp_bar: Slider,
    level_text: String,
    stat_points: u32,
    level_up_icon: FadeCue,
}

impl HudDisplay {
    /// Empty HUD with the level-up icon hidden
    pub fn new(fade_seconds: f32) -> Self {
        Self {
            health_bar: Slider::default(),
            magic_bar: Slider::default(),
            exp_bar: Slider::default(),
            level_text: level_label(1),
            stat_points: 0,
            level_up_icon: FadeCue::new(fade_seconds),
        }
    }

    /// HUD already showing a character's current values
    pub fn for_progress(progress: &CharacterProgress, fade_seconds: f32) -> Self {
        let mut hud = Self::new(fade_seconds);
        hud.level_text = level_label(progress.level());
        hud.on_sync_display(&VitalsSnapshot::from_progress(progress));
        hud
    }

    /// Advance the level-up fade by frame time
    pub fn update(&mut self, delta: Duration) {
        self.level_up_icon.update(delta);
    }

    pub fn health_bar(&self) -> &Slider {
        &self.health_bar
    }

    pub fn magic_bar(&self) -> &Slider {
        &self.magic_bar
    }

    pub fn exp_bar(&self) -> &Slider {
        &self.exp_bar
    }

    pub fn level_text(&self) -> &str {
        &self.level_text
    }

    pub fn stat_points(&self) -> u32 {
        self.stat_points
    }

    pub fn level_up_icon(&self) -> &FadeCue {
        &self.level_up_icon
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Character ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(vec![
            Span::styled(" ★ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                self.level_text.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])];

        if self.stat_points > 0 {
            lines.push(Line::from(vec![
                Span::styled("  ✦ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("{} points", self.stat_points),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(bar_line("HP", &self.health_bar, Color::Red));
        lines.push(bar_line("MP", &self.magic_bar, Color::Blue));
        lines.push(bar_line("XP", &self.exp_bar, Color::Cyan));

        if self.level_up_icon.is_visible() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  LEVEL UP!",
                Style::default()
                    .fg(fade_color(self.level_up_icon.alpha()))
                    .add_modifier(Modifier::BOLD),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for HudDisplay {
    fn default() -> Self {
        Self::new(crate::display::fade::DEFAULT_FADE_SECONDS)
    }
}

impl DisplayAdapter for HudDisplay {
    fn on_level_up(&mut self, level: u32, stat_points: u32) {
        self.level_text = level_label(level);
        self.stat_points = stat_points;
        // A newer level-up replaces any fade still running
        self.level_up_icon.restart();
    }

    fn on_sync_display(&mut self, vitals: &VitalsSnapshot) {
        self.health_bar.set(vitals.health, vitals.max_health);
        self.magic_bar.set(vitals.magic, vitals.max_magic);
        self.exp_bar.set(vitals.experience, vitals.max_experience);
        self.stat_points = vitals.stat_points;
    }
}

fn bar_line(name: &str, slider: &Slider, color: Color) -> Line<'static> {
    let filled = ((BAR_WIDTH as f32) * slider.ratio()).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    Line::from(vec![
        Span::styled(format!("{:<3}", name), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(BAR_WIDTH - filled), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(slider.label.clone(), Style::default().fg(Color::White)),
    ])
}

/// Banner gold scaled toward black by opacity
fn fade_color(alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    Color::Rgb((255.0 * alpha) as u8, (215.0 * alpha) as u8, 0)
}
