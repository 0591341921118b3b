//! Character progress state
//!
//! Level, experience, stat points and the health/magic pools of a character.
//! Level and the cached requirement are only writable from the controller.

use std::fmt;

use crate::error::ProgressionError;
use super::xp::ExperienceCurve;

/// A current/max resource pool (health, magic)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    current: u32,
    max: u32,
}

impl Pool {
    /// Full pool
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Remove up to `amount`, returning how much was actually removed
    pub fn drain(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Add up to `amount` without exceeding max, returning how much was added
    pub fn restore(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max.saturating_sub(self.current));
        self.current += actual;
        actual
    }

    /// Set the current value, clamped to max
    pub fn set_current(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Change the maximum; current is clamped down if needed
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// Attributes that stat points can be spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Strength,
    Speed,
    Stamina,
    Dexterity,
    Agility,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Strength,
        Attribute::Speed,
        Attribute::Stamina,
        Attribute::Dexterity,
        Attribute::Agility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Speed => "Speed",
            Attribute::Stamina => "Stamina",
            Attribute::Dexterity => "Dexterity",
            Attribute::Agility => "Agility",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allocated attribute values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub strength: u32,
    pub speed: u32,
    pub stamina: u32,
    pub dexterity: u32,
    pub agility: u32,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Speed => self.speed,
            Attribute::Stamina => self.stamina,
            Attribute::Dexterity => self.dexterity,
            Attribute::Agility => self.agility,
        }
    }

    fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Speed => &mut self.speed,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Agility => &mut self.agility,
        }
    }
}

/// Progress of a single character.
///
/// `experience_to_next_level` always equals the curve evaluated at `level`.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterProgress {
    level: u32,
    current_experience: u32,
    experience_to_next_level: u32,
    stat_points: u32,
    health: Pool,
    magic: Pool,
    attributes: Attributes,
}

impl CharacterProgress {
    /// A freshly spawned level 1 character with full pools
    pub fn new(curve: &ExperienceCurve, max_health: u32, max_magic: u32) -> Self {
        Self {
            level: 1,
            current_experience: 0,
            experience_to_next_level: curve.required_experience(1),
            stat_points: 0,
            health: Pool::new(max_health),
            magic: Pool::new(max_magic),
            attributes: Attributes::default(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_experience(&self) -> u32 {
        self.current_experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_to_next_level
    }

    pub fn stat_points(&self) -> u32 {
        self.stat_points
    }

    pub fn health(&self) -> &Pool {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut Pool {
        &mut self.health
    }

    pub fn magic(&self) -> &Pool {
        &self.magic
    }

    pub fn magic_mut(&mut self) -> &mut Pool {
        &mut self.magic
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Whether the next tick will level this character up
    pub fn has_pending_level_up(&self) -> bool {
        self.current_experience >= self.experience_to_next_level
    }

    /// Add experience. Level-ups resolve on the next controller tick.
    pub fn gain_experience(&mut self, amount: u32) {
        self.current_experience = self.current_experience.saturating_add(amount);
    }

    /// Move one stat point into an attribute, returning its new value
    pub fn spend_stat_point(&mut self, attribute: Attribute) -> Result<u32, ProgressionError> {
        if self.stat_points == 0 {
            return Err(ProgressionError::NoStatPoints { attribute });
        }
        self.stat_points -= 1;
        let value = self.attributes.get_mut(attribute);
        *value += 1;
        log::debug!("Spent stat point on {} (now {})", attribute, value);
        Ok(*value)
    }

    /// Consume the current requirement and advance one level.
    /// The caller must recompute the requirement before comparing again.
    pub(super) fn consume_level(&mut self, stat_points: u32, next_requirement: impl FnOnce(u32) -> u32) {
        self.current_experience -= self.experience_to_next_level;
        self.level += 1;
        self.stat_points = self.stat_points.saturating_add(stat_points);
        self.experience_to_next_level = next_requirement(self.level);
    }
}
