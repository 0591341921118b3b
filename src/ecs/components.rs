//! ECS Components
//!
//! Marker and identity components. [`CharacterProgress`] and [`HudDisplay`]
//! are attached to entities directly.
//!
//! [`CharacterProgress`]: crate::progression::CharacterProgress
//! [`HudDisplay`]: crate::ui::HudDisplay

/// Marks an entity as the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Name component for entities
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
