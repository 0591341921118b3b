//! ECS Systems
//!
//! Per-frame systems over entities that carry progression state.

use std::time::Duration;

use hecs::{Entity, World};

use crate::display::DisplayAdapter;
use crate::error::ProgressionError;
use crate::progression::{CharacterProgress, ProgressionController, TickReport};
use crate::ui::HudDisplay;

/// Tick every entity with [`CharacterProgress`].
///
/// An entity's own [`HudDisplay`] is used as its display; entities without
/// one are ticked headless.
pub fn run_progression(
    world: &mut World,
    controller: &ProgressionController,
) -> Vec<(Entity, Result<TickReport, ProgressionError>)> {
    world
        .query_mut::<(&mut CharacterProgress, Option<&mut HudDisplay>)>()
        .into_iter()
        .map(|(entity, (progress, hud))| {
            let display = hud.map(|hud| hud as &mut dyn DisplayAdapter);
            (entity, controller.advance_tick(progress, display))
        })
        .collect()
}

/// Advance level-up fades on every HUD
pub fn update_huds(world: &mut World, delta: Duration) {
    for (_, hud) in world.query_mut::<&mut HudDisplay>() {
        hud.update(delta);
    }
}
