//! Game session
//!
//! Owns the ECS world and drives progression once per frame.

use std::time::Duration;

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::ProgressionConfig;
use crate::ecs::{self, Name, Player};
use crate::error::ProgressionError;
use crate::progression::{Attribute, CharacterProgress, ProgressionController};
use crate::ui::HudDisplay;

/// Messages kept in the log
const MAX_MESSAGES: usize = 100;

/// The main game struct that holds all game data
pub struct Game {
    /// Current game state
    state: GameState,
    /// ECS world containing all entities
    world: World,
    /// Level-up rules shared by every character
    controller: ProgressionController,
    /// Tuning the session was started with
    config: ProgressionConfig,
    /// The player entity
    player_entity: Option<Entity>,
    /// Message log
    messages: Vec<String>,
    /// Random source for experience rewards
    rng: StdRng,
}

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Quit,
}

impl Game {
    /// Start a session with tuning from disk (or defaults)
    pub fn new() -> Self {
        Self::with_config(ProgressionConfig::load_or_default())
    }

    pub fn with_config(config: ProgressionConfig) -> Self {
        let mut game = Self {
            state: GameState::Playing,
            world: World::new(),
            controller: ProgressionController::from_config(&config),
            config,
            player_entity: None,
            messages: Vec::new(),
            rng: StdRng::from_entropy(),
        };
        game.spawn_player();
        game
    }

    /// Spawn a level 1 player with a HUD already showing its values
    pub fn spawn_player(&mut self) -> Entity {
        let progress = self
            .controller
            .spawn(self.config.starting_health, self.config.starting_magic);
        let hud = HudDisplay::for_progress(&progress, self.config.level_up_fade_seconds);
        let entity = self.world.spawn((Player, Name::new("Hero"), progress, hud));

        self.player_entity = Some(entity);
        log::info!("Spawned player at level 1");
        entity
    }

    /// Update game state (called every frame)
    pub fn update(&mut self, delta: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        for (entity, result) in ecs::run_progression(&mut self.world, &self.controller) {
            if Some(entity) != self.player_entity {
                continue;
            }
            match result {
                Ok(report) if report.leveled_up() => {
                    self.add_message(format!(
                        "Level up! Now level {} with {} stat points",
                        report.level, report.stat_points
                    ));
                }
                Ok(_) => {}
                Err(e) => self.add_message(format!("Progression fault: {}", e)),
            }
        }

        ecs::update_huds(&mut self.world, delta);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn quit(&mut self) {
        log::debug!("State transition: {:?} -> {:?}", self.state, GameState::Quit);
        self.state = GameState::Quit;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player_entity
    }

    pub fn controller(&self) -> &ProgressionController {
        &self.controller
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Snapshot of the player's progress
    pub fn player_progress(&self) -> Option<CharacterProgress> {
        let player = self.player_entity?;
        self.world
            .get::<&CharacterProgress>(player)
            .ok()
            .map(|progress| (*progress).clone())
    }

    /// Borrow the player's HUD for rendering
    pub fn player_hud(&self) -> Option<hecs::Ref<'_, HudDisplay>> {
        let player = self.player_entity?;
        self.world.get::<&HudDisplay>(player).ok()
    }

    /// Apply a change to the player's progress; returns None without a player
    fn with_player_progress<R>(&mut self, f: impl FnOnce(&mut CharacterProgress) -> R) -> Option<R> {
        let player = self.player_entity?;
        let mut progress = self.world.get::<&mut CharacterProgress>(player).ok()?;
        Some(f(&mut *progress))
    }

    /// Give the player experience; the level-up lands on the next update
    pub fn grant_experience(&mut self, amount: u32) {
        if self.with_player_progress(|p| p.gain_experience(amount)).is_some() {
            self.add_message(format!("Gained {} XP", amount));
        }
    }

    /// Grant a random reward, as from a defeated enemy
    pub fn grant_random_experience(&mut self) -> u32 {
        let amount = self.rng.gen_range(5..=40);
        self.grant_experience(amount);
        amount
    }

    pub fn damage_player(&mut self, amount: u32) -> u32 {
        self.with_player_progress(|p| p.health_mut().drain(amount)).unwrap_or(0)
    }

    pub fn drain_magic(&mut self, amount: u32) -> u32 {
        self.with_player_progress(|p| p.magic_mut().drain(amount)).unwrap_or(0)
    }

    /// Refill health and magic
    pub fn rest(&mut self) {
        self.with_player_progress(|p| {
            let health = p.health().max();
            let magic = p.magic().max();
            p.health_mut().restore(health);
            p.magic_mut().restore(magic);
        });
        self.add_message("You rest and recover");
    }

    pub fn spend_stat_point(&mut self, attribute: Attribute) -> Result<u32, ProgressionError> {
        let result = self
            .with_player_progress(|p| p.spend_stat_point(attribute))
            .unwrap_or(Err(ProgressionError::NoStatPoints { attribute }));
        match &result {
            Ok(value) => self.add_message(format!("{} raised to {}", attribute, value)),
            Err(e) => self.add_message(e.to_string()),
        }
        result
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_config(ProgressionConfig::default())
    }
}
