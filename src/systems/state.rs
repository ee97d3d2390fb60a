use std::time::Duration;

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{info, trace};

use crate::config::PlayerConfig;
use crate::systems::components::DeltaTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Playing,
    GameOver,
}

/// Run-wide state shared between the player and the level driver.
///
/// Outlives level reloads: the player pulls its food total from here when it spawns
/// and writes it back when it is deactivated.
#[derive(Resource, Debug, Clone)]
pub struct GameManager {
    /// Whether the player may act this tick
    pub players_turn: bool,
    /// Food carried over between levels
    pub stored_food: i32,
    /// The current level number, starting from 1
    pub level: u32,
    pub stage: RunStage,
    turn_delay: Duration,
    turn_timer: Duration,
}

impl GameManager {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            players_turn: true,
            stored_food: config.starting_food,
            level: 1,
            stage: RunStage::Playing,
            turn_delay: config.turn_delay(),
            turn_timer: Duration::ZERO,
        }
    }

    /// Yields the player's turn; it comes back after the configured turn delay.
    pub fn end_player_turn(&mut self) {
        self.players_turn = false;
        self.turn_timer = self.turn_delay;
    }

    /// Ends the run. Returns true only on the transition into game over.
    pub fn game_over(&mut self) -> bool {
        if self.stage == RunStage::GameOver {
            return false;
        }
        self.stage = RunStage::GameOver;
        self.players_turn = false;
        info!(level = self.level, "After {} days, you starved.", self.level);
        true
    }

    pub fn is_over(&self) -> bool {
        self.stage == RunStage::GameOver
    }

    /// Advances to the next level after a scene reload.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.players_turn = true;
        self.turn_timer = Duration::ZERO;
    }
}

/// Hands the turn back to the player once the turn delay has elapsed.
pub fn turn_system(dt: Res<DeltaTime>, mut manager: ResMut<GameManager>) {
    if manager.players_turn || manager.is_over() {
        return;
    }

    manager.turn_timer = manager.turn_timer.saturating_sub(dt.duration());
    if manager.turn_timer.is_zero() {
        trace!("Turn returned to player");
        manager.players_turn = true;
    }
}
