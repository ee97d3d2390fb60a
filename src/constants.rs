//! This module contains all the constants used in the game.

use std::time::Duration;

use crate::systems::animation::AnimationTrigger;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Label shown in the food counter once the player walks onto the exit.
pub const EXIT_MESSAGE: &str = "EXIT !!!!";

/// Trigger fired when the player attacks a destructible wall.
///
/// The attack always plays the same clip regardless of which side the wall is on.
pub const ATTACK_TRIGGER: AnimationTrigger = AnimationTrigger::PlayerLeft;

/// Trigger fired when a hostile entity damages the player.
pub const HIT_TRIGGER: AnimationTrigger = AnimationTrigger::PlayerUp;

/// Scene index of the only level layout shipped with the game.
pub const MAIN_SCENE: usize = 0;

/// Pitch range applied to randomized sound effects, as (low, high) multipliers.
pub const SFX_PITCH_RANGE: (f32, f32) = (0.95, 1.05);

/// An enum representing the different types of tiles on the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTile {
    /// Walkable floor.
    Floor,
    /// An indestructible outer wall.
    OuterWall,
    /// A destructible wall the player can attack.
    Wall,
    /// A food pickup.
    Food,
    /// A soda pickup.
    Soda,
    /// The level exit.
    Exit,
    /// The player's starting position.
    PlayerStart,
}

/// The default level layout, as rows of characters.
pub const RAW_LEVEL: [&str; 10] = [
    "##########",
    "#@..W...F#",
    "#.##.W...#",
    "#..S..W..#",
    "#.W....W.#",
    "#...F..S.#",
    "#W..W..#.#",
    "#..S...W.#",
    "#.W...F.E#",
    "##########",
];
