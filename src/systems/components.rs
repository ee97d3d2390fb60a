use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;

use crate::constants::LevelTile;
use crate::systems::{
    animation::Animator,
    player::{ControlState, PlayerState, TurnPhase},
};

/// A tag component for the entity controlled by the player.
#[derive(Default, Component, Debug)]
pub struct Player;

/// The cell an entity occupies on the level grid.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition(pub IVec2);

/// Marks entities that occupy their cell and stop anything from moving into it.
#[derive(Component, Default, Debug)]
pub struct Blocking;

/// A destructible obstacle, such as an inner wall.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub hp: i32,
}

impl Obstacle {
    /// Applies damage, returning true once the obstacle is destroyed.
    pub fn damage(&mut self, loss: i32) -> bool {
        self.hp -= loss;
        self.hp <= 0
    }
}

/// The kind of trigger zone an entity represents.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerZone {
    Exit,
    Food,
    Soda,
    Other,
}

impl TriggerZone {
    /// Returns the zone spawned for a level tile, if any.
    pub fn from_tile(tile: LevelTile) -> Option<TriggerZone> {
        match tile {
            LevelTile::Exit => Some(TriggerZone::Exit),
            LevelTile::Food => Some(TriggerZone::Food),
            LevelTile::Soda => Some(TriggerZone::Soda),
            _ => None,
        }
    }
}

/// Marks a pickup that has already been collected. Consumed zones no longer trigger.
#[derive(Component, Default, Debug)]
pub struct Consumed;

/// Marks every entity that belongs to the currently loaded level.
#[derive(Component, Default, Debug)]
pub struct LevelEntity;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub position: GridPosition,
    pub state: PlayerState,
    pub turn: TurnPhase,
    pub control: ControlState,
    pub animator: Animator,
    pub level_entity: LevelEntity,
}

#[derive(Bundle)]
pub struct WallBundle {
    pub position: GridPosition,
    pub blocking: Blocking,
    pub obstacle: Obstacle,
    pub level_entity: LevelEntity,
}

#[derive(Bundle)]
pub struct ZoneBundle {
    pub position: GridPosition,
    pub zone: TriggerZone,
    pub level_entity: LevelEntity,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    /// Floating-point delta time in seconds, as supplied by the host
    pub seconds: f32,
}

impl DeltaTime {
    /// The frame time as a `Duration`.
    ///
    /// Negative and NaN values count as no time passing; values too large to represent
    /// (including infinity) saturate to `Duration::MAX`.
    pub fn duration(&self) -> Duration {
        saturating_duration(self.seconds)
    }
}

/// Converts seconds to a `Duration` without panicking on out-of-range input.
pub fn saturating_duration(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX)
}

/// The food counter label shown to the player.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodText(pub String);
