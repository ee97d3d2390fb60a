use std::collections::{HashMap, VecDeque};

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{info, trace};

use crate::{
    events::{GameCommand, GameEvent},
    map::direction::Direction,
    systems::{audio::AudioState, components::GlobalState},
};

/// Raw, unsmoothed axis values for the current tick, each in `-1.0..=1.0`.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InputAxes {
    pub horizontal: f32,
    pub vertical: f32,
}

impl InputAxes {
    pub fn from_direction(direction: Direction) -> Self {
        let (horizontal, vertical) = match direction {
            Direction::Up => (0.0, 1.0),
            Direction::Down => (0.0, -1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        };
        Self { horizontal, vertical }
    }

    pub fn direction(&self) -> Option<Direction> {
        resolve_direction(self.horizontal, self.vertical)
    }
}

/// Converts raw axis values into a single grid direction.
///
/// Values are truncated towards zero. Movement is strictly axis-aligned: when the
/// horizontal axis is non-zero the vertical axis is ignored.
pub fn resolve_direction(horizontal: f32, vertical: f32) -> Option<Direction> {
    let horizontal = horizontal as i32;
    let mut vertical = vertical as i32;
    if horizontal != 0 {
        vertical = 0;
    }
    Direction::from_axes(horizontal, vertical)
}

/// Keys pressed since the last tick, oldest first.
#[derive(Resource, Debug, Default, Clone)]
pub struct PendingKeys(pub VecDeque<char>);

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<char, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert('w', GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert('k', GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert('s', GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert('j', GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert('a', GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert('h', GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert('d', GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert('l', GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert('m', GameCommand::MuteAudio);
        key_bindings.insert('q', GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn command_for(&self, key: char) -> Option<GameCommand> {
        self.key_bindings.get(&key.to_ascii_lowercase()).copied()
    }
}

/// Turns queued key presses into axis values and game commands.
///
/// Movement keys drive the axes for this tick; when several arrive at once the last one wins.
pub fn input_system(
    bindings: Res<Bindings>,
    mut pending: ResMut<PendingKeys>,
    mut axes: ResMut<InputAxes>,
    mut writer: EventWriter<GameEvent>,
) {
    while let Some(key) = pending.0.pop_front() {
        match bindings.command_for(key) {
            Some(GameCommand::MovePlayer(direction)) => {
                *axes = InputAxes::from_direction(direction);
            }
            Some(command) => {
                writer.write(GameEvent::Command(command));
            }
            None => trace!(?key, "Ignoring unbound key"),
        }
    }
}

/// Applies non-movement commands to global state.
pub fn command_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut audio_state: ResMut<AudioState>,
) {
    for event in events.read() {
        if let GameEvent::Command(command) = event {
            match command {
                GameCommand::Exit => {
                    state.exit = true;
                }
                GameCommand::MuteAudio => {
                    audio_state.muted = !audio_state.muted;
                    info!("Audio {}", if audio_state.muted { "muted" } else { "unmuted" });
                }
                GameCommand::MovePlayer(_) => {}
            }
        }
    }
}
