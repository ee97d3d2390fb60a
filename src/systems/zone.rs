use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{Changed, With, Without},
    system::{Commands, Query, ResMut},
};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::{
    audio::SoundGroup,
    constants::EXIT_MESSAGE,
    events::GameEvent,
    systems::{
        audio::AudioEvent,
        components::{Consumed, FoodText, GridPosition, Player, TriggerZone},
        player::{ControlState, PlayerState},
        state::GameManager,
        timer::{DeferredAction, ScheduledActions},
    },
};

/// Detects the player entering the cell of an active trigger zone.
///
/// Only players whose position changed since the last run are checked, so standing
/// on a zone does not trigger it again.
pub fn trigger_zone_system(
    players: Query<(Entity, &GridPosition), (With<Player>, Changed<GridPosition>)>,
    zones: Query<(Entity, &GridPosition), (With<TriggerZone>, Without<Consumed>, Without<Player>)>,
    mut events: EventWriter<GameEvent>,
) {
    for (player, player_position) in players.iter() {
        for (zone, zone_position) in zones.iter() {
            if player_position == zone_position {
                trace!(?player, ?zone, cell = ?zone_position.0, "Player entered trigger zone");
                events.write(GameEvent::Collision(player, zone));
            }
        }
    }
}

/// Applies the effect of each trigger zone the player entered.
#[allow(clippy::too_many_arguments)]
pub fn zone_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut manager: ResMut<GameManager>,
    mut food_text: ResMut<FoodText>,
    mut scheduled: ResMut<ScheduledActions>,
    mut players: Query<(&mut PlayerState, &mut ControlState), With<Player>>,
    zones: Query<&TriggerZone, Without<Consumed>>,
    mut audio: EventWriter<AudioEvent>,
) {
    if manager.is_over() {
        events.clear();
        return;
    }

    // Consumed markers are only applied once commands flush, so track this run's pickups too
    let mut consumed: SmallVec<[Entity; 4]> = SmallVec::new();

    for event in events.read() {
        let GameEvent::Collision(player, zone_entity) = *event else {
            continue;
        };
        if consumed.contains(&zone_entity) {
            continue;
        }
        let (Ok((mut state, mut control)), Ok(zone)) = (players.get_mut(player), zones.get(zone_entity)) else {
            continue;
        };

        match zone {
            TriggerZone::Exit => {
                if *control == ControlState::InputLocked {
                    continue;
                }
                let id = scheduled.schedule(player, state.restart_delay, DeferredAction::RestartLevel);
                *control = ControlState::InputLocked;
                food_text.0 = EXIT_MESSAGE.to_string();
                manager.stored_food = state.food_points;
                info!(action = ?id, delay = ?state.restart_delay, food = state.food_points, "Player reached the exit");
            }
            TriggerZone::Food | TriggerZone::Soda => {
                let group = if *zone == TriggerZone::Food {
                    SoundGroup::Eat
                } else {
                    SoundGroup::Drink
                };
                let value = state.pickup_value(*zone).unwrap_or_default();
                audio.write(AudioEvent::Randomize(group));
                food_text.0 = state.apply_food_delta(value);
                commands.entity(zone_entity).insert(Consumed);
                consumed.push(zone_entity);
                debug!(?zone, value, food = state.food_points, "Pickup collected");
            }
            TriggerZone::Other => {
                trace!(zone = ?zone_entity, "Ignoring untagged trigger zone");
            }
        }
    }
}
