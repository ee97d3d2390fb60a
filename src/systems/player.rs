use std::time::Duration;

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{Event, EventReader, EventWriter},
    observer::Trigger,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
    world::{OnAdd, OnRemove},
};
use tracing::{debug, trace};

use crate::{
    audio::SoundGroup,
    config::PlayerConfig,
    constants::{ATTACK_TRIGGER, HIT_TRIGGER},
    error::GameError,
    map::{direction::Direction, level::Level},
    systems::{
        animation::{AnimationEvent, AnimationTrigger},
        audio::AudioEvent,
        components::{Blocking, FoodText, GridPosition, Obstacle, Player, TriggerZone},
        input::InputAxes,
        movement::{MoveAttempt, MoveOutcome},
        state::GameManager,
        timer::ScheduledActions,
    },
};

/// Food restored by each kind of pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupValues {
    pub food: i32,
    pub soda: i32,
}

/// Per-level player state. The food total is carried between levels by [`GameManager`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub food_points: i32,
    /// Damage dealt to a destructible obstacle per attack
    pub obstacle_damage: i32,
    pub pickup_values: PickupValues,
    /// Delay between reaching the exit and the level restarting
    pub restart_delay: Duration,
}

impl PlayerState {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            food_points: config.starting_food,
            obstacle_damage: config.wall_damage,
            pickup_values: PickupValues {
                food: config.food_pickup,
                soda: config.soda_pickup,
            },
            restart_delay: config.restart_delay(),
        }
    }

    /// The plain food counter label.
    pub fn food_label(&self) -> String {
        format!("Food: {}", self.food_points)
    }

    /// Adds (or, when negative, subtracts) food and returns the label showing the change.
    pub fn apply_food_delta(&mut self, amount: i32) -> String {
        self.food_points += amount;
        format!("{:+} Food: {}", amount, self.food_points)
    }

    pub fn is_starved(&self) -> bool {
        self.food_points <= 0
    }

    /// Food restored by walking into the given zone, if it is a pickup.
    pub fn pickup_value(&self, zone: TriggerZone) -> Option<i32> {
        match zone {
            TriggerZone::Food => Some(self.pickup_values.food),
            TriggerZone::Soda => Some(self.pickup_values.soda),
            TriggerZone::Exit | TriggerZone::Other => None,
        }
    }
}

/// Where the player is in its turn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    WaitingForTurn,
    Acting(Direction),
}

/// Whether player input should be processed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    InputEnabled,
    InputLocked,
}

/// Damage dealt to the player by a hostile entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: Entity,
    pub loss: i32,
}

/// Ends the run if the player is out of food. Returns whether the player is starved.
///
/// Must run after every change that can lower the food total. The game-over sound
/// only plays on the transition, not on later hits to a starved player.
pub fn check_if_game_over(
    state: &PlayerState,
    manager: &mut GameManager,
    audio: &mut EventWriter<AudioEvent>,
) -> bool {
    if !state.is_starved() {
        return false;
    }

    if manager.game_over() {
        debug!(food = state.food_points, "Player starved");
        audio.write(AudioEvent::Randomize(SoundGroup::GameOver));
        audio.write(AudioEvent::StopMusic);
    }
    true
}

/// Starts the player's action when it is their turn and a direction is held.
pub fn player_input_system(
    manager: Res<GameManager>,
    axes: Res<InputAxes>,
    mut players: Query<(&ControlState, &mut TurnPhase), With<Player>>,
) {
    if !manager.players_turn || manager.is_over() {
        return;
    }

    let Some(direction) = axes.direction() else {
        return;
    };

    for (control, mut phase) in players.iter_mut() {
        if matches!(control, ControlState::InputEnabled) && *phase == TurnPhase::WaitingForTurn {
            trace!(?direction, "Player turn started");
            *phase = TurnPhase::Acting(direction);
        }
    }
}

/// Carries out a pending one-tile move or attack, then yields the turn.
///
/// Every attempt costs one food whether or not the player actually moves.
#[allow(clippy::too_many_arguments)]
pub fn player_action_system(
    mut commands: Commands,
    level: Res<Level>,
    mut manager: ResMut<GameManager>,
    mut food_text: ResMut<FoodText>,
    mut players: Query<(Entity, &mut PlayerState, &mut TurnPhase, &mut GridPosition), With<Player>>,
    blockers: Query<(Entity, &GridPosition), (With<Blocking>, Without<Player>)>,
    mut obstacles: Query<&mut Obstacle>,
    mut animations: EventWriter<AnimationEvent>,
    mut audio: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
) {
    for (entity, mut state, mut phase, mut position) in players.iter_mut() {
        let TurnPhase::Acting(direction) = *phase else {
            continue;
        };

        state.food_points -= 1;
        food_text.0 = state.food_label();

        let attempt = MoveAttempt::resolve(
            &level,
            position.0,
            direction,
            blockers.iter().map(|(blocker, cell)| (blocker, cell.0)),
        );

        match attempt.outcome {
            MoveOutcome::Moved(target) => {
                debug!(from = ?position.0, to = ?target, food = state.food_points, "Player moved");
                position.0 = target;
                audio.write(AudioEvent::Randomize(SoundGroup::Footsteps));
                animations.write(AnimationEvent {
                    entity,
                    trigger: AnimationTrigger::movement(direction),
                });
            }
            MoveOutcome::Blocked(Some(target)) => match obstacles.get_mut(target) {
                Ok(mut obstacle) => {
                    let destroyed = obstacle.damage(state.obstacle_damage);
                    debug!(obstacle = ?target, hp = obstacle.hp, destroyed, "Player attacked obstacle");
                    if destroyed {
                        commands.entity(target).despawn();
                    }
                    animations.write(AnimationEvent {
                        entity,
                        trigger: ATTACK_TRIGGER,
                    });
                }
                Err(_) => {
                    errors.write(GameError::UnexpectedCollisionTarget(target));
                }
            },
            MoveOutcome::Blocked(None) => {
                trace!(?direction, "Player bumped into the level boundary");
            }
        }

        check_if_game_over(&state, &mut manager, &mut audio);
        manager.end_player_turn();
        *phase = TurnPhase::WaitingForTurn;
    }
}

/// Applies damage from hostile entities.
pub fn damage_system(
    mut events: EventReader<DamageEvent>,
    mut manager: ResMut<GameManager>,
    mut food_text: ResMut<FoodText>,
    mut players: Query<&mut PlayerState, With<Player>>,
    mut animations: EventWriter<AnimationEvent>,
    mut audio: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let Ok(mut state) = players.get_mut(event.target) else {
            errors.write(GameError::InvalidState(format!(
                "Damage target {:?} is not an active player",
                event.target
            )));
            continue;
        };

        animations.write(AnimationEvent {
            entity: event.target,
            trigger: HIT_TRIGGER,
        });
        food_text.0 = state.apply_food_delta(-event.loss);
        debug!(loss = event.loss, food = state.food_points, "Player took damage");
        check_if_game_over(&state, &mut manager, &mut audio);
    }
}

/// Pulls the stored food total into a newly spawned player.
pub fn player_activated_observer(
    trigger: Trigger<OnAdd, Player>,
    manager: Res<GameManager>,
    mut food_text: ResMut<FoodText>,
    mut players: Query<&mut PlayerState>,
) {
    if let Ok(mut state) = players.get_mut(trigger.target()) {
        state.food_points = manager.stored_food;
        food_text.0 = state.food_label();
        debug!(player = ?trigger.target(), food = state.food_points, "Player activated");
    }
}

/// Stores the food total of a despawning player and cancels what it scheduled.
pub fn player_deactivated_observer(
    trigger: Trigger<OnRemove, Player>,
    mut manager: ResMut<GameManager>,
    mut scheduled: ResMut<ScheduledActions>,
    players: Query<&PlayerState>,
) {
    let player = trigger.target();
    if let Ok(state) = players.get(player) {
        manager.stored_food = state.food_points;
    }
    let cancelled = scheduled.cancel_owned_by(player);
    debug!(?player, stored_food = manager.stored_food, cancelled, "Player deactivated");
}
