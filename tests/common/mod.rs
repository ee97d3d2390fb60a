#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use bevy_ecs::{
    entity::Entity,
    event::{Event, Events},
    world::World,
};
use glam::IVec2;
use scavenger::{
    audio::{Audio, AudioBackend, Sound},
    config::PlayerConfig,
    error::GameError,
    events::GameEvent,
    map::level::Level,
    systems::{
        player_activated_observer, player_deactivated_observer, AnimationEvent, Animator, AudioEvent, AudioResource,
        AudioState, Bindings, Blocking, ControlState, DamageEvent, DeltaTime, FoodText, GameManager, GlobalState,
        GridPosition, InputAxes, LevelEntity, LevelEvent, Obstacle, PendingKeys, Player, PlayerBundle, PlayerState,
        ScheduledActions, TriggerZone, TurnPhase, ZoneBundle,
    },
};

/// A small room: start at (1,1), open floor around it, outer walls on every edge.
pub const TEST_LEVEL: [&str; 5] = ["#######", "#@....#", "#.....#", "#.....#", "#######"];

/// Creates a basic test world with required resources for ECS systems
pub fn create_test_world() -> World {
    create_test_world_with(PlayerConfig::default())
}

pub fn create_test_world_with(config: PlayerConfig) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(Events::<AnimationEvent>::default());
    world.insert_resource(Events::<DamageEvent>::default());
    world.insert_resource(Events::<LevelEvent>::default());

    world.insert_resource(GameManager::new(&config));
    world.insert_resource(config);
    world.insert_resource(create_test_level());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(AudioState::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(PendingKeys::default());
    world.insert_resource(InputAxes::default());
    world.insert_resource(FoodText::default());
    world.insert_resource(ScheduledActions::default());
    world.insert_resource(DeltaTime { seconds: 1.0 / 60.0 }); // 60 FPS
    world.insert_non_send_resource(AudioResource(Audio::disabled()));

    world.add_observer(player_activated_observer);
    world.add_observer(player_deactivated_observer);

    world
}

pub fn create_test_level() -> Level {
    Level::new(&TEST_LEVEL).expect("Failed to create test level")
}

/// Spawns a player with the given food total at the given cell.
///
/// The food is routed through the stored total, as it would be on a level load.
pub fn spawn_test_player(world: &mut World, cell: IVec2, food: i32) -> Entity {
    world.resource_mut::<GameManager>().stored_food = food;
    let state = PlayerState::from_config(world.resource::<PlayerConfig>());
    world
        .spawn(PlayerBundle {
            player: Player,
            position: GridPosition(cell),
            state,
            turn: TurnPhase::WaitingForTurn,
            control: ControlState::InputEnabled,
            animator: Animator::default(),
            level_entity: LevelEntity,
        })
        .id()
}

pub fn spawn_test_wall(world: &mut World, cell: IVec2, hp: i32) -> Entity {
    world
        .spawn((GridPosition(cell), Blocking, Obstacle { hp }, LevelEntity))
        .id()
}

pub fn spawn_test_zone(world: &mut World, cell: IVec2, zone: TriggerZone) -> Entity {
    world
        .spawn(ZoneBundle {
            position: GridPosition(cell),
            zone,
            level_entity: LevelEntity,
        })
        .id()
}

/// Puts the player mid-turn, as if `player_input_system` had accepted a direction.
pub fn begin_turn(world: &mut World, player: Entity, direction: scavenger::map::direction::Direction) {
    *world.get_mut::<TurnPhase>(player).expect("player should have a turn phase") = TurnPhase::Acting(direction);
}

pub fn food_of(world: &World, player: Entity) -> i32 {
    world.get::<PlayerState>(player).expect("player should have state").food_points
}

pub fn food_text(world: &World) -> String {
    world.resource::<FoodText>().0.clone()
}

/// Sends a game event to the world
pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

/// Sends a collision event between the player and a trigger zone
pub fn send_collision_event(world: &mut World, player: Entity, zone: Entity) {
    send_game_event(world, GameEvent::Collision(player, zone));
}

/// Returns every event of the given type written since the last update.
pub fn collect_events<E: Event + Clone>(world: &World) -> Vec<E> {
    world.resource::<Events<E>>().iter_current_update_events().cloned().collect()
}

/// Everything an [`AudioBackend`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playback {
    Played(Sound),
    MusicStopped,
}

/// Backend that records requests instead of playing them.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub log: Rc<RefCell<Vec<Playback>>>,
}

impl AudioBackend for RecordingBackend {
    fn play(&mut self, sound: Sound, _pitch: f32) {
        self.log.borrow_mut().push(Playback::Played(sound));
    }

    fn stop_music(&mut self) {
        self.log.borrow_mut().push(Playback::MusicStopped);
    }
}

/// Creates seeded audio around a recording backend, returning the shared log.
pub fn recording_audio() -> (Audio, Rc<RefCell<Vec<Playback>>>) {
    let backend = RecordingBackend::default();
    let log = Rc::clone(&backend.log);
    (Audio::new(Box::new(backend), Some(42)), log)
}
