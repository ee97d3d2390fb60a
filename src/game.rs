//! This module contains the main game logic and state.

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    query::With,
    schedule::{IntoScheduleConfigs, Schedule, SystemSet},
    world::World,
};
use tracing::{debug, error, info, trace};

use crate::{
    audio::Audio,
    config::PlayerConfig,
    constants::{LevelTile, MAIN_SCENE, RAW_LEVEL},
    error::{GameError, GameResult},
    events::GameEvent,
    map::{level::Level, scene::SceneLoader},
    systems::{
        animation::{animation_system, AnimationEvent, AnimationTrigger, Animator},
        audio::{audio_system, AudioEvent, AudioResource, AudioState},
        components::{
            Blocking, DeltaTime, FoodText, GlobalState, GridPosition, LevelEntity, Obstacle, Player, PlayerBundle,
            TriggerZone, WallBundle, ZoneBundle,
        },
        input::{command_system, input_system, Bindings, InputAxes, PendingKeys},
        player::{
            damage_system, player_action_system, player_activated_observer, player_deactivated_observer,
            player_input_system, ControlState, DamageEvent, PlayerState, TurnPhase,
        },
        state::{turn_system, GameManager},
        timer::{scheduler_system, LevelEvent, ScheduledActions},
        zone::{trigger_zone_system, zone_system},
    },
};

/// System set for gameplay systems, in execution order
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Systems that turn device input into commands and axes
    Input,
    /// Systems that act on the player's turn
    Update,
    /// Systems that respond to what happened this turn
    Respond,
    /// Systems that forward triggers to the host's animation and audio sinks
    Present,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the `World` holding the level, the player, and all run-wide resources, and the
/// `Schedule` that advances them. The host calls [`Game::tick`] once per frame.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a game on the built-in level layout.
    pub fn new(config: PlayerConfig, audio: Audio) -> GameResult<Game> {
        Self::with_scenes(SceneLoader::single(&RAW_LEVEL), config, audio)
    }

    /// Creates a game on the given scenes, starting at the main scene.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if the configuration is out of range, or
    /// `GameError::MapParse` if the starting layout is malformed.
    pub fn with_scenes(mut scenes: SceneLoader, config: PlayerConfig, audio: Audio) -> GameResult<Game> {
        info!("Starting game initialization");
        config.validate()?;

        debug!(scene = MAIN_SCENE, "Loading starting scene");
        let level = scenes.load(MAIN_SCENE)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry and observers");
        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, config, level, scenes, audio);
        Self::configure_schedule(&mut schedule);

        debug!("Spawning level entities");
        Self::spawn_level(&mut world);

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
        EventRegistry::register_event::<AnimationEvent>(world);
        EventRegistry::register_event::<DamageEvent>(world);
        EventRegistry::register_event::<LevelEvent>(world);

        world.add_observer(player_activated_observer);
        world.add_observer(player_deactivated_observer);
    }

    fn insert_resources(world: &mut World, config: PlayerConfig, level: Level, scenes: SceneLoader, audio: Audio) {
        world.insert_non_send_resource(AudioResource(audio));

        world.insert_resource(GameManager::new(&config));
        world.insert_resource(config);
        world.insert_resource(level);
        world.insert_resource(scenes);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(AudioState::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(PendingKeys::default());
        world.insert_resource(InputAxes::default());
        world.insert_resource(FoodText::default());
        world.insert_resource(ScheduledActions::default());
        world.insert_resource(DeltaTime::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (input_system, command_system).chain().in_set(GameplaySet::Input),
                (player_input_system, player_action_system)
                    .chain()
                    .in_set(GameplaySet::Update),
                (trigger_zone_system, zone_system, damage_system, turn_system, scheduler_system)
                    .chain()
                    .in_set(GameplaySet::Respond),
                (animation_system, audio_system).chain().in_set(GameplaySet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update,
                    GameplaySet::Respond,
                    GameplaySet::Present,
                )
                    .chain(),
            );
    }

    /// Spawns walls, trigger zones and the player from the current `Level` resource.
    pub fn spawn_level(world: &mut World) {
        let config = world.resource::<PlayerConfig>().clone();
        let level = world.resource::<Level>().clone();

        let mut walls = 0usize;
        let mut zones = 0usize;
        for (cell, tile) in level.iter_tiles() {
            if tile == LevelTile::Wall {
                world.spawn(WallBundle {
                    position: GridPosition(cell),
                    blocking: Blocking,
                    obstacle: Obstacle { hp: config.wall_hp },
                    level_entity: LevelEntity,
                });
                walls += 1;
            } else if let Some(zone) = TriggerZone::from_tile(tile) {
                world.spawn(ZoneBundle {
                    position: GridPosition(cell),
                    zone,
                    level_entity: LevelEntity,
                });
                zones += 1;
            }
        }

        let player = world
            .spawn(PlayerBundle {
                player: Player,
                position: GridPosition(level.player_start),
                state: PlayerState::from_config(&config),
                turn: TurnPhase::WaitingForTurn,
                control: ControlState::InputEnabled,
                animator: Animator::default(),
                level_entity: LevelEntity,
            })
            .id();

        debug!(?player, start = ?level.player_start, walls, zones, "Level spawned");
    }

    /// Despawns every entity belonging to the current level, deactivating the player.
    pub fn despawn_level(world: &mut World) {
        let entities: Vec<Entity> = world
            .query_filtered::<Entity, With<LevelEntity>>()
            .iter(world)
            .collect();
        trace!(count = entities.len(), "Despawning level entities");
        for entity in entities {
            world.despawn(entity);
        }
    }

    /// Reloads the active scene and advances to the next level.
    ///
    /// The player is despawned (storing its food) and spawned again from the stored total.
    pub fn reload_level(&mut self) -> GameResult<()> {
        let (level, scene) = {
            let mut scenes = self.world.resource_mut::<SceneLoader>();
            (scenes.reload()?, scenes.active_index())
        };

        Self::despawn_level(&mut self.world);
        self.world.insert_resource(level);
        self.world.resource_mut::<GameManager>().next_level();
        Self::spawn_level(&mut self.world);

        let manager = self.world.resource::<GameManager>();
        info!(level = manager.level, scene, food = manager.stored_food, "Level loaded");
        Ok(())
    }

    /// Queues a key press for the next tick.
    pub fn press(&mut self, key: char) {
        self.world.resource_mut::<PendingKeys>().0.push_back(key);
    }

    /// Sets the raw axis values for the next tick.
    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        *self.world.resource_mut::<InputAxes>() = InputAxes { horizontal, vertical };
    }

    /// Damages the player on behalf of a hostile entity. Applied during the next tick.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidState` if no player is currently spawned.
    pub fn damage_player(&mut self, loss: i32) -> GameResult<()> {
        let target = self
            .player()
            .ok_or_else(|| GameError::InvalidState("No player to damage".to_string()))?;
        self.world
            .resource_mut::<Events<DamageEvent>>()
            .send(DamageEvent { target, loss });
        Ok(())
    }

    pub fn player(&mut self) -> Option<Entity> {
        self.world
            .query_filtered::<Entity, With<Player>>()
            .iter(&self.world)
            .next()
    }

    pub fn player_state(&mut self) -> Option<PlayerState> {
        self.world
            .query_filtered::<&PlayerState, With<Player>>()
            .iter(&self.world)
            .next()
            .cloned()
    }

    /// The animation trigger most recently fired on the player, for the host's animator.
    pub fn player_animation(&mut self) -> Option<AnimationTrigger> {
        self.world
            .query_filtered::<&Animator, With<Player>>()
            .iter(&self.world)
            .next()
            .and_then(Animator::last_trigger)
    }

    pub fn food_text(&self) -> &str {
        &self.world.resource::<FoodText>().0
    }

    /// Whether delayed actions (such as a level restart) are still waiting to fire.
    pub fn has_pending_actions(&self) -> bool {
        !self.world.resource::<ScheduledActions>().is_empty()
    }

    pub fn manager(&self) -> &GameManager {
        self.world.resource::<GameManager>()
    }

    /// Ticks the game state.
    ///
    /// Runs the schedule once, handles level reload requests, and clears this tick's input.
    ///
    /// # Returns
    ///
    /// `true` if the game should stop (exit requested or the player starved), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });
        self.schedule.run(&mut self.world);

        let errors: Vec<GameError> = self.world.resource_mut::<Events<GameError>>().drain().collect();
        for error in errors {
            error!(%error, "Gameplay system reported an error");
        }

        let restarts = self.world.resource_mut::<Events<LevelEvent>>().drain().count();
        if restarts > 0 {
            if let Err(error) = self.reload_level() {
                error!(%error, "Failed to reload level");
            }
        }

        *self.world.resource_mut::<InputAxes>() = InputAxes::default();
        Self::update_events(&mut self.world);

        self.world.resource::<GlobalState>().exit || self.world.resource::<GameManager>().is_over()
    }

    fn update_events(world: &mut World) {
        world.resource_mut::<Events<GameEvent>>().update();
        world.resource_mut::<Events<AudioEvent>>().update();
        world.resource_mut::<Events<AnimationEvent>>().update();
        world.resource_mut::<Events<DamageEvent>>().update();
    }
}
