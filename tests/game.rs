use glam::IVec2;
use pretty_assertions::assert_eq;
use scavenger::{
    audio::Audio,
    config::PlayerConfig,
    constants::EXIT_MESSAGE,
    error::{GameError, ParseError},
    game::Game,
    map::scene::SceneLoader,
    systems::{AnimationTrigger, ControlState, GridPosition, Obstacle},
};
use speculoos::prelude::*;

/// A corridor with the exit two steps to the right of the start.
const EXIT_CORRIDOR: [&str; 3] = ["######", "#@.E.#", "######"];

/// Long enough for the turn to come back within the same tick.
const TURN_DT: f32 = 0.2;

fn corridor_game(config: PlayerConfig) -> Game {
    Game::with_scenes(SceneLoader::single(&EXIT_CORRIDOR), config, Audio::disabled()).expect("corridor should load")
}

fn step(game: &mut Game, key: char) -> bool {
    game.press(key);
    game.tick(TURN_DT)
}

fn player_cell(game: &mut Game) -> IVec2 {
    let player = game.player().expect("player should be spawned");
    game.world.get::<GridPosition>(player).unwrap().0
}

fn player_food(game: &mut Game) -> i32 {
    game.player_state().expect("player should be spawned").food_points
}

#[test]
fn test_new_game_spawns_player() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();

    assert_eq!(player_cell(&mut game), IVec2::new(1, 1));
    assert_that(&player_food(&mut game)).is_equal_to(100);
    assert_eq!(game.food_text(), "Food: 100");
    assert_that(&game.manager().level).is_equal_to(1);
    assert_that(&game.manager().players_turn).is_true();
    assert_that(&game.has_pending_actions()).is_false();
}

#[test]
fn test_each_step_costs_one_food() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();

    assert_that(&step(&mut game, 's')).is_false();
    assert_that(&step(&mut game, 'j')).is_false();

    assert_eq!(player_cell(&mut game), IVec2::new(1, 3));
    assert_that(&player_food(&mut game)).is_equal_to(98);
    assert_eq!(game.food_text(), "Food: 98");
}

#[test]
fn test_input_waits_for_turn_delay() {
    let config = PlayerConfig {
        turn_delay_secs: 1.0,
        ..PlayerConfig::default()
    };
    let mut game = corridor_game(config);

    game.press('d');
    game.tick(0.1);
    assert_that(&game.manager().players_turn).is_false();

    // Dropped: the turn has not come back yet
    game.press('d');
    game.tick(0.1);
    assert_eq!(player_cell(&mut game), IVec2::new(2, 1));
    assert_that(&player_food(&mut game)).is_equal_to(99);

    game.tick(1.0);
    assert_that(&game.manager().players_turn).is_true();
}

#[test]
fn test_attacking_wall_until_destroyed() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();

    step(&mut game, 'd');
    step(&mut game, 'd');
    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));

    // Inner wall at (4, 1) takes three hits
    for expected_hp in [2, 1] {
        step(&mut game, 'd');
        assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
        let hp: Vec<i32> = game
            .world
            .query::<(&GridPosition, &Obstacle)>()
            .iter(&game.world)
            .filter(|(cell, _)| cell.0 == IVec2::new(4, 1))
            .map(|(_, obstacle)| obstacle.hp)
            .collect();
        assert_eq!(hp, vec![expected_hp]);
    }

    step(&mut game, 'd');
    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
    step(&mut game, 'd');
    assert_eq!(player_cell(&mut game), IVec2::new(4, 1));
    assert_that(&player_food(&mut game)).is_equal_to(94);
}

#[test]
fn test_soda_pickup_during_play() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();

    for key in ['s', 's', 'd', 'd'] {
        step(&mut game, key);
    }

    assert_eq!(player_cell(&mut game), IVec2::new(3, 3));
    assert_that(&player_food(&mut game)).is_equal_to(116);
    assert_eq!(game.food_text(), "+20 Food: 116");

    // Walking off and back onto a consumed pickup does nothing
    step(&mut game, 'a');
    step(&mut game, 'd');
    assert_that(&player_food(&mut game)).is_equal_to(114);
}

#[test]
fn test_exit_restarts_level_and_keeps_food() {
    let config = PlayerConfig {
        starting_food: 50,
        restart_delay_secs: 0.5,
        turn_delay_secs: 0.0,
        ..PlayerConfig::default()
    };
    let mut game = corridor_game(config);
    let first_player = game.player().unwrap();

    game.press('d');
    game.tick(0.01);
    game.press('d');
    game.tick(0.01);

    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
    assert_eq!(game.food_text(), EXIT_MESSAGE);
    assert_that(&game.has_pending_actions()).is_true();
    assert_eq!(
        *game.world.get::<ControlState>(first_player).unwrap(),
        ControlState::InputLocked
    );

    // Locked: further input is dropped
    game.press('d');
    game.tick(0.01);
    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
    assert_that(&player_food(&mut game)).is_equal_to(48);

    assert_that(&game.tick(0.5)).is_false();

    assert_that(&game.manager().level).is_equal_to(2);
    assert_that(&game.has_pending_actions()).is_false();
    let second_player = game.player().unwrap();
    assert_ne!(first_player, second_player);
    assert_eq!(player_cell(&mut game), IVec2::new(1, 1));
    assert_that(&player_food(&mut game)).is_equal_to(48);
    assert_eq!(game.food_text(), "Food: 48");
    assert_eq!(
        *game.world.get::<ControlState>(second_player).unwrap(),
        ControlState::InputEnabled
    );
}

#[test]
fn test_starving_ends_the_run() {
    let config = PlayerConfig {
        starting_food: 2,
        ..PlayerConfig::default()
    };
    let mut game = corridor_game(config);

    assert_that(&step(&mut game, 'd')).is_false();
    assert_that(&step(&mut game, 'a')).is_true();
    assert_that(&game.manager().is_over()).is_true();
    assert_that(&game.manager().players_turn).is_false();

    // No further turns are taken
    step(&mut game, 'd');
    assert_that(&player_food(&mut game)).is_equal_to(0);
}

#[test]
fn test_damage_from_hostiles() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();

    game.damage_player(5).unwrap();
    game.tick(TURN_DT);

    assert_that(&player_food(&mut game)).is_equal_to(95);
    assert_eq!(game.food_text(), "-5 Food: 95");
}

#[test]
fn test_quit_key_stops_the_game() {
    let mut game = Game::new(PlayerConfig::default(), Audio::disabled()).unwrap();
    assert_that(&step(&mut game, 'q')).is_true();
    assert_that(&game.manager().is_over()).is_false();
}

#[test]
fn test_bad_layout_is_rejected() {
    let result = Game::with_scenes(SceneLoader::single(&["###", "#.#", "###"]), PlayerConfig::default(), Audio::disabled());
    assert!(matches!(
        result,
        Err(GameError::MapParse(ParseError::InvalidStartCount(0)))
    ));
}

#[test]
fn test_raw_axes_drive_one_step() {
    let mut game = corridor_game(PlayerConfig::default());

    game.set_axes(1.0, 1.0);
    game.tick(TURN_DT);
    assert_eq!(player_cell(&mut game), IVec2::new(2, 1));

    // Axes are cleared after each tick
    game.tick(TURN_DT);
    assert_eq!(player_cell(&mut game), IVec2::new(2, 1));
    assert_that(&player_food(&mut game)).is_equal_to(99);
}

#[test]
fn test_starving_on_the_exit_cancels_the_restart() {
    let config = PlayerConfig {
        starting_food: 10,
        restart_delay_secs: 0.5,
        turn_delay_secs: 0.0,
        ..PlayerConfig::default()
    };
    let mut game = corridor_game(config);

    game.press('d');
    game.tick(0.01);
    game.press('d');
    game.tick(0.01);
    assert_that(&game.has_pending_actions()).is_true();

    game.damage_player(50).unwrap();
    assert_that(&game.tick(0.01)).is_true();
    assert_that(&game.has_pending_actions()).is_false();

    game.tick(1.0);
    assert_that(&game.manager().level).is_equal_to(1);
    assert_that(&game.manager().is_over()).is_true();
    assert_that(&game.manager().players_turn).is_false();
    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
    assert_that(&player_food(&mut game)).is_equal_to(-42);
    assert_eq!(game.food_text(), "-50 Food: -42");
}

#[test]
fn test_out_of_range_frame_times_do_not_panic() {
    let mut game = corridor_game(PlayerConfig::default());

    game.press('d');
    assert_that(&game.tick(f32::INFINITY)).is_false();
    assert_that(&game.manager().players_turn).is_true();

    game.press('d');
    game.tick(f32::NAN);
    game.tick(-1.0);
    assert_that(&game.manager().players_turn).is_false();
    assert_eq!(player_cell(&mut game), IVec2::new(3, 1));
}

#[test]
fn test_out_of_range_config_is_rejected() {
    let config = PlayerConfig {
        restart_delay_secs: 1e30,
        ..PlayerConfig::default()
    };
    let result = Game::with_scenes(SceneLoader::single(&EXIT_CORRIDOR), config, Audio::disabled());
    assert!(matches!(result, Err(GameError::Config(_))));
}

#[test]
fn test_player_animation_follows_moves() {
    let mut game = corridor_game(PlayerConfig::default());
    assert_eq!(game.player_animation(), None);

    step(&mut game, 'd');
    assert_eq!(game.player_animation(), Some(AnimationTrigger::PlayerRight));
}
