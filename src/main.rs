use std::env;

use scavenger::{app::App, config, constants::LOOP_TIME, logging};
use tracing::info;

/// Keys played when no script is given on the command line.
const DEMO_SCRIPT: &str = "ddddddd sssssss";

/// The main entry point of the application.
///
/// Usage: `scavenger [--realtime] [KEYS]`, where `KEYS` are movement keys (`wasd` or `hjkl`).
pub fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let realtime = args.iter().any(|arg| arg == "--realtime" || arg == "-r");
    let script = args
        .iter()
        .find(|arg| !arg.starts_with('-'))
        .map(String::as_str)
        .unwrap_or(DEMO_SCRIPT);

    let config = config::load_config()?;
    let mut app = App::new(config, script, realtime)?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    let animation = app.game.player_animation();
    let manager = app.game.manager();
    info!(
        level = manager.level,
        last_animation = ?animation,
        food = manager.stored_food,
        game_over = manager.is_over(),
        label = app.game.food_text(),
        "Game loop finished"
    );
    Ok(())
}
