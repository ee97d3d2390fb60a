use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::audio::{Audio, NullBackend};
use crate::config::PlayerConfig;
use crate::constants::LOOP_TIME;
use crate::error::GameResult;
use crate::formatter;
use crate::game::Game;

/// Headless driver that feeds a scripted key sequence into the game, one key per player turn.
pub struct App {
    pub game: Game,
    script: VecDeque<char>,
    realtime: bool,
    last_tick: Instant,
}

impl App {
    /// Sets up the game and the key script.
    ///
    /// When `realtime` is set, frames are paced to `LOOP_TIME` and timed by the wall clock;
    /// otherwise every frame advances exactly `LOOP_TIME` without sleeping.
    pub fn new(config: PlayerConfig, script: &str, realtime: bool) -> GameResult<Self> {
        let audio = Audio::new(Box::new(NullBackend), config.audio_seed);
        let game = Game::new(config, audio)?;
        let script: VecDeque<char> = script.chars().filter(|c| !c.is_whitespace()).collect();

        info!(keys = script.len(), realtime, "Application initialization completed successfully");
        Ok(App {
            game,
            script,
            realtime,
            last_tick: Instant::now(),
        })
    }

    /// Executes a single frame of the game loop.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` once it ended or the script ran out.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let dt = if self.realtime {
            self.last_tick.elapsed().as_secs_f32()
        } else {
            LOOP_TIME.as_secs_f32()
        };
        self.last_tick = start;

        if self.game.manager().players_turn {
            match self.script.pop_front() {
                Some(key) => {
                    debug!(?key, "Pressing scripted key");
                    self.game.press(key);
                }
                None if !self.game.has_pending_actions() => return false,
                None => {}
            }
        }

        formatter::increment_tick();

        if self.game.tick(dt) {
            return false;
        }

        if self.realtime {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }
}
