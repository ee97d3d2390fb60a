use std::time::Duration;

use bevy_ecs::resource::Resource;
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::systems::components::saturating_duration;

/// Longest accepted delay, in seconds.
pub const MAX_DELAY_SECS: f32 = 3600.0;

/// Prefix for environment variables that override gameplay tuning, e.g. `SCAVENGER_FOOD_PICKUP=15`.
pub const ENV_PREFIX: &str = "SCAVENGER_";

/// Gameplay tuning for the player and the level it plays in.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Food the player starts a fresh run with
    pub starting_food: i32,
    /// Damage dealt to a destructible wall per attack
    pub wall_damage: i32,
    /// Hit points of a freshly spawned destructible wall
    pub wall_hp: i32,
    /// Food restored by a food pickup
    pub food_pickup: i32,
    /// Food restored by a soda pickup
    pub soda_pickup: i32,
    /// Seconds between touching the exit and the level reloading
    pub restart_delay_secs: f32,
    /// Seconds before the turn is handed back to the player
    pub turn_delay_secs: f32,
    /// Seed for sound variant selection; random when unset
    pub audio_seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_food: 100,
            wall_damage: 1,
            wall_hp: 3,
            food_pickup: 10,
            soda_pickup: 20,
            restart_delay_secs: 1.0,
            turn_delay_secs: 0.1,
            audio_seed: None,
        }
    }
}

impl PlayerConfig {
    pub fn restart_delay(&self) -> Duration {
        saturating_duration(self.restart_delay_secs)
    }

    pub fn turn_delay(&self) -> Duration {
        saturating_duration(self.turn_delay_secs)
    }

    /// Rejects delays that are not finite or exceed [`MAX_DELAY_SECS`].
    ///
    /// Negative delays are accepted and behave as zero.
    pub fn validate(&self) -> GameResult<()> {
        for (name, seconds) in [
            ("restart_delay_secs", self.restart_delay_secs),
            ("turn_delay_secs", self.turn_delay_secs),
        ] {
            if !seconds.is_finite() || seconds > MAX_DELAY_SECS {
                return Err(GameError::Config(format!(
                    "{name} must be a finite number of seconds up to {MAX_DELAY_SECS}, got {seconds}"
                )));
            }
        }
        Ok(())
    }
}

/// Loads the configuration, layering `SCAVENGER_*` environment variables over the defaults.
pub fn load_config() -> GameResult<PlayerConfig> {
    let config = Figment::new()
        .merge(Serialized::defaults(PlayerConfig::default()))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract::<PlayerConfig>()?;
    config.validate()?;
    Ok(config)
}
