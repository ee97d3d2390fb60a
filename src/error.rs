//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use bevy_ecs::{entity::Entity, event::Event};

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It doubles as an ECS event so systems can report failures without
/// aborting the rest of the schedule.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Level parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Movement was blocked by {0:?}, which is not a damageable obstacle")]
    UnexpectedCollisionTarget(Entity),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<figment::Error> for GameError {
    fn from(err: figment::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

/// Error type for level parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in level: {0:?}")]
    UnknownCharacter(char),
    #[error("Level must have exactly one player start, found {0}")]
    InvalidStartCount(usize),
    #[error("Level parsing failed: {0}")]
    ParseFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
