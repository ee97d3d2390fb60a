//! Turn-based dungeon crawl player controller crate.

pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod systems;
