//! This module defines the level layout, grid directions, and scene loading.
pub mod direction;
pub mod level;
pub mod parser;
pub mod scene;
