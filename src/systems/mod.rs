//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod audio;
pub mod components;
pub mod input;
pub mod movement;
pub mod player;
pub mod state;
pub mod timer;
pub mod zone;

pub use self::animation::*;
pub use self::audio::*;
pub use self::components::*;
pub use self::input::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::state::*;
pub use self::timer::*;
pub use self::zone::*;
