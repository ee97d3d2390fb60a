use bevy_ecs::resource::Resource;

use crate::error::{GameError, GameResult};
use crate::map::level::Level;

/// The level layouts available to the game, addressed by index.
#[derive(Resource, Debug, Clone)]
pub struct SceneLoader {
    scenes: Vec<Vec<String>>,
    active: usize,
}

impl SceneLoader {
    pub fn new(scenes: Vec<Vec<String>>) -> Self {
        Self { scenes, active: 0 }
    }

    /// A loader holding a single layout.
    pub fn single(rows: &[&str]) -> Self {
        Self::new(vec![rows.iter().map(|row| row.to_string()).collect()])
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Parses the scene at `index` and makes it the active one.
    pub fn load(&mut self, index: usize) -> GameResult<Level> {
        let rows = self
            .scenes
            .get(index)
            .ok_or_else(|| GameError::InvalidState(format!("No scene with index {index}")))?;
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let level = Level::new(&rows)?;
        self.active = index;
        Ok(level)
    }

    /// Parses the active scene again.
    pub fn reload(&mut self) -> GameResult<Level> {
        self.load(self.active)
    }
}
