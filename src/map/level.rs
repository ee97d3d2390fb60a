use bevy_ecs::resource::Resource;
use glam::IVec2;

use crate::constants::LevelTile;
use crate::error::ParseError;
use crate::map::parser::LevelParser;

/// The static layout of the current level.
///
/// Dynamic occupants (walls, pickups, the exit) are spawned as entities from this
/// layout; the grid itself only answers whether a cell lies inside the playable area.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    width: usize,
    height: usize,
    tiles: Vec<LevelTile>,
    pub player_start: IVec2,
}

impl Level {
    /// Builds a level from its ASCII layout.
    pub fn new(rows: &[&str]) -> Result<Level, ParseError> {
        let parsed = LevelParser::parse_level(rows)?;
        Ok(Level {
            width: parsed.width,
            height: parsed.height,
            tiles: parsed.tiles,
            player_start: parsed.player_start,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Returns the tile at the given cell, or `None` outside the level.
    pub fn tile_at(&self, cell: IVec2) -> Option<LevelTile> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.tiles.get(cell.y as usize * self.width + cell.x as usize).copied()
    }

    /// Whether the cell can never be entered: outside the level or an outer wall.
    pub fn is_solid(&self, cell: IVec2) -> bool {
        !matches!(self.tile_at(cell), Some(tile) if tile != LevelTile::OuterWall)
    }

    /// Iterates every cell along with its tile, row by row.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (IVec2, LevelTile)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let cell = IVec2::new((i % self.width) as i32, (i / self.width) as i32);
            (cell, *tile)
        })
    }
}
