//! Level parsing functionality for converting raw layouts into structured data.

use glam::IVec2;

use crate::constants::LevelTile;
use crate::error::ParseError;

/// Structured representation of a parsed ASCII level layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLevel {
    pub width: usize,
    pub height: usize,
    /// Tiles in row-major order
    pub tiles: Vec<LevelTile>,
    /// Starting cell of the player (marked by '@' in the layout)
    pub player_start: IVec2,
}

/// Parser for converting raw level layouts into structured level data.
pub struct LevelParser;

impl LevelParser {
    /// Converts an ASCII character from the layout into its tile type.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownCharacter` for any character outside the level vocabulary.
    pub fn parse_character(c: char) -> Result<LevelTile, ParseError> {
        match c {
            '.' => Ok(LevelTile::Floor),
            '#' => Ok(LevelTile::OuterWall),
            'W' => Ok(LevelTile::Wall),
            'F' => Ok(LevelTile::Food),
            'S' => Ok(LevelTile::Soda),
            'E' => Ok(LevelTile::Exit),
            '@' => Ok(LevelTile::PlayerStart),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw level layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, rows differ in width, a character is
    /// unknown, or the layout does not contain exactly one player start.
    pub fn parse_level(rows: &[&str]) -> Result<ParsedLevel, ParseError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ParseError::ParseFailed("Level layout is empty".to_string()));
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut starts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(ParseError::ParseFailed(format!(
                    "Invalid level width at line {}: expected {}, got {}",
                    y, width, row_width
                )));
            }

            for (x, character) in row.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                if tile == LevelTile::PlayerStart {
                    starts.push(IVec2::new(x as i32, y as i32));
                }
                tiles.push(tile);
            }
        }

        let player_start = match starts.as_slice() {
            [start] => *start,
            _ => return Err(ParseError::InvalidStartCount(starts.len())),
        };

        Ok(ParsedLevel {
            width,
            height,
            tiles,
            player_start,
        })
    }
}
