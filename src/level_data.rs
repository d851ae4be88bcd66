//! Level layouts: the serialized form of a level and its validation.
//!
//! Rows use one glyph per tile: `#` solid, `x` destructible, `.` empty.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::PowerUpType;
use crate::grid::Grid;
use crate::tile::{Tile, TileType};

/// Errors that can occur when parsing, validating or generating a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Level parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Level layout has no rows")]
    EmptyLayout,

    #[error("Row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown tile glyph '{glyph}' at ({x}, {y})")]
    UnknownTile { glyph: char, x: usize, y: usize },

    #[error("{what} at ({x}, {y}) is outside the grid")]
    OutOfBounds { what: &'static str, x: i32, y: i32 },

    #[error("{what} at ({x}, {y}) must be hidden in a destructible block")]
    NotDestructible { what: &'static str, x: i32, y: i32 },

    #[error("{what} at ({x}, {y}) must stand on an empty tile")]
    NotTraversable { what: &'static str, x: i32, y: i32 },

    #[error("More than one entity placed at ({x}, {y})")]
    CellOccupied { x: i32, y: i32 },

    #[error("Not enough room: needed {needed} cells, found {available}")]
    NoSpace { needed: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpPlacement {
    pub x: i32,
    pub y: i32,
    pub kind: PowerUpType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    pub rows: Vec<String>,
    pub player_start: (i32, i32),
    pub exit: (i32, i32),
    #[serde(default)]
    pub power_ups: Vec<PowerUpPlacement>,
    #[serde(default)]
    pub enemies: Vec<(i32, i32)>,
}

impl LevelLayout {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the tile grid from the row strings
    pub fn parse_grid(&self) -> Result<Grid, LevelError> {
        let height = self.rows.len();
        let width = self.rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in self.rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let tile_type =
                    TileType::from_glyph(glyph).ok_or(LevelError::UnknownTile { glyph, x, y })?;
                tiles.push(Tile::new(tile_type));
            }
        }

        Ok(Grid::from_tiles(width, height, tiles))
    }

    /// Parse the grid and check every placement against it
    pub fn validate(&self) -> Result<Grid, LevelError> {
        let grid = self.parse_grid()?;
        let mut occupied = HashSet::new();

        let mut check_hidden = |what: &'static str, (x, y): (i32, i32)| {
            if !grid.in_bounds(x, y) {
                return Err(LevelError::OutOfBounds { what, x, y });
            }
            if !grid.tile_type(x, y).is_destructible() {
                return Err(LevelError::NotDestructible { what, x, y });
            }
            if !occupied.insert((x, y)) {
                return Err(LevelError::CellOccupied { x, y });
            }
            Ok(())
        };
        check_hidden("Exit door", self.exit)?;
        for placement in &self.power_ups {
            check_hidden("Power-up", (placement.x, placement.y))?;
        }

        let check_open = |what: &'static str, (x, y): (i32, i32)| {
            if !grid.in_bounds(x, y) {
                return Err(LevelError::OutOfBounds { what, x, y });
            }
            if !grid.is_traversable(x, y) {
                return Err(LevelError::NotTraversable { what, x, y });
            }
            Ok(())
        };
        check_open("Player start", self.player_start)?;
        for &enemy in &self.enemies {
            check_open("Enemy", enemy)?;
        }

        Ok(grid)
    }

    /// Serialize a grid back into row strings
    pub fn rows_from_grid(grid: &Grid) -> Vec<String> {
        (0..grid.height as i32)
            .map(|y| {
                (0..grid.width as i32)
                    .map(|x| grid.tile_type(x, y).glyph())
                    .collect()
            })
            .collect()
    }
}
