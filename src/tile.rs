use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Empty,
    Solid,
    Destructible,
}

impl TileType {
    pub const ALL: [TileType; 3] = [TileType::Empty, TileType::Solid, TileType::Destructible];

    pub fn is_traversable(&self) -> bool {
        matches!(self, TileType::Empty)
    }

    pub fn is_destructible(&self) -> bool {
        matches!(self, TileType::Destructible)
    }

    pub fn blocks_explosion(&self) -> bool {
        matches!(self, TileType::Solid | TileType::Destructible)
    }

    /// Layout glyph used in level files
    pub fn glyph(&self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Solid => '#',
            TileType::Destructible => 'x',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(TileType::Empty),
            '#' => Some(TileType::Solid),
            'x' | 'X' => Some(TileType::Destructible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub tile_type: TileType,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self { tile_type }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_truth_table() {
        assert!(TileType::Empty.is_traversable());
        assert!(!TileType::Empty.is_destructible());
        assert!(!TileType::Empty.blocks_explosion());

        assert!(!TileType::Solid.is_traversable());
        assert!(!TileType::Solid.is_destructible());
        assert!(TileType::Solid.blocks_explosion());

        assert!(!TileType::Destructible.is_traversable());
        assert!(TileType::Destructible.is_destructible());
        assert!(TileType::Destructible.blocks_explosion());
    }

    #[test]
    fn test_blocks_explosion_is_inverse_of_traversable() {
        for tile in TileType::ALL {
            assert_eq!(tile.blocks_explosion(), !tile.is_traversable());
            // Never both walkable and breakable
            assert!(!(tile.is_traversable() && tile.is_destructible()));
        }
    }

    #[test]
    fn test_glyphs_round_trip() {
        for tile in TileType::ALL {
            assert_eq!(TileType::from_glyph(tile.glyph()), Some(tile));
        }
        assert_eq!(TileType::from_glyph('?'), None);
    }
}
