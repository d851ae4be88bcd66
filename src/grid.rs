use crate::tile::{Tile, TileType};

/// Rectangular tile storage for one level, row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid filled with empty tiles
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tiles }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.tiles[y as usize * self.width + x as usize])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&mut self.tiles[y as usize * self.width + x as usize])
    }

    /// Tile type at a cell, treating anything off-grid as solid
    pub fn tile_type(&self, x: i32, y: i32) -> TileType {
        self.get(x, y).map(|t| t.tile_type).unwrap_or(TileType::Solid)
    }

    pub fn set(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.tile_type = tile_type;
        }
    }

    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.tile_type(x, y).is_traversable()
    }

    /// Turn a destructible tile into an empty one.
    /// Returns false (and changes nothing) for any other tile.
    pub fn destroy(&mut self, x: i32, y: i32) -> bool {
        match self.get_mut(x, y) {
            Some(tile) if tile.tile_type.is_destructible() => {
                tile.tile_type = TileType::Empty;
                true
            }
            _ => false,
        }
    }

    /// Iterate over all cells with their coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, TileType)> + '_ {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (x, y, tile.tile_type)
        })
    }

    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles.iter().filter(|t| t.tile_type == tile_type).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = Grid::new(5, 4);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 4).is_none());
        assert!(grid.get(4, 3).is_some());
    }

    #[test]
    fn test_off_grid_reads_as_solid() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.tile_type(-1, 1), TileType::Solid);
        assert!(!grid.is_traversable(3, 0));
    }

    #[test]
    fn test_destroy_only_affects_destructible() {
        let mut grid = Grid::new(3, 1);
        grid.set(0, 0, TileType::Solid);
        grid.set(1, 0, TileType::Destructible);

        assert!(!grid.destroy(0, 0));
        assert_eq!(grid.tile_type(0, 0), TileType::Solid);

        assert!(grid.destroy(1, 0));
        assert_eq!(grid.tile_type(1, 0), TileType::Empty);

        // Second destruction of the same cell is a no-op
        assert!(!grid.destroy(1, 0));
        assert!(!grid.destroy(2, 0));
    }

    #[test]
    fn test_cells_are_row_major() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, TileType::Solid);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[3], (1, 1, TileType::Solid));
        assert_eq!(grid.count(TileType::Solid), 1);
        assert_eq!(grid.count(TileType::Empty), 3);
    }
}
