//! Blast propagation over the tile grid.
//!
//! A blast covers its center and four straight arms of `range` tiles. An arm
//! stops at the first tile that blocks explosions; a destructible tile is
//! hit (and included), a solid one is not.

use glam::IVec2;

use crate::grid::Grid;

/// The four arm directions: up, right, down, left
pub const ARM_DIRECTIONS: [IVec2; 4] = [IVec2::NEG_Y, IVec2::X, IVec2::Y, IVec2::NEG_X];

/// Cells reached by a blast centered on `center`
pub fn blast_cells(grid: &Grid, center: (i32, i32), range: u32) -> Vec<(i32, i32)> {
    let origin = IVec2::new(center.0, center.1);
    let mut cells = vec![center];

    for direction in ARM_DIRECTIONS {
        for step in 1..=range as i32 {
            let cell = origin + direction * step;
            if !grid.in_bounds(cell.x, cell.y) {
                break;
            }
            let tile = grid.tile_type(cell.x, cell.y);
            if tile.blocks_explosion() {
                if tile.is_destructible() {
                    cells.push((cell.x, cell.y));
                }
                break;
            }
            cells.push((cell.x, cell.y));
        }
    }

    cells
}
