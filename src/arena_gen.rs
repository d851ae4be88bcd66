//! Random arena generation.
//!
//! Classic layout: a solid border, solid pillars on every even/even cell,
//! and destructible blocks scattered over the remaining cells. The corner
//! the player starts in is always left open. The exit door and power-ups are
//! buried under distinct blocks; enemies start away from the player.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::PowerUpType;
use crate::constants::*;
use crate::grid::Grid;
use crate::level_data::{LevelError, LevelLayout, PowerUpPlacement};
use crate::tile::TileType;

const PLAYER_START: (i32, i32) = (1, 1);
const MIN_SIDE: usize = 5;

#[derive(Debug, Clone)]
pub struct ArenaOptions {
    pub width: usize,
    pub height: usize,
    /// Chance (0..=1) that a free cell gets a destructible block
    pub density: f64,
    pub enemies: usize,
    pub power_ups: Vec<PowerUpType>,
}

impl Default for ArenaOptions {
    fn default() -> Self {
        Self {
            width: ARENA_DEFAULT_WIDTH,
            height: ARENA_DEFAULT_HEIGHT,
            density: ARENA_DESTRUCTIBLE_DENSITY,
            enemies: ARENA_DEFAULT_ENEMIES,
            power_ups: PowerUpType::ALL.to_vec(),
        }
    }
}

/// Cells that must stay empty so the player can step out of the blast of a first bomb
fn is_start_area(x: i32, y: i32) -> bool {
    let (sx, sy) = PLAYER_START;
    (x == sx && y == sy) || (x == sx + 1 && y == sy) || (x == sx && y == sy + 1)
}

fn build_grid(width: usize, height: usize, density: f64, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(width, height);
    let (w, h) = (width as i32, height as i32);

    for y in 0..h {
        for x in 0..w {
            let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let pillar = x % 2 == 0 && y % 2 == 0;
            let tile = if border || pillar {
                TileType::Solid
            } else if !is_start_area(x, y) && rng.gen_bool(density) {
                TileType::Destructible
            } else {
                TileType::Empty
            };
            grid.set(x, y, tile);
        }
    }
    grid
}

/// Generate a random arena level
pub fn generate(options: &ArenaOptions, rng: &mut impl Rng) -> Result<LevelLayout, LevelError> {
    if options.width < MIN_SIDE || options.height < MIN_SIDE {
        return Err(LevelError::NoSpace {
            needed: MIN_SIDE * MIN_SIDE,
            available: options.width * options.height,
        });
    }

    let grid = build_grid(options.width, options.height, options.density.clamp(0.0, 1.0), rng);

    // Exit first, then one block per power-up
    let mut blocks: Vec<(i32, i32)> = grid
        .cells()
        .filter(|(_, _, t)| t.is_destructible())
        .map(|(x, y, _)| (x, y))
        .collect();
    let needed = options.power_ups.len() + 1;
    if blocks.len() < needed {
        return Err(LevelError::NoSpace {
            needed,
            available: blocks.len(),
        });
    }
    blocks.shuffle(rng);
    let exit = blocks[0];
    let power_ups = options
        .power_ups
        .iter()
        .zip(&blocks[1..])
        .map(|(&kind, &(x, y))| PowerUpPlacement { x, y, kind })
        .collect();

    let (sx, sy) = PLAYER_START;
    let open: Vec<(i32, i32)> = grid
        .cells()
        .filter(|(x, y, t)| {
            t.is_traversable() && (x - sx).abs() + (y - sy).abs() >= ARENA_ENEMY_SAFE_DISTANCE
        })
        .map(|(x, y, _)| (x, y))
        .collect();
    if open.len() < options.enemies {
        return Err(LevelError::NoSpace {
            needed: options.enemies,
            available: open.len(),
        });
    }
    let enemies: Vec<(i32, i32)> = open.choose_multiple(rng, options.enemies).copied().collect();

    tracing::debug!(
        width = options.width,
        height = options.height,
        blocks = blocks.len(),
        enemies = enemies.len(),
        "arena generated"
    );

    Ok(LevelLayout {
        name: format!("Arena {}x{}", options.width, options.height),
        rows: LevelLayout::rows_from_grid(&grid),
        player_start: PLAYER_START,
        exit,
        power_ups,
        enemies,
    })
}
