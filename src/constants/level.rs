//! Level flow and generation parameters.

/// Time the "level starting" banner is shown before play begins
pub const LEVEL_START_DELAY_MS: u32 = 2_000;

/// Default generated arena width (odd, so pillars line up with the border)
pub const ARENA_DEFAULT_WIDTH: usize = 15;
/// Default generated arena height
pub const ARENA_DEFAULT_HEIGHT: usize = 13;
/// Chance that a free cell is filled with a destructible block
pub const ARENA_DESTRUCTIBLE_DENSITY: f64 = 0.6;
/// Enemies placed in a generated arena
pub const ARENA_DEFAULT_ENEMIES: usize = 3;
/// Enemies never spawn within this Manhattan distance of the player start
pub const ARENA_ENEMY_SAFE_DISTANCE: i32 = 4;
