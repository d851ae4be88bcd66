//! Player starting values.

/// Bombs the player may have live at once at the start of a game
pub const PLAYER_STARTING_MAX_BOMBS: u32 = 1;
/// Explosion range (tiles per arm) at the start of a game
pub const PLAYER_STARTING_RANGE: u32 = 1;
/// Movement speed multiplier at the start of a game
pub const PLAYER_STARTING_SPEED: f32 = 1.0;

/// Time between two steps at speed 1.0
pub const BASE_MOVE_INTERVAL_MS: u32 = 200;
/// Speeds below this are clamped when computing the step interval
pub const MIN_MOVE_SPEED: f32 = 0.1;
