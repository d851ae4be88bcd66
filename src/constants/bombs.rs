//! Bomb timing.

/// Time from placement to detonation in milliseconds
pub const BOMB_FUSE_MS: u32 = 3_000;
