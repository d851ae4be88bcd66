//! Power-up effect parameters.

/// Duration of the Shield power-up in milliseconds
pub const SHIELD_DURATION_MS: u32 = 10_000;
/// Duration of the Speed Burst power-up in milliseconds
pub const SPEED_BURST_DURATION_MS: u32 = 5_000;
/// Speed multiplier while Speed Burst is active
pub const SPEED_BURST_MULTIPLIER: f32 = 2.0;
/// Movement speed added by each Speed Up pickup
pub const SPEED_UP_INCREMENT: f32 = 0.5;
/// Number of bombs dropped by Bomb Rain
pub const BOMB_RAIN_COUNT: usize = 5;
