use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::systems::power_up_defs::{self, Lifetime};

/// Position component - grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Grid movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    /// The cell one step from (x, y) in this direction
    pub fn step_from(&self, x: i32, y: i32) -> (i32, i32) {
        let next = IVec2::new(x, y) + self.delta();
        (next.x, next.y)
    }
}

/// Power-up kinds. The closed catalog lives in `systems::power_up_defs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpType {
    ExtraBomb,
    RangeUp,
    SpeedUp,
    Shield,
    SpeedBurst,
    BombRain,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 6] = [
        PowerUpType::ExtraBomb,
        PowerUpType::RangeUp,
        PowerUpType::SpeedUp,
        PowerUpType::Shield,
        PowerUpType::SpeedBurst,
        PowerUpType::BombRain,
    ];

    pub fn name(&self) -> &'static str {
        power_up_defs::get_def(*self).name
    }

    pub fn lifetime(&self) -> Lifetime {
        power_up_defs::get_def(*self).lifetime
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self.lifetime(), Lifetime::Permanent)
    }

    /// Effect duration; zero for permanent and instantaneous power-ups
    pub fn duration_millis(&self) -> u32 {
        match self.lifetime() {
            Lifetime::Timed(ms) => ms,
            Lifetime::Permanent | Lifetime::Instant => 0,
        }
    }
}

/// Enemy marker component
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

/// A live bomb waiting for its fuse to run out
#[derive(Debug, Clone, Copy)]
pub struct Bomb {
    pub range: u32,
    pub fuse_remaining_ms: u32,
    /// Bombs dropped by Bomb Rain don't count against the player's limit
    pub from_bomb_rain: bool,
}

impl Bomb {
    pub fn new(range: u32, fuse_ms: u32) -> Self {
        Self {
            range,
            fuse_remaining_ms: fuse_ms,
            from_bomb_rain: false,
        }
    }

    pub fn rained(range: u32, fuse_ms: u32) -> Self {
        Self {
            from_bomb_rain: true,
            ..Self::new(range, fuse_ms)
        }
    }
}

/// Timed effects a player can be under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectType {
    /// Immune to explosions
    Shielded,
    /// Movement speed doubled
    SpeedBurst,
}

impl EffectType {
    pub fn name(&self) -> &'static str {
        match self {
            EffectType::Shielded => "Shielded",
            EffectType::SpeedBurst => "Speed Burst",
        }
    }
}

/// A single active effect with its remaining duration
#[derive(Debug, Clone, Copy)]
pub struct ActiveEffect {
    pub effect_type: EffectType,
    pub remaining_ms: u32,
}

/// Collection of active timed effects
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    pub effects: Vec<ActiveEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }
}
