//! Power-up definitions - all power-up properties in one place.
//!
//! The catalog is fixed: one static table for the data and one total match
//! for the player mutation each kind performs.

use crate::components::PowerUpType;
use crate::constants::*;
use crate::player::PlayerCapabilities;

/// How long a power-up's effect lasts once collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Lasts for the rest of the game
    Permanent,
    /// Lasts for the given number of milliseconds
    Timed(u32),
    /// Happens once, immediately
    Instant,
}

/// Complete definition of a power-up's properties
pub struct PowerUpDef {
    pub kind: PowerUpType,
    pub name: &'static str,
    pub lifetime: Lifetime,
}

/// Get the definition for a power-up kind
pub fn get_def(kind: PowerUpType) -> &'static PowerUpDef {
    match kind {
        PowerUpType::ExtraBomb => &POWER_UP_DEFS[0],
        PowerUpType::RangeUp => &POWER_UP_DEFS[1],
        PowerUpType::SpeedUp => &POWER_UP_DEFS[2],
        PowerUpType::Shield => &POWER_UP_DEFS[3],
        PowerUpType::SpeedBurst => &POWER_UP_DEFS[4],
        PowerUpType::BombRain => &POWER_UP_DEFS[5],
    }
}

/// Static table of all power-up definitions, in `PowerUpType::ALL` order
pub static POWER_UP_DEFS: [PowerUpDef; 6] = [
    // =========================================================================
    // PERMANENT
    // =========================================================================
    PowerUpDef {
        kind: PowerUpType::ExtraBomb,
        name: "Extra Bomb",
        lifetime: Lifetime::Permanent,
    },
    PowerUpDef {
        kind: PowerUpType::RangeUp,
        name: "Range Up",
        lifetime: Lifetime::Permanent,
    },
    PowerUpDef {
        kind: PowerUpType::SpeedUp,
        name: "Speed Up",
        lifetime: Lifetime::Permanent,
    },
    // =========================================================================
    // TIMED
    // =========================================================================
    PowerUpDef {
        kind: PowerUpType::Shield,
        name: "Shield",
        lifetime: Lifetime::Timed(SHIELD_DURATION_MS),
    },
    PowerUpDef {
        kind: PowerUpType::SpeedBurst,
        name: "Speed Burst",
        lifetime: Lifetime::Timed(SPEED_BURST_DURATION_MS),
    },
    // =========================================================================
    // INSTANT
    // =========================================================================
    PowerUpDef {
        kind: PowerUpType::BombRain,
        name: "Bomb Rain",
        lifetime: Lifetime::Instant,
    },
];

/// Apply a power-up's effect: exactly one player mutator per call
pub fn apply_to_player<P: PlayerCapabilities + ?Sized>(kind: PowerUpType, player: &mut P) {
    let duration = kind.duration_millis();
    match kind {
        PowerUpType::ExtraBomb => player.increase_max_bombs(),
        PowerUpType::RangeUp => player.increase_range(),
        PowerUpType::SpeedUp => player.increase_speed(),
        PowerUpType::Shield => player.activate_shield(duration),
        PowerUpType::SpeedBurst => player.activate_speed_burst(duration),
        PowerUpType::BombRain => player.activate_bomb_rain(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::RecordingPlayer;

    #[test]
    fn test_all_power_up_types_have_definitions() {
        for kind in PowerUpType::ALL {
            assert_eq!(get_def(kind).kind, kind);
        }
    }

    #[test]
    fn test_table_order_matches_all() {
        for (def, kind) in POWER_UP_DEFS.iter().zip(PowerUpType::ALL) {
            assert_eq!(def.kind, kind);
        }
    }

    #[test]
    fn test_each_kind_calls_exactly_one_mutator() {
        let expected = [
            (PowerUpType::ExtraBomb, "increase_max_bombs"),
            (PowerUpType::RangeUp, "increase_range"),
            (PowerUpType::SpeedUp, "increase_speed"),
            (PowerUpType::Shield, "activate_shield(10000)"),
            (PowerUpType::SpeedBurst, "activate_speed_burst(5000)"),
            (PowerUpType::BombRain, "activate_bomb_rain"),
        ];

        for (kind, call) in expected {
            let mut player = RecordingPlayer::at(0, 0);
            apply_to_player(kind, &mut player);
            assert_eq!(player.calls, vec![call.to_string()], "{:?}", kind);
        }
    }
}
