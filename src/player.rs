//! The player collaborator.
//!
//! Power-ups only see the player through `PlayerCapabilities`. `Player` is
//! the concrete implementation the engine drives.

use crate::components::{EffectType, StatusEffects};
use crate::constants::*;
use crate::systems::effects;

/// Mutators a power-up may call on the player, plus position for context.
pub trait PlayerCapabilities {
    fn position(&self) -> (i32, i32);
    fn increase_max_bombs(&mut self);
    fn increase_range(&mut self);
    fn increase_speed(&mut self);
    fn activate_shield(&mut self, duration_ms: u32);
    fn activate_speed_burst(&mut self, duration_ms: u32);
    fn activate_bomb_rain(&mut self);
}

/// Starting values for a new player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub max_bombs: u32,
    pub range: u32,
    pub speed: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_bombs: PLAYER_STARTING_MAX_BOMBS,
            range: PLAYER_STARTING_RANGE,
            speed: PLAYER_STARTING_SPEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub max_bombs: u32,
    pub range: u32,
    pub speed: f32,
    pub effects: StatusEffects,
    /// Bomb Rain targets waiting for the level to place them
    queued_bombs: Vec<(i32, i32)>,
}

impl Player {
    pub fn new(x: i32, y: i32, stats: PlayerStats) -> Self {
        Self {
            x,
            y,
            max_bombs: stats.max_bombs,
            range: stats.range,
            speed: stats.speed,
            effects: StatusEffects::new(),
            queued_bombs: Vec::new(),
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn is_shielded(&self) -> bool {
        effects::has_effect(&self.effects, EffectType::Shielded)
    }

    /// Movement speed including any active Speed Burst
    pub fn effective_speed(&self) -> f32 {
        if effects::has_effect(&self.effects, EffectType::SpeedBurst) {
            self.speed * SPEED_BURST_MULTIPLIER
        } else {
            self.speed
        }
    }

    /// Milliseconds between two steps at the current effective speed
    pub fn move_interval_ms(&self) -> u32 {
        let speed = self.effective_speed().max(MIN_MOVE_SPEED);
        (BASE_MOVE_INTERVAL_MS as f32 / speed).round() as u32
    }

    /// Advance timed effects, returning the ones that ran out
    pub fn tick_effects(&mut self, dt_ms: u32) -> Vec<EffectType> {
        let expired = effects::tick_effects(&mut self.effects, dt_ms);
        for effect in &expired {
            tracing::debug!(effect = effect.name(), "player effect expired");
        }
        expired
    }

    /// Take the pending Bomb Rain targets (clears them after reading)
    pub fn take_queued_bombs(&mut self) -> Vec<(i32, i32)> {
        std::mem::take(&mut self.queued_bombs)
    }

    /// Bomb Rain pattern: the player's own cell plus the four orthogonal neighbours
    fn bomb_rain_targets(&self) -> [(i32, i32); BOMB_RAIN_COUNT] {
        let (x, y) = (self.x, self.y);
        [(x, y), (x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
    }
}

impl PlayerCapabilities for Player {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn increase_max_bombs(&mut self) {
        self.max_bombs += 1;
    }

    fn increase_range(&mut self) {
        self.range += 1;
    }

    fn increase_speed(&mut self) {
        self.speed += SPEED_UP_INCREMENT;
    }

    fn activate_shield(&mut self, duration_ms: u32) {
        effects::add_effect(&mut self.effects, EffectType::Shielded, duration_ms);
    }

    fn activate_speed_burst(&mut self, duration_ms: u32) {
        effects::add_effect(&mut self.effects, EffectType::SpeedBurst, duration_ms);
    }

    fn activate_bomb_rain(&mut self) {
        let targets = self.bomb_rain_targets();
        self.queued_bombs.extend(targets);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PlayerCapabilities;

    /// Player double that records every mutator call
    pub struct RecordingPlayer {
        pub x: i32,
        pub y: i32,
        pub calls: Vec<String>,
    }

    impl RecordingPlayer {
        pub fn at(x: i32, y: i32) -> Self {
            Self { x, y, calls: Vec::new() }
        }
    }

    impl PlayerCapabilities for RecordingPlayer {
        fn position(&self) -> (i32, i32) {
            (self.x, self.y)
        }
        fn increase_max_bombs(&mut self) {
            self.calls.push("increase_max_bombs".into());
        }
        fn increase_range(&mut self) {
            self.calls.push("increase_range".into());
        }
        fn increase_speed(&mut self) {
            self.calls.push("increase_speed".into());
        }
        fn activate_shield(&mut self, duration_ms: u32) {
            self.calls.push(format!("activate_shield({})", duration_ms));
        }
        fn activate_speed_burst(&mut self, duration_ms: u32) {
            self.calls.push(format!("activate_speed_burst({})", duration_ms));
        }
        fn activate_bomb_rain(&mut self) {
            self.calls.push("activate_bomb_rain".into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_upgrades() {
        let mut player = Player::new(1, 1, PlayerStats::default());
        player.increase_max_bombs();
        player.increase_range();
        player.increase_speed();
        assert_eq!(player.max_bombs, PLAYER_STARTING_MAX_BOMBS + 1);
        assert_eq!(player.range, PLAYER_STARTING_RANGE + 1);
        assert_eq!(player.speed, PLAYER_STARTING_SPEED + SPEED_UP_INCREMENT);
    }

    #[test]
    fn test_shield_expires_after_duration() {
        let mut player = Player::new(1, 1, PlayerStats::default());
        player.activate_shield(1_000);
        assert!(player.is_shielded());

        player.tick_effects(999);
        assert!(player.is_shielded());

        let expired = player.tick_effects(1);
        assert_eq!(expired, vec![EffectType::Shielded]);
        assert!(!player.is_shielded());
    }

    #[test]
    fn test_speed_burst_doubles_effective_speed() {
        let mut player = Player::new(1, 1, PlayerStats::default());
        player.increase_speed();
        player.activate_speed_burst(500);
        assert_eq!(player.effective_speed(), (PLAYER_STARTING_SPEED + SPEED_UP_INCREMENT) * 2.0);

        player.tick_effects(500);
        assert_eq!(player.effective_speed(), PLAYER_STARTING_SPEED + SPEED_UP_INCREMENT);
    }

    #[test]
    fn test_move_interval_follows_speed() {
        let mut player = Player::new(1, 1, PlayerStats::default());
        assert_eq!(player.move_interval_ms(), BASE_MOVE_INTERVAL_MS);

        player.increase_speed();
        assert_eq!(player.move_interval_ms(), 133);

        player.activate_speed_burst(SPEED_BURST_DURATION_MS);
        assert_eq!(player.move_interval_ms(), 67);
    }

    #[test]
    fn test_bomb_rain_queues_five_targets_around_player() {
        let mut player = Player::new(3, 3, PlayerStats::default());
        player.activate_bomb_rain();

        let targets = player.take_queued_bombs();
        assert_eq!(targets.len(), BOMB_RAIN_COUNT);
        assert!(targets.contains(&(3, 3)));
        assert!(targets.contains(&(3, 2)));
        assert!(targets.contains(&(4, 3)));
        assert!(targets.contains(&(3, 4)));
        assert!(targets.contains(&(2, 3)));

        assert!(player.take_queued_bombs().is_empty());
    }
}
