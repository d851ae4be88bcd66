//! Game configuration, loaded from JSON.
//!
//! Every field has a default so a config file only needs to list what it
//! changes. Levels are played in order; an empty list means "generate a
//! random arena for every level".

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::components::PowerUpType;
use crate::constants::*;
use crate::level_data::{LevelLayout, PowerUpPlacement};
use crate::player::PlayerStats;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_bombs: u32,
    pub range: u32,
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let stats = PlayerStats::default();
        Self {
            max_bombs: stats.max_bombs,
            range: stats.range,
            speed: stats.speed,
        }
    }
}

impl From<PlayerConfig> for PlayerStats {
    fn from(config: PlayerConfig) -> Self {
        Self {
            max_bombs: config.max_bombs,
            range: config.range,
            speed: config.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub bomb_fuse_ms: u32,
    pub level_start_delay_ms: u32,
    /// Number of random arenas to play when `levels` is empty
    pub random_levels: u32,
    /// Seed for random arenas; `None` seeds from the OS
    pub seed: Option<u64>,
    pub levels: Vec<LevelLayout>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            bomb_fuse_ms: BOMB_FUSE_MS,
            level_start_delay_ms: LEVEL_START_DELAY_MS,
            random_levels: 3,
            seed: None,
            levels: builtin_levels(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str, path: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json, &path.display().to_string())
    }

    /// How many levels a full game has
    pub fn level_count(&self) -> usize {
        if self.levels.is_empty() {
            self.random_levels as usize
        } else {
            self.levels.len()
        }
    }
}

/// The two hand-made levels that ship with the game
pub fn builtin_levels() -> Vec<LevelLayout> {
    vec![
        LevelLayout {
            name: "Niveau 1".into(),
            rows: vec![
                "#########".into(),
                "#...x.x.#".into(),
                "#.#x#.#x#".into(),
                "#.x...x.#".into(),
                "#x#.#x#.#".into(),
                "#..x...x#".into(),
                "#########".into(),
            ],
            player_start: (1, 1),
            exit: (7, 5),
            power_ups: vec![
                PowerUpPlacement {
                    x: 4,
                    y: 1,
                    kind: PowerUpType::ExtraBomb,
                },
                PowerUpPlacement {
                    x: 2,
                    y: 3,
                    kind: PowerUpType::RangeUp,
                },
            ],
            enemies: vec![(5, 3)],
        },
        LevelLayout {
            name: "Niveau 2".into(),
            rows: vec![
                "###########".into(),
                "#..xx.x.xx#".into(),
                "#.#x#.#x#.#".into(),
                "#x.x.x.x.x#".into(),
                "#.#.#x#.#x#".into(),
                "#xx.x...x.#".into(),
                "#.#x#.#x#.#".into(),
                "#x...x.x..#".into(),
                "###########".into(),
            ],
            player_start: (1, 1),
            exit: (9, 4),
            power_ups: vec![
                PowerUpPlacement {
                    x: 3,
                    y: 1,
                    kind: PowerUpType::SpeedUp,
                },
                PowerUpPlacement {
                    x: 5,
                    y: 3,
                    kind: PowerUpType::Shield,
                },
                PowerUpPlacement {
                    x: 1,
                    y: 5,
                    kind: PowerUpType::SpeedBurst,
                },
                PowerUpPlacement {
                    x: 7,
                    y: 6,
                    kind: PowerUpType::BombRain,
                },
            ],
            enemies: vec![(6, 5), (9, 7)],
        },
    ]
}
