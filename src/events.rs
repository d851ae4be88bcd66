//! Game event system for decoupled communication between systems.
//!
//! Entities and systems push events when a state transition actually
//! happens; the level drains them at the end of a tick and every event is
//! logged through one place (`log_event`). Presentation layers (sound,
//! animation) can consume the same drained events.

use crate::components::PowerUpType;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A destructible block was destroyed
    BlockDestroyed { position: (i32, i32) },
    /// A hidden power-up became visible
    PowerUpRevealed { position: (i32, i32), kind: PowerUpType },
    /// A power-up was picked up and its effect applied
    PowerUpCollected { position: (i32, i32), kind: PowerUpType },
    /// The exit door became visible
    ExitDoorRevealed { position: (i32, i32) },
    /// The exit door became usable
    ExitDoorActivated { position: (i32, i32) },
    /// The exit door stopped being usable
    ExitDoorDeactivated { position: (i32, i32) },
    BombPlaced { position: (i32, i32) },
    BombExploded { position: (i32, i32), range: u32 },
    EnemySpawned { position: (i32, i32) },
    EnemyKilled { position: (i32, i32) },
    /// The player was caught in a blast without a shield
    PlayerKilled { position: (i32, i32) },
    /// The player stepped on an active exit door
    LevelCompleted { position: (i32, i32) },
}

impl GameEvent {
    /// Short machine-friendly name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::BlockDestroyed { .. } => "block_destroyed",
            GameEvent::PowerUpRevealed { .. } => "power_up_revealed",
            GameEvent::PowerUpCollected { .. } => "power_up_collected",
            GameEvent::ExitDoorRevealed { .. } => "exit_door_revealed",
            GameEvent::ExitDoorActivated { .. } => "exit_door_activated",
            GameEvent::ExitDoorDeactivated { .. } => "exit_door_deactivated",
            GameEvent::BombPlaced { .. } => "bomb_placed",
            GameEvent::BombExploded { .. } => "bomb_exploded",
            GameEvent::EnemySpawned { .. } => "enemy_spawned",
            GameEvent::EnemyKilled { .. } => "enemy_killed",
            GameEvent::PlayerKilled { .. } => "player_killed",
            GameEvent::LevelCompleted { .. } => "level_completed",
        }
    }

    pub fn position(&self) -> (i32, i32) {
        match *self {
            GameEvent::BlockDestroyed { position }
            | GameEvent::PowerUpRevealed { position, .. }
            | GameEvent::PowerUpCollected { position, .. }
            | GameEvent::ExitDoorRevealed { position }
            | GameEvent::ExitDoorActivated { position }
            | GameEvent::ExitDoorDeactivated { position }
            | GameEvent::BombPlaced { position }
            | GameEvent::BombExploded { position, .. }
            | GameEvent::EnemySpawned { position }
            | GameEvent::EnemyKilled { position }
            | GameEvent::PlayerKilled { position }
            | GameEvent::LevelCompleted { position } => position,
        }
    }

    /// Display name of the power-up involved, if any
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            GameEvent::PowerUpRevealed { kind, .. } | GameEvent::PowerUpCollected { kind, .. } => {
                Some(kind.name())
            }
            _ => None,
        }
    }
}

/// Simple event queue - events are pushed during update, processed at end of tick
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Peek at pending events without consuming them
    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }
}

/// Emit one structured log line for an event
pub fn log_event(event: &GameEvent) {
    let (x, y) = event.position();
    match event.type_name() {
        Some(name) => tracing::info!(kind = event.kind(), x, y, power_up = name, "level event"),
        None => tracing::info!(kind = event.kind(), x, y, "level event"),
    }
}

/// Presentation hook notified when a destructible block is destroyed.
///
/// Carries no game-state meaning; the level never depends on it.
pub trait DestructibleBlockListener {
    fn on_block_destroyed(&mut self, column: i32, row: i32);
}
