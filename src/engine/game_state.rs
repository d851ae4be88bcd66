//! Top-level game flow.
//!
//! `GameState` is a plain tag. `GameFlow` owns the current tag and is the only
//! place that knows which transitions are legal.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    StartMenu,
    LevelStarting,
    Running,
    LevelCompleted,
    GameOver,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::StartMenu => "start_menu",
            GameState::LevelStarting => "level_starting",
            GameState::Running => "running",
            GameState::LevelCompleted => "level_completed",
            GameState::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Cannot go from {} to {}", .from.name(), .to.name())]
    InvalidTransition { from: GameState, to: GameState },
}

/// Whether `from -> to` is an allowed transition
pub fn can_transition(from: GameState, to: GameState) -> bool {
    use GameState::*;
    matches!(
        (from, to),
        (StartMenu, LevelStarting)
            | (LevelStarting, Running)
            | (Running, LevelCompleted)
            | (Running, GameOver)
            // Pause menu: restart the level or quit to the main menu
            | (Running, LevelStarting)
            | (Running, StartMenu)
            | (LevelCompleted, LevelStarting)
            // After the final level
            | (LevelCompleted, StartMenu)
            | (GameOver, StartMenu)
    )
}

#[derive(Debug, Clone)]
pub struct GameFlow {
    state: GameState,
}

impl Default for GameFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFlow {
    pub fn new() -> Self {
        Self {
            state: GameState::StartMenu,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn transition(&mut self, to: GameState) -> Result<(), FlowError> {
        if !can_transition(self.state, to) {
            return Err(FlowError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!(from = self.state.name(), to = to.name(), "game state transition");
        self.state = to;
        Ok(())
    }
}
