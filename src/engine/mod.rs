//! Game engine - owns the flow state, the current level and the player.
//!
//! The engine handles:
//! - Input gating by flow state and overlay
//! - Level loading (hand-made or generated) and progression
//! - Simulation advancement
//!
//! The application shell only forwards abstract inputs and a frame delta,
//! then drains the events the level produced.

mod game_state;
pub mod initialization;
mod level;

pub use game_state::{can_transition, FlowError, GameFlow, GameState};
pub use level::{Level, LevelStatus};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::arena_gen::{self, ArenaOptions};
use crate::components::{Direction, StatusEffects};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::level_data::{LevelError, LevelLayout};
use crate::player::{Player, PlayerStats};
use crate::ui::{Overlay, PauseAction, PauseMenu};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("Level {index} could not be loaded: {source}")]
    Level {
        index: usize,
        #[source]
        source: LevelError,
    },
}

/// Abstract player input, already decoded from keys by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    PlaceBomb,
    Pause,
    Confirm,
    Back,
}

pub struct Game {
    config: GameConfig,
    flow: GameFlow,
    overlay: Overlay,
    pause_menu: PauseMenu,
    player: Player,
    /// Player as they entered the current level, restored on restart
    player_at_level_start: Player,
    level: Option<Level>,
    /// Layout the current level was built from, reused on restart
    current_layout: Option<LevelLayout>,
    level_index: usize,
    start_timer_ms: u32,
    /// Time left before the player may step again
    move_cooldown_ms: u32,
    rng: StdRng,
}

impl Game {
    /// Create a game sitting on the start menu
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = Player::new(0, 0, PlayerStats::from(config.player));
        Self {
            config,
            flow: GameFlow::new(),
            overlay: Overlay::None,
            pause_menu: PauseMenu::new(),
            player_at_level_start: player.clone(),
            player,
            level: None,
            current_layout: None,
            level_index: 0,
            start_timer_ms: 0,
            move_cooldown_ms: 0,
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        self.flow.state()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn is_paused(&self) -> bool {
        self.overlay != Overlay::None
    }

    pub fn pause_menu(&self) -> &PauseMenu {
        &self.pause_menu
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    /// Zero-based index of the current level
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index + 1 >= self.config.level_count()
    }

    pub fn start_timer_ms(&self) -> u32 {
        self.start_timer_ms
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Route one input according to the flow state. Inputs that mean nothing
    /// in the current state are ignored.
    pub fn handle_input(&mut self, input: Input) -> Result<(), GameError> {
        match self.flow.state() {
            GameState::StartMenu => {
                if input == Input::Confirm {
                    self.start_new_game()?;
                }
            }
            GameState::LevelStarting => {}
            GameState::Running => match self.overlay {
                Overlay::None => self.handle_play_input(input),
                Overlay::Pause => self.handle_pause_input(input)?,
                Overlay::Controls => {
                    if matches!(input, Input::Back | Input::Confirm | Input::Pause) {
                        self.overlay = Overlay::Pause;
                    }
                }
            },
            GameState::LevelCompleted => {
                if input == Input::Confirm {
                    self.advance_level()?;
                }
            }
            GameState::GameOver => {
                if input == Input::Confirm {
                    self.return_to_menu()?;
                }
            }
        }
        Ok(())
    }

    fn handle_play_input(&mut self, input: Input) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        match input {
            Input::Move(direction) => {
                if self.move_cooldown_ms > 0 {
                    return;
                }
                if level.try_move_player(&mut self.player, direction) {
                    self.move_cooldown_ms = self.player.move_interval_ms();
                }
            }
            Input::PlaceBomb => {
                level.player_place_bomb(&self.player);
            }
            Input::Pause => {
                self.pause_menu.reset();
                self.overlay = Overlay::Pause;
                tracing::debug!("game paused");
                return;
            }
            Input::Confirm | Input::Back => return,
        }
        self.apply_level_status();
    }

    fn handle_pause_input(&mut self, input: Input) -> Result<(), GameError> {
        match input {
            Input::Move(Direction::Up) => self.pause_menu.navigate_up(),
            Input::Move(Direction::Down) => self.pause_menu.navigate_down(),
            Input::Pause | Input::Back => self.overlay = Overlay::None,
            Input::Confirm => self.apply_pause_action(self.pause_menu.selected_action())?,
            Input::Move(_) | Input::PlaceBomb => {}
        }
        Ok(())
    }

    fn apply_pause_action(&mut self, action: PauseAction) -> Result<(), GameError> {
        tracing::debug!(?action, "pause menu action");
        match action {
            PauseAction::Resume => self.overlay = Overlay::None,
            PauseAction::Restart => {
                self.overlay = Overlay::None;
                self.player = self.player_at_level_start.clone();
                self.restart_level()?;
            }
            PauseAction::Commands => self.overlay = Overlay::Controls,
            PauseAction::MainMenu => self.return_to_menu()?,
        }
        Ok(())
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Advance the game by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: u32) -> Result<(), GameError> {
        puffin::profile_function!();

        match self.flow.state() {
            GameState::LevelStarting => {
                self.start_timer_ms = self.start_timer_ms.saturating_sub(dt_ms);
                if self.start_timer_ms == 0 {
                    self.flow.transition(GameState::Running)?;
                }
            }
            GameState::Running if self.overlay == Overlay::None => {
                self.move_cooldown_ms = self.move_cooldown_ms.saturating_sub(dt_ms);
                self.player.tick_effects(dt_ms);
                if let Some(level) = self.level.as_mut() {
                    level.tick(dt_ms, &mut self.player);
                }
                self.apply_level_status();
            }
            _ => {}
        }
        Ok(())
    }

    /// Drain the current level's events, logging each one
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.level
            .as_mut()
            .map(|level| level.drain_events())
            .unwrap_or_default()
    }

    fn apply_level_status(&mut self) {
        let Some(status) = self.level.as_ref().map(|level| level.status()) else {
            return;
        };
        let next = match status {
            LevelStatus::InProgress => return,
            LevelStatus::Completed => GameState::LevelCompleted,
            LevelStatus::PlayerDied => GameState::GameOver,
        };
        if self.flow.transition(next).is_ok() {
            tracing::info!(
                level = self.level_index + 1,
                outcome = next.name(),
                "level finished"
            );
        }
    }

    // =========================================================================
    // PROGRESSION
    // =========================================================================

    fn start_new_game(&mut self) -> Result<(), GameError> {
        self.player = Player::new(0, 0, PlayerStats::from(self.config.player));
        self.level_index = 0;
        tracing::info!(levels = self.config.level_count(), "new game");
        self.begin_level()
    }

    fn advance_level(&mut self) -> Result<(), GameError> {
        if self.is_final_level() {
            tracing::info!("all levels cleared");
            return self.return_to_menu();
        }
        self.level_index += 1;
        self.begin_level()
    }

    fn return_to_menu(&mut self) -> Result<(), GameError> {
        self.flow.transition(GameState::StartMenu)?;
        self.overlay = Overlay::None;
        self.level = None;
        self.current_layout = None;
        Ok(())
    }

    /// Load the layout for the current index, then start it
    fn begin_level(&mut self) -> Result<(), GameError> {
        let layout = self.layout_for(self.level_index)?;
        self.start_level(layout)
    }

    /// Rebuild the current level from the layout it was started with
    fn restart_level(&mut self) -> Result<(), GameError> {
        match self.current_layout.clone() {
            Some(layout) => self.start_level(layout),
            None => self.begin_level(),
        }
    }

    /// Build a level from `layout`, put the player on its start cell and
    /// start the countdown
    fn start_level(&mut self, layout: LevelLayout) -> Result<(), GameError> {
        let index = self.level_index;
        tracing::debug!(index, name = %layout.name, "loading level");
        let level = Level::from_layout(&layout, self.config.bomb_fuse_ms)
            .map_err(|source| GameError::Level { index, source })?;
        self.flow.transition(GameState::LevelStarting)?;

        let (x, y) = level.player_start();
        self.player.set_position(x, y);
        self.player.effects = StatusEffects::new();
        self.player.take_queued_bombs();
        self.player_at_level_start = self.player.clone();

        self.level = Some(level);
        self.current_layout = Some(layout);
        self.start_timer_ms = self.config.level_start_delay_ms;
        self.move_cooldown_ms = 0;
        tracing::info!(level = self.level_index + 1, "level starting");
        Ok(())
    }

    /// Hand-made layout for `index`, or a freshly generated arena past the end
    /// of the configured list
    fn layout_for(&mut self, index: usize) -> Result<LevelLayout, GameError> {
        match self.config.levels.get(index) {
            Some(layout) => Ok(layout.clone()),
            None => arena_gen::generate(&ArenaOptions::default(), &mut self.rng)
                .map_err(|source| GameError::Level { index, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::player::PlayerCapabilities;

    /// Corridor: player at (1,1), exit under the block at (2,1), no enemies
    fn corridor() -> LevelLayout {
        LevelLayout {
            name: "corridor".into(),
            rows: vec!["######".into(), "#.x..#".into(), "######".into()],
            player_start: (1, 1),
            exit: (2, 1),
            power_ups: Vec::new(),
            enemies: Vec::new(),
        }
    }

    fn config(levels: Vec<LevelLayout>) -> GameConfig {
        GameConfig {
            bomb_fuse_ms: 100,
            level_start_delay_ms: 50,
            seed: Some(42),
            levels,
            ..GameConfig::default()
        }
    }

    fn running_game(levels: Vec<LevelLayout>) -> Game {
        let mut game = Game::new(config(levels));
        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::LevelStarting);
        game.tick(50).unwrap();
        assert_eq!(game.state(), GameState::Running);
        game
    }

    #[test]
    fn test_start_menu_ignores_gameplay_input() {
        let mut game = Game::new(config(vec![corridor()]));
        game.handle_input(Input::PlaceBomb).unwrap();
        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.state(), GameState::StartMenu);
        assert!(game.level().is_none());
    }

    #[test]
    fn test_level_start_countdown() {
        let mut game = Game::new(config(vec![corridor()]));
        game.handle_input(Input::Confirm).unwrap();
        game.tick(30).unwrap();
        assert_eq!(game.state(), GameState::LevelStarting);
        assert_eq!(game.start_timer_ms(), 20);

        // No bombs before the level is running
        game.handle_input(Input::PlaceBomb).unwrap();
        assert_eq!(game.level().unwrap().bomb_count(), 0);

        game.tick(20).unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.player().position(), (1, 1));
    }

    #[test]
    fn test_blow_the_block_and_walk_out() {
        let mut game = running_game(vec![corridor(), corridor()]);

        // Nowhere to hide in a corridor
        game.player.activate_shield(1_000);
        game.handle_input(Input::PlaceBomb).unwrap();
        game.tick(100).unwrap();
        assert!(game.level().unwrap().exit_door().unwrap().is_visible());
        assert_eq!(game.state(), GameState::Running);

        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.state(), GameState::LevelCompleted);

        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::LevelStarting);
        assert_eq!(game.level_index(), 1);
        assert_eq!(game.player().position(), (1, 1));
        assert!(!game.player().is_shielded());
    }

    #[test]
    fn test_final_level_returns_to_menu() {
        let mut game = running_game(vec![corridor()]);
        game.level_mut().unwrap().destroy_block(2, 1);
        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.state(), GameState::LevelCompleted);
        assert!(game.is_final_level());

        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::StartMenu);
        assert!(game.level().is_none());
    }

    #[test]
    fn test_own_bomb_is_game_over() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::PlaceBomb).unwrap();
        game.tick(100).unwrap();
        assert_eq!(game.state(), GameState::GameOver);

        let kinds: Vec<_> = game.drain_events().iter().map(|e| e.kind()).collect();
        assert!(kinds.contains(&"player_killed"));

        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.state(), GameState::GameOver);
        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::StartMenu);
    }

    #[test]
    fn test_pause_freezes_the_level() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::PlaceBomb).unwrap();
        game.handle_input(Input::Pause).unwrap();
        assert_eq!(game.overlay(), Overlay::Pause);

        game.tick(1_000).unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.level().unwrap().bomb_count(), 1);

        // Movement keys drive the menu, not the player
        game.handle_input(Input::Move(Direction::Down)).unwrap();
        assert_eq!(game.pause_menu().selected_action(), PauseAction::Restart);
        assert_eq!(game.player().position(), (1, 1));

        game.handle_input(Input::Back).unwrap();
        assert!(!game.is_paused());
    }

    #[test]
    fn test_pause_restart_reloads_level() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::PlaceBomb).unwrap();
        game.player.increase_range();

        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Move(Direction::Down)).unwrap();
        game.handle_input(Input::Confirm).unwrap();

        assert_eq!(game.state(), GameState::LevelStarting);
        assert!(!game.is_paused());
        assert_eq!(game.level().unwrap().bomb_count(), 0);
        assert_eq!(game.player().range, PlayerStats::default().range);
    }

    #[test]
    fn test_restart_keeps_generated_arena() {
        let mut game = running_game(Vec::new());
        let level = game.level().unwrap();
        let rows_before = LevelLayout::rows_from_grid(&level.grid);
        let door_before = level.exit_door().unwrap().position();
        let enemies_before = level.enemy_count();

        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Move(Direction::Down)).unwrap();
        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::LevelStarting);

        let level = game.level().unwrap();
        assert_eq!(LevelLayout::rows_from_grid(&level.grid), rows_before);
        assert_eq!(level.exit_door().unwrap().position(), door_before);
        assert_eq!(level.enemy_count(), enemies_before);
        assert_eq!(game.level_index(), 0);
    }

    #[test]
    fn test_moves_are_paced_by_speed() {
        let long_corridor = LevelLayout {
            name: "long corridor".into(),
            rows: vec!["#######".into(), "#....x#".into(), "#######".into()],
            player_start: (1, 1),
            exit: (5, 1),
            power_ups: Vec::new(),
            enemies: Vec::new(),
        };
        let mut game = running_game(vec![long_corridor]);

        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.player().position(), (2, 1));
        // Too soon for a second step
        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.player().position(), (2, 1));

        game.tick(BASE_MOVE_INTERVAL_MS - 1).unwrap();
        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.player().position(), (2, 1));
        game.tick(1).unwrap();
        game.handle_input(Input::Move(Direction::Right)).unwrap();
        assert_eq!(game.player().position(), (3, 1));

        // Speed Burst halves the wait
        game.player.activate_speed_burst(SPEED_BURST_DURATION_MS);
        game.tick(BASE_MOVE_INTERVAL_MS).unwrap();
        game.handle_input(Input::Move(Direction::Left)).unwrap();
        assert_eq!(game.player().position(), (2, 1));
        game.tick(BASE_MOVE_INTERVAL_MS / 2).unwrap();
        game.handle_input(Input::Move(Direction::Left)).unwrap();
        assert_eq!(game.player().position(), (1, 1));
    }

    #[test]
    fn test_pause_commands_and_back() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Move(Direction::Up)).unwrap();
        game.handle_input(Input::Move(Direction::Up)).unwrap();
        assert_eq!(game.pause_menu().selected_action(), PauseAction::Commands);

        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.overlay(), Overlay::Controls);
        game.handle_input(Input::Back).unwrap();
        assert_eq!(game.overlay(), Overlay::Pause);
    }

    #[test]
    fn test_pause_main_menu() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Move(Direction::Up)).unwrap();
        game.handle_input(Input::Confirm).unwrap();
        assert_eq!(game.state(), GameState::StartMenu);
        assert!(!game.is_paused());
        assert!(game.level().is_none());
    }

    #[test]
    fn test_pause_resets_selection() {
        let mut game = running_game(vec![corridor()]);
        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Move(Direction::Down)).unwrap();
        game.handle_input(Input::Pause).unwrap();
        game.handle_input(Input::Pause).unwrap();
        assert_eq!(game.pause_menu().selected_action(), PauseAction::Resume);
    }

    #[test]
    fn test_generated_levels_when_none_configured() {
        let mut game = Game::new(config(Vec::new()));
        game.handle_input(Input::Confirm).unwrap();
        let level = game.level().unwrap();
        assert_eq!(level.player_start(), (1, 1));
        assert!(level.enemy_count() > 0);
    }

    #[test]
    fn test_broken_level_reports_index() {
        let mut broken = corridor();
        broken.exit = (1, 1);
        let mut game = Game::new(config(vec![broken]));
        let err = game.handle_input(Input::Confirm).unwrap_err();
        assert!(matches!(err, GameError::Level { index: 0, .. }));
        assert_eq!(game.state(), GameState::StartMenu);
    }
}
