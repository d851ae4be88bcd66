//! Headless runner: plays a scripted session and logs what happens.
//!
//! Usage: `bomber-arena [config.json]`. Set `RUST_LOG=debug` for more detail.

use std::path::Path;

use bomber_arena::components::Direction;
use bomber_arena::config::GameConfig;
use bomber_arena::engine::{Game, GameState, Input};
use tracing_subscriber::EnvFilter;

const FRAME_MS: u32 = 16;
const MAX_FRAMES: u32 = 2_000;

/// Inputs replayed in a loop while a level is running
const SCRIPT: [Input; 8] = [
    Input::PlaceBomb,
    Input::Move(Direction::Down),
    Input::Move(Direction::Down),
    Input::Move(Direction::Right),
    Input::Move(Direction::Up),
    Input::Move(Direction::Right),
    Input::Move(Direction::Right),
    Input::Move(Direction::Left),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path))?,
        None => GameConfig::default(),
    };
    tracing::info!(levels = config.level_count(), "config loaded");

    let mut game = Game::new(config);
    game.handle_input(Input::Confirm)?;

    let mut step = 0usize;
    for frame in 0..MAX_FRAMES {
        match game.state() {
            GameState::Running if frame % 30 == 0 => {
                game.handle_input(SCRIPT[step % SCRIPT.len()])?;
                step += 1;
            }
            GameState::LevelCompleted => game.handle_input(Input::Confirm)?,
            GameState::GameOver | GameState::StartMenu => break,
            _ => {}
        }
        game.tick(FRAME_MS)?;
        game.drain_events();
    }

    tracing::info!(
        state = game.state().name(),
        level = game.level_index() + 1,
        "session over"
    );
    Ok(())
}
