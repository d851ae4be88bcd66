//! Level entity and progression core for a grid-based bomb arena game.
//!
//! Rendering, audio and raw key handling live outside this crate; the shell
//! feeds `engine::Input`s and frame deltas into `engine::Game`.

pub mod arena_gen;
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod entity_lookup;
pub mod events;
pub mod exit_door;
pub mod grid;
pub mod level_data;
pub mod player;
pub mod power_up;
pub mod systems;
pub mod tile;
pub mod ui;
