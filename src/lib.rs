//! Simulation core for a side-scrolling runner.
//!
//! The library is pure game logic: it never touches the terminal, the
//! clock, or the filesystem (apart from `GameConfig::load`).  The binary in
//! `main.rs` supplies input, time deltas and a drawing surface.

pub mod animation;
pub mod collision;
pub mod config;
pub mod effects;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod ledger;
pub mod player;
pub mod pool;
pub mod render;
pub mod spawn;
pub mod world;

pub use config::GameConfig;
pub use error::ConfigError;
pub use game::{Game, GameStatus};
pub use input::{Action, ActionSet, Command};
