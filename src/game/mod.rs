//! Core game logic for toroidal snake
//!
//! Everything in this module is free of I/O, rendering and input
//! dependencies; the app layer drives it once per clock tick.

pub mod action;
pub mod config;
pub mod food;
pub mod grid;
pub mod obstacles;
pub mod rng;
pub mod session;
pub mod skin;
pub mod snake;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, LevelConfig, LEVELS};
pub use food::{Food, SpawnError};
pub use grid::{Grid, Position};
pub use rng::GameRng;
pub use session::{GameSession, TickReport};
pub use skin::{Rgb, Skin, SkinPalette};
pub use snake::{Snake, TickOutcome};
