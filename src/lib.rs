//! Torus Snake - arcade snake on a wrap-around grid, in the terminal
//!
//! This library provides:
//! - Core game logic (game module): grid arithmetic, snake, food,
//!   level obstacles and the per-tick session protocol
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Sound cues (audio module)
//! - The menu / play / game-over flow (app module)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
