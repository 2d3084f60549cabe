use std::collections::HashSet;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::config::GameConfig;
use super::grid::{Grid, Position};
use super::rng::GameRng;
use thiserror::Error;

/// Food placement failure. Only reachable when obstacles plus snake leave
/// no free cell, which the retry bound turns into an explicit error instead
/// of a hang.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no free cell left to place food after {attempts} attempts")]
    NoFreeCell { attempts: usize },
}

/// A single food item on the grid
#[derive(Debug, Clone)]
pub struct Food {
    /// Always disjoint from the snake and the obstacles while active
    pub position: Position,
    /// Special food carries a score bonus and double growth, for a while
    pub special: bool,
    /// When this item appeared; drives special expiry and the blink phase
    pub spawn_time: Instant,
}

impl Food {
    /// Place a fresh food item on a free cell
    pub fn spawn(
        config: &GameConfig,
        grid: Grid,
        snake_segments: &[Position],
        obstacles: &HashSet<Position>,
        rng: &mut GameRng,
        now: Instant,
    ) -> Result<Self, SpawnError> {
        let position = Self::sample_free_cell(config, grid, snake_segments, obstacles, rng)?;
        Ok(Self {
            position,
            special: rng.gen_bool(config.special_food_chance),
            spawn_time: now,
        })
    }

    /// Move this item to a new free cell with a fresh special draw and timer
    pub fn respawn(
        &mut self,
        config: &GameConfig,
        grid: Grid,
        snake_segments: &[Position],
        obstacles: &HashSet<Position>,
        rng: &mut GameRng,
        now: Instant,
    ) -> Result<(), SpawnError> {
        self.position = Self::sample_free_cell(config, grid, snake_segments, obstacles, rng)?;
        self.special = rng.gen_bool(config.special_food_chance);
        self.spawn_time = now;
        Ok(())
    }

    fn sample_free_cell(
        config: &GameConfig,
        grid: Grid,
        snake_segments: &[Position],
        obstacles: &HashSet<Position>,
        rng: &mut GameRng,
    ) -> Result<Position, SpawnError> {
        for _ in 0..config.max_spawn_attempts {
            let candidate = Position::new(
                rng.gen_range(0..grid.width as i32),
                rng.gen_range(0..grid.height as i32),
            );
            if !snake_segments.contains(&candidate) && !obstacles.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(SpawnError::NoFreeCell {
            attempts: config.max_spawn_attempts,
        })
    }

    /// Revert an expired special food to a plain one. The item stays where
    /// it is and remains consumable. Idempotent.
    pub fn check_expiry(&mut self, config: &GameConfig, now: Instant) {
        if self.special && now.duration_since(self.spawn_time) > config.special_food_lifetime {
            self.special = false;
        }
    }

    /// 2 Hz blink phase for special food, anchored to wall-clock time so
    /// the blink stays steady across respawns. Presentation only.
    pub fn blink_on(wall_clock: SystemTime) -> bool {
        let since_epoch = wall_clock
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        (since_epoch.as_millis() / 500) % 2 == 0
    }
}
