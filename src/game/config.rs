use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Probability that a freshly spawned food is special
    pub special_food_chance: f64,
    /// How long a special food stays special before reverting to plain
    pub special_food_lifetime: Duration,
    /// Upper bound on rejection-sampling attempts when placing food
    pub max_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            special_food_chance: 0.2,
            special_food_lifetime: Duration::from_secs(5),
            max_spawn_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(12, 12)
    }
}

/// Per-level pacing and flavor text. Obstacle layout is a separate pure
/// function of the level index (see `obstacles::generate`).
#[derive(Debug, Clone)]
pub struct LevelConfig {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Menu description
    pub description: &'static str,
}

/// Static difficulty table, indexed by level id
pub const LEVELS: [LevelConfig; 4] = [
    LevelConfig {
        tick_rate: 10,
        description: "Easy - Slow speed, no obstacles",
    },
    LevelConfig {
        tick_rate: 15,
        description: "Medium - Faster speed, some walls",
    },
    LevelConfig {
        tick_rate: 20,
        description: "Hard - Fast speed, maze walls",
    },
    LevelConfig {
        tick_rate: 25,
        description: "Expert - Very fast, complex maze",
    },
];

impl LevelConfig {
    /// Look up a level, clamping out-of-range ids to the hardest level
    pub fn get(level: usize) -> &'static LevelConfig {
        LEVELS.get(level).unwrap_or(&LEVELS[LEVELS.len() - 1])
    }

    /// Duration of one simulation tick at this level's rate
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}
