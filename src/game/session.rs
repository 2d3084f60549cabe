use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::action::Action;
use super::config::{GameConfig, LevelConfig};
use super::food::{Food, SpawnError};
use super::grid::{Grid, Position};
use super::obstacles;
use super::rng::GameRng;
use super::skin::Skin;
use super::snake::{Snake, TickOutcome};

/// What happened during one tick, for the app layer (sound cues, screen
/// transitions). All false for a tick on an already-terminal session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The snake consumed a food item this tick
    pub ate_food: bool,
    /// The consumed item was still special
    pub ate_special: bool,
    /// The snake died this tick; the session is now terminal
    pub died: bool,
}

/// One play-through: owns the snake, the food, the obstacle layout and the
/// session rng. Terminal once the snake dies; restarting means constructing
/// a fresh session.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: HashSet<Position>,
    rng: GameRng,
    over: bool,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        level: usize,
        skin: Skin,
        mut rng: GameRng,
        now: Instant,
    ) -> Result<Self, SpawnError> {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let obstacles = obstacles::generate(level, grid, &mut rng);
        let snake = Snake::new(grid, level, skin);
        let food = Food::spawn(&config, grid, &snake.segments, &obstacles, &mut rng, now)?;

        Ok(Self {
            config,
            grid,
            snake,
            food,
            obstacles,
            rng,
            over: false,
        })
    }

    /// Run the per-tick protocol: apply the turn, advance the snake, handle
    /// food consumption, then age the food. A terminal session mutates
    /// nothing and reports an empty tick.
    pub fn tick(&mut self, action: Action, now: Instant) -> Result<TickReport, SpawnError> {
        let mut report = TickReport::default();
        if self.over {
            return Ok(report);
        }

        if let Action::Move(direction) = action {
            self.snake.change_direction(direction);
        }

        if self.snake.advance(self.grid, &self.obstacles) == TickOutcome::Dead {
            self.over = true;
            report.died = true;
            return Ok(report);
        }

        if self.snake.head() == self.food.position {
            report.ate_food = true;
            if self.food.special {
                report.ate_special = true;
                // Special food: direct bonus plus double growth
                self.snake.score += 50 * (self.snake.level as u32 + 1);
                self.snake.grow();
                self.snake.grow();
            } else {
                self.snake.grow();
            }
            self.food.respawn(
                &self.config,
                self.grid,
                &self.snake.segments,
                &self.obstacles,
                &mut self.rng,
                now,
            )?;
        }

        self.food.check_expiry(&self.config, now);

        Ok(report)
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> u32 {
        self.snake.score
    }

    pub fn level(&self) -> usize {
        self.snake.level
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Pacing for this session's level
    pub fn tick_interval(&self) -> Duration {
        LevelConfig::get(self.snake.level).tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;

    fn session(level: usize, seed: u64) -> GameSession {
        GameSession::new(
            GameConfig::default(),
            level,
            Skin::Classic,
            GameRng::new(seed),
            Instant::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let session = session(0, 1);
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake.len(), 1);
        assert!(session.obstacles.is_empty());
        assert_ne!(session.food.position, session.snake.head());
    }

    #[test]
    fn test_level_one_has_border_obstacles() {
        let session = session(1, 1);
        assert!(session.obstacles.contains(&Position::new(0, 0)));
        assert!(!session.obstacles.contains(&session.snake.head()));
    }

    #[test]
    fn test_consume_scenario() {
        // 40x30 grid, length-1 snake at (20,15) heading right, level 0,
        // food forced one cell ahead.
        let mut session = session(0, 1);
        session.food.position = Position::new(21, 15);
        session.food.special = false;
        let now = Instant::now();

        let report = session.tick(Action::Continue, now).unwrap();
        assert!(report.ate_food);
        assert!(!report.ate_special);
        assert_eq!(session.snake.head(), Position::new(21, 15));
        assert_eq!(session.score(), 10);
        assert_eq!(session.snake.len(), 1, "growth lands on the next tick");

        let report = session.tick(Action::Continue, now).unwrap();
        assert!(!report.ate_food);
        assert_eq!(session.snake.len(), 2);
    }

    #[test]
    fn test_special_food_bonus() {
        let mut session = session(0, 1);
        session.food.position = Position::new(21, 15);
        session.food.special = true;
        session.food.spawn_time = Instant::now();

        let report = session.tick(Action::Continue, Instant::now()).unwrap();
        assert!(report.ate_special);
        // 50 bonus + two grow() calls at 10 points each
        assert_eq!(session.score(), 70);
        assert_eq!(session.snake.target_length, 3);
    }

    #[test]
    fn test_food_respawns_disjoint() {
        let mut session = session(2, 9);
        session.food.position = Position::new(21, 15);
        session.food.special = false;

        session.tick(Action::Continue, Instant::now()).unwrap();
        assert!(!session.snake.segments.contains(&session.food.position));
        assert!(!session.obstacles.contains(&session.food.position));
    }

    #[test]
    fn test_death_is_terminal() {
        let mut session = session(1, 1);
        let now = Instant::now();

        // Drive the snake into the border wall on the right
        let mut died = false;
        for _ in 0..40 {
            let report = session.tick(Action::Continue, now).unwrap();
            if report.died {
                died = true;
                break;
            }
        }
        assert!(died);
        assert!(session.is_over());

        // Further ticks mutate nothing and report nothing
        let head = session.snake.head();
        let score = session.score();
        let report = session.tick(Action::Move(Direction::Up), now).unwrap();
        assert_eq!(report, TickReport::default());
        assert_eq!(session.snake.head(), head);
        assert_eq!(session.score(), score);
    }

    #[test]
    fn test_turn_applies_before_movement() {
        let mut session = session(0, 1);
        let report = session
            .tick(Action::Move(Direction::Up), Instant::now())
            .unwrap();
        assert!(!report.died);
        assert_eq!(session.snake.head(), Position::new(20, 14));
    }

    #[test]
    fn test_tick_interval_follows_level() {
        assert_eq!(session(0, 1).tick_interval(), Duration::from_millis(100));
        assert_eq!(session(3, 1).tick_interval(), Duration::from_millis(40));
    }
}
