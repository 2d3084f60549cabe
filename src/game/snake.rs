use std::collections::HashSet;

use super::action::Direction;
use super::grid::{Grid, Position};
use super::skin::Skin;

/// Outcome of advancing the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    /// Terminal for the session; the snake's state is left untouched
    Dead,
}

/// The player's snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at index 0; never empty, no duplicates while alive
    pub segments: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Length the body is growing toward, one cell per tick
    pub target_length: usize,
    /// Session score, monotonically non-decreasing
    pub score: u32,
    /// Difficulty level, fixed for the session
    pub level: usize,
    /// Cosmetic variant
    pub skin: Skin,
}

impl Snake {
    /// A fresh length-1 snake at the grid center, heading right
    pub fn new(grid: Grid, level: usize, skin: Skin) -> Self {
        Self {
            segments: vec![grid.center()],
            direction: Direction::Right,
            target_length: 1,
            score: 0,
            level,
            skin,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Body segments excluding the head
    pub fn body(&self) -> &[Position] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Turn toward `new_direction`, unless that would be an instant 180-degree
    /// reversal through the body. The last accepted call before a tick wins.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    /// Advance one cell in the current direction.
    ///
    /// Returns `Dead` without mutating anything when the new head would land
    /// on the body or an obstacle. Otherwise the head moves forward and the
    /// tail is dropped only once the body has reached `target_length`, which
    /// yields a one-cell-per-tick growth cadence no matter how many `grow`
    /// calls are queued.
    pub fn advance(&mut self, grid: Grid, obstacles: &HashSet<Position>) -> TickOutcome {
        let new_head = grid.advance(self.head(), self.direction);

        if self.body().contains(&new_head) || obstacles.contains(&new_head) {
            return TickOutcome::Dead;
        }

        self.segments.insert(0, new_head);
        if self.segments.len() > self.target_length {
            self.segments.pop();
        }

        TickOutcome::Alive
    }

    /// Queue one cell of growth and credit the level-scaled food score
    pub fn grow(&mut self) {
        self.target_length += 1;
        self.score += 10 * (self.level as u32 + 1);
    }
}
