use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset position by delta (no wrapping; see `Grid::wrap`)
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Toroidal grid dimensions. Movement wraps at every edge, so there is
/// no off-grid state and no bounds failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Normalize arbitrary coordinates into [0, width) x [0, height).
    /// `rem_euclid` keeps components non-negative for negative inputs.
    pub fn wrap(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.width as i32),
            y: pos.y.rem_euclid(self.height as i32),
        }
    }

    /// Move one cell in a direction, wrapping around the edges.
    /// This is the sole movement primitive of the game.
    pub fn advance(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(pos.moved_by(dx, dy))
    }

    /// The snake's spawn cell
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.width as i32
            && pos.y >= 0
            && pos.y < self.height as i32
    }
}
