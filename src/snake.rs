use std::collections::VecDeque;
use std::fmt;

use crate::GridInt;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: GridInt,
    pub y: GridInt,
}

impl Position {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(&self, grid_size: GridInt) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    pub fn offset(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Heading of the snake. `Still` is the zero vector the game starts with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Still,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (GridInt, GridInt) {
        match self {
            Still => (0, 0),
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Still => Still,
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn head_char(&self) -> char {
        match self {
            Still => '@',
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Still
    }
}

pub enum MoveResult {
    Moved { new_head: Position },
    Crashed { at: Position },
}

/// The snake's body, head first. Cells are always distinct and inside the grid.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Two-cell seed in the middle of the grid, tail to the left of the head.
    pub fn seed(grid_size: GridInt) -> Self {
        let center = grid_size / 2;
        Snake::from_cells([Position::new(center, center), Position::new(center - 1, center)])
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        Snake { body: cells.into_iter().collect() }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    /// Prepends the next head if it stays on the grid and misses every current
    /// cell. The tail still counts, it has not moved out of the way yet.
    pub fn advance_head(&mut self, direction: Direction, grid_size: GridInt) -> MoveResult {
        let new_head = self.head().offset(direction);

        if !new_head.in_bounds(grid_size) || self.contains(&new_head) {
            return MoveResult::Crashed { at: new_head };
        }

        self.body.push_front(new_head);
        MoveResult::Moved { new_head }
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}
