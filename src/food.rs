use rand::Rng;

use crate::snake::{Position, Snake};
use crate::GridInt;

/// Draws cells uniformly until one is free of the snake and of `other`.
///
/// There is no cap on the number of draws. On a board that is nearly full
/// this can spin for a long time, and forever on a full one.
pub fn random_empty_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: GridInt,
    snake: &Snake,
    other: Option<Position>,
) -> Position {
    loop {
        let pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.contains(&pos) && other != Some(pos) {
            return pos;
        }
    }
}
