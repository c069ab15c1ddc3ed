// Safe-move generation
//
// A move is safe if the resulting head stays in-bounds and lands on no
// snake's non-tail body cell. Tails vacate on the next turn and count as
// passable. The returned order is always up, down, left, right so callers
// and the tie-breaker see a deterministic sequence.

use crate::profile;
use crate::types::{Battlesnake, Board, Direction};

/// Returns the safe subset of the four directions for `snake`.
/// An empty result is legal and means the snake is trapped.
pub fn safe_moves(board: &Board, snake: &Battlesnake) -> Vec<Direction> {
    profile!("move_gen", {
        if snake.health <= 0 || snake.body.is_empty() {
            return vec![];
        }

        Direction::all()
            .iter()
            .filter(|dir| {
                let next = dir.apply(&snake.head);
                board.in_bounds(&next) && !board.is_blocked(&next)
            })
            .copied()
            .collect()
    })
}
