// Game state simulation for tree search
//
// Moves are applied geometrically: the new head is prepended and the tail
// dropped, so length never changes inside the tree. Food consumption is
// deliberately not modelled; the evaluator treats food via distance
// heuristics and the head-collision heuristic compensates for frozen
// opponents at depth.

use crate::profile;
use crate::types::{Battlesnake, Direction, GameState};

/// Advances one cell in `dir`: new head prepended, tail dropped, health -1.
/// Health is not clamped; the evaluator penalises illegal positions.
fn apply_move(snake: &mut Battlesnake, dir: Direction) {
    let new_head = dir.apply(&snake.head);
    snake.body.insert(0, new_head);
    snake.body.pop();
    snake.head = new_head;
    snake.health -= 1;
}

/// Variant (a): our snake moves, all opponents keep their positions and
/// only lose one health.
pub fn advance_frozen(state: &GameState, dir: Direction) -> GameState {
    profile!("apply_move", {
        let mut next = state.clone();

        for snake in &mut next.board.snakes {
            if snake.id == next.you.id {
                apply_move(snake, dir);
                next.you = snake.clone();
            } else {
                snake.health -= 1;
            }
        }

        next
    })
}

/// Variant (b): our snake moves and one named opponent moves too, by the
/// same rules. Used only while opponent prediction is active in the first
/// plies of the search.
pub fn advance_with_opponent(
    state: &GameState,
    dir: Direction,
    opponent_id: &str,
    opponent_dir: Direction,
) -> GameState {
    profile!("apply_move", {
        let mut next = state.clone();

        for snake in &mut next.board.snakes {
            if snake.id == next.you.id {
                apply_move(snake, dir);
                next.you = snake.clone();
            } else if snake.id == opponent_id {
                apply_move(snake, opponent_dir);
            } else {
                snake.health -= 1;
            }
        }

        next
    })
}
