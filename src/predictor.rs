// One-ply opponent move prediction
//
// The search only simulates the nearest opponent, and only for the first few
// plies. This module picks that opponent and estimates its best reply under
// the fixed predictor profile, which the search uses to order the opponent's
// branches before taking the worst case over all of them.

use crate::eval::evaluate;
use crate::moves::safe_moves;
use crate::profiles::WeightProfile;
use crate::sim::advance_frozen;
use crate::types::{Battlesnake, Direction, GameState};

/// The opponent closest to our head by Manhattan distance. Ties resolve to
/// the earliest snake in board order so prediction stays deterministic.
pub fn nearest_opponent<'a>(state: &'a GameState) -> Option<&'a Battlesnake> {
    state
        .board
        .opponents_of(&state.you.id)
        .min_by_key(|opp| state.you.head.manhattan_distance(&opp.head))
}

/// Estimates the opponent's best move by re-viewing the state from its
/// perspective and scoring each of its safe moves with the predictor
/// profile. A trapped opponent reports ("up", -inf), which the search treats
/// as the opponent being forced.
pub fn predict_best_move(state: &GameState, opponent: &Battlesnake) -> (Direction, f64) {
    let their_view = state.as_snake(opponent);
    let profile = WeightProfile::predictor();

    let candidates = safe_moves(&their_view.board, &their_view.you);
    if candidates.is_empty() {
        return (Direction::Up, f64::NEG_INFINITY);
    }

    let mut best = (candidates[0], f64::NEG_INFINITY);
    for dir in candidates {
        let next = advance_frozen(&their_view, dir);
        let score = evaluate(&next, &profile).score;
        if score > best.1 {
            best = (dir, score);
        }
    }

    best
}

/// The opponent's safe moves ordered best-first for alpha-beta: the
/// predicted move leads, the rest keep their deterministic order.
pub fn ordered_opponent_moves(state: &GameState, opponent: &Battlesnake) -> Vec<Direction> {
    let mut moves = safe_moves(&state.board, opponent);
    if moves.len() > 1 {
        let (predicted, score) = predict_best_move(state, opponent);
        if score > f64::NEG_INFINITY {
            if let Some(pos) = moves.iter().position(|&d| d == predicted) {
                moves.remove(pos);
                moves.insert(0, predicted);
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Coord, Game};
    use std::collections::HashMap;

    fn snake(id: &str, body: &[(i32, i32)], health: i32) -> Battlesnake {
        let cells: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
        Battlesnake {
            id: id.to_string(),
            name: String::new(),
            health,
            head: cells[0],
            length: cells.len() as i32,
            body: cells,
            latency: String::new(),
            shout: None,
        }
    }

    fn state_with(snakes: Vec<Battlesnake>, food: Vec<Coord>) -> GameState {
        let you = snakes[0].clone();
        GameState {
            game: Game {
                id: "g".to_string(),
                ruleset: HashMap::new(),
                timeout: 500,
            },
            turn: 10,
            board: Board {
                width: 11,
                height: 11,
                food,
                hazards: vec![],
                snakes,
            },
            you,
        }
    }

    #[test]
    fn test_nearest_opponent_by_distance() {
        let us = snake("us", &[(5, 5), (5, 4)], 90);
        let near = snake("near", &[(7, 5), (8, 5)], 90);
        let far = snake("far", &[(0, 10), (0, 9)], 90);
        let s = state_with(vec![us, near, far], vec![]);

        assert_eq!(nearest_opponent(&s).map(|o| o.id.as_str()), Some("near"));
    }

    #[test]
    fn test_nearest_opponent_tie_uses_board_order() {
        let us = snake("us", &[(5, 5), (5, 4)], 90);
        let a = snake("a", &[(7, 5), (8, 5)], 90);
        let b = snake("b", &[(3, 5), (2, 5)], 90);
        let s = state_with(vec![us, a, b], vec![]);

        assert_eq!(nearest_opponent(&s).map(|o| o.id.as_str()), Some("a"));
    }

    #[test]
    fn test_solo_board_has_no_opponent() {
        let us = snake("us", &[(5, 5), (5, 4)], 90);
        let s = state_with(vec![us], vec![]);
        assert!(nearest_opponent(&s).is_none());
    }

    #[test]
    fn test_trapped_opponent_is_forced() {
        let us = snake("us", &[(5, 5), (5, 4)], 90);
        // Opponent boxed into the corner by its own body
        let trapped = snake("t", &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)], 90);
        let s = state_with(vec![us, trapped.clone()], vec![]);

        let (dir, score) = predict_best_move(&s, &trapped);
        assert_eq!(dir, Direction::Up);
        assert_eq!(score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_hungry_opponent_heads_for_food() {
        let us = snake("us", &[(0, 10), (0, 9)], 90);
        let hungry = snake("h", &[(5, 5), (5, 6), (5, 7)], 15);
        let s = state_with(vec![us, hungry.clone()], vec![Coord { x: 5, y: 2 }]);

        let (dir, score) = predict_best_move(&s, &hungry);
        assert_eq!(dir, Direction::Down);
        assert!(score > f64::NEG_INFINITY);
    }

    #[test]
    fn test_ordered_moves_lead_with_prediction() {
        let us = snake("us", &[(0, 10), (0, 9)], 90);
        let hungry = snake("h", &[(5, 5), (5, 6), (5, 7)], 15);
        let s = state_with(vec![us, hungry.clone()], vec![Coord { x: 5, y: 2 }]);

        let ordered = ordered_opponent_moves(&s, &hungry);
        assert_eq!(ordered[0], Direction::Down);
        assert_eq!(ordered.len(), 3);
    }
}
