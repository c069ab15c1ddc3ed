//! Safe-move generation properties
//!
//! Every returned direction must place the head in-bounds and off every
//! snake's non-tail body, and no qualifying direction may be omitted. The
//! tail-vacation rule is load-bearing for both move generation and flood
//! fill, so it gets its own cases.

use basilisk::moves::safe_moves;
use basilisk::types::{Battlesnake, Board, Coord, Direction};

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let cells: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: String::new(),
        health: 90,
        head: cells[0],
        length: cells.len() as i32,
        body: cells,
        latency: String::new(),
        shout: None,
    }
}

fn board(snakes: Vec<Battlesnake>) -> Board {
    Board {
        width: 11,
        height: 11,
        food: vec![],
        hazards: vec![],
        snakes,
    }
}

/// Brute-force check of the safe-move definition for one direction
fn is_safe_by_definition(b: &Board, s: &Battlesnake, dir: Direction) -> bool {
    let next = dir.apply(&s.head);
    if next.x < 0 || next.x >= b.width || next.y < 0 || next.y >= b.height {
        return false;
    }
    for other in &b.snakes {
        let solid = &other.body[..other.body.len() - 1];
        if solid.contains(&next) {
            return false;
        }
    }
    true
}

#[test]
fn test_safe_moves_match_definition_across_positions() {
    // Slide our head over the whole board with a fixed opponent and compare
    // against the brute-force definition
    let them = snake("them", &[(6, 6), (6, 5), (6, 4), (5, 4)]);

    for x in 0..11 {
        for y in 0..11 {
            // Skip positions colliding with the opponent outright
            if them.body.contains(&Coord { x, y }) {
                continue;
            }
            let neck_y = if y > 0 { y - 1 } else { y + 1 };
            let us = snake("us", &[(x, y), (x, neck_y)]);
            let b = board(vec![us.clone(), them.clone()]);

            let produced = safe_moves(&b, &us);
            for dir in Direction::all() {
                let expected = is_safe_by_definition(&b, &us, dir);
                assert_eq!(
                    produced.contains(&dir),
                    expected,
                    "mismatch at ({}, {}) going {}",
                    x,
                    y,
                    dir.as_str()
                );
            }
        }
    }
}

#[test]
fn test_own_tail_is_a_legal_destination() {
    // Chasing our own tail in a tight loop: the tail cell vacates
    let us = snake("us", &[(5, 5), (5, 6), (6, 6), (6, 5)]);
    let b = board(vec![us.clone()]);

    let moves = safe_moves(&b, &us);
    assert!(moves.contains(&Direction::Right), "tail cell should be safe");
}

#[test]
fn test_opponent_tail_is_a_legal_destination() {
    let us = snake("us", &[(4, 5), (3, 5)]);
    let them = snake("them", &[(5, 7), (5, 6), (5, 5)]);
    let b = board(vec![us.clone(), them]);

    let moves = safe_moves(&b, &us);
    assert!(moves.contains(&Direction::Right));
}

#[test]
fn test_opponent_mid_body_is_not() {
    let us = snake("us", &[(4, 6), (3, 6)]);
    let them = snake("them", &[(5, 7), (5, 6), (5, 5)]);
    let b = board(vec![us.clone(), them]);

    let moves = safe_moves(&b, &us);
    assert!(!moves.contains(&Direction::Right));
}

#[test]
fn test_order_is_deterministic() {
    let us = snake("us", &[(5, 5)]);
    let b = board(vec![us.clone()]);

    let moves = safe_moves(&b, &us);
    assert_eq!(
        moves,
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right
        ]
    );
}

#[test]
fn test_trapped_snake_yields_empty_set() {
    let us = snake("us", &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)]);
    let b = board(vec![us.clone()]);
    assert!(safe_moves(&b, &us).is_empty());
}
