// Pathfinding primitives shared by the evaluator and the search pre-filter
//
// All three queries use the same passability rule as safe-move generation:
// in-bounds and off every snake's non-tail body cells.

use std::collections::VecDeque;

use crate::profile;
use crate::types::{Board, Coord, Direction};

fn cell_index(board: &Board, coord: &Coord) -> usize {
    (coord.y * board.width + coord.x) as usize
}

/// Counts the cells reachable from `start` with a 4-connected BFS.
/// The start cell itself is counted even when it is currently occupied,
/// since it is where the queried head would be.
pub fn flood_fill_count(board: &Board, start: &Coord) -> usize {
    profile!("flood_fill", {
        if !board.in_bounds(start) {
            return 0;
        }

        let mut visited = vec![false; (board.width * board.height) as usize];
        let mut queue = VecDeque::new();

        visited[cell_index(board, start)] = true;
        queue.push_back(*start);
        let mut count = 0usize;

        while let Some(cell) = queue.pop_front() {
            count += 1;

            for dir in Direction::all() {
                let next = dir.apply(&cell);
                if !board.in_bounds(&next) || board.is_blocked(&next) {
                    continue;
                }
                let idx = cell_index(board, &next);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    })
}

/// Shortest move count from `from` to `to` under the passability rule.
/// Returns -1 when the target is unreachable.
pub fn bfs_distance(board: &Board, from: &Coord, to: &Coord) -> i32 {
    if !board.in_bounds(from) || !board.in_bounds(to) {
        return -1;
    }
    if from == to {
        return 0;
    }

    let mut visited = vec![false; (board.width * board.height) as usize];
    let mut queue = VecDeque::new();

    visited[cell_index(board, from)] = true;
    queue.push_back((*from, 0));

    while let Some((cell, dist)) = queue.pop_front() {
        for dir in Direction::all() {
            let next = dir.apply(&cell);
            if next == *to {
                return dist + 1;
            }
            if !board.in_bounds(&next) || board.is_blocked(&next) {
                continue;
            }
            let idx = cell_index(board, &next);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back((next, dist + 1));
            }
        }
    }

    -1
}

/// Deterministic strategic sample for Voronoi control: the center cross at
/// stride 2 plus an even-stride grid, all in-bounds. Roughly 15-30 tiles on
/// tournament boards.
pub fn voronoi_sample_tiles(width: i32, height: i32) -> Vec<Coord> {
    let center_x = width / 2;
    let center_y = height / 2;
    let mut tiles: Vec<Coord> = Vec::new();

    let mut push = |c: Coord| {
        if c.x >= 0 && c.x < width && c.y >= 0 && c.y < height && !tiles.contains(&c) {
            tiles.push(c);
        }
    };

    let mut x = 0;
    while x < width {
        push(Coord { x, y: center_y });
        x += 2;
    }
    let mut y = 0;
    while y < height {
        push(Coord { x: center_x, y });
        y += 2;
    }

    // Grid stride grows with the board so the sample stays small
    let stride = 4.max(width.min(height) / 3);
    let mut gx = 2;
    while gx < width {
        let mut gy = 2;
        while gy < height {
            push(Coord { x: gx, y: gy });
            gy += stride;
        }
        gx += stride;
    }

    tiles
}

/// Counts sampled tiles strictly closer (Manhattan) to our head than to every
/// opponent head. Returns (tiles won, sample size). Distances ignore
/// passability; the sample trades accuracy for microsecond cost.
pub fn sampled_voronoi(board: &Board, our_head: &Coord, opponent_heads: &[Coord]) -> (usize, usize) {
    profile!("voronoi", {
        let tiles = voronoi_sample_tiles(board.width, board.height);
        let sample_size = tiles.len();

        let won = tiles
            .iter()
            .filter(|tile| {
                let ours = our_head.manhattan_distance(tile);
                opponent_heads
                    .iter()
                    .all(|opp| ours < opp.manhattan_distance(tile))
            })
            .count();

        (won, sample_size)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Battlesnake;

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

    fn empty_board() -> Board {
        Board {
            width: 11,
            height: 11,
            food: vec![],
            hazards: vec![],
            snakes: vec![],
        }
    }

    #[test]
    fn test_flood_fill_open_board() {
        let board = empty_board();
        assert_eq!(flood_fill_count(&board, &Coord { x: 5, y: 5 }), 121);
    }

    #[test]
    fn test_flood_fill_never_exceeds_board() {
        let mut board = empty_board();
        board.snakes.push(snake("s", &[(5, 5), (5, 4), (5, 3)]));
        for x in 0..11 {
            for y in 0..11 {
                let count = flood_fill_count(&board, &Coord { x, y });
                assert!(count <= 121);
            }
        }
    }

    #[test]
    fn test_flood_fill_is_deterministic() {
        let mut board = empty_board();
        board.snakes.push(snake("s", &[(2, 2), (2, 3), (3, 3)]));
        let start = Coord { x: 0, y: 0 };
        let first = flood_fill_count(&board, &start);
        for _ in 0..5 {
            assert_eq!(flood_fill_count(&board, &start), first);
        }
    }

    #[test]
    fn test_flood_fill_respects_walls_of_bodies() {
        // Vertical wall from y=0..=10 at x=5 (tail at (5,10) is passable, but
        // the wall is long enough that the left side is still sealed off
        // except through that single tail cell).
        let body: Vec<(i32, i32)> = (0..11).map(|y| (5, y)).collect();
        let mut board = empty_board();
        board.snakes.push(snake("wall", &body));

        let left = flood_fill_count(&board, &Coord { x: 0, y: 0 });
        // 5 columns free on the left plus the passable tail opening into the
        // right side
        assert!(left > 55);
        assert!(left <= 121 - 10);
    }

    #[test]
    fn test_bfs_distance_straight_line() {
        let board = empty_board();
        assert_eq!(
            bfs_distance(&board, &Coord { x: 0, y: 0 }, &Coord { x: 3, y: 0 }),
            3
        );
        assert_eq!(
            bfs_distance(&board, &Coord { x: 0, y: 0 }, &Coord { x: 0, y: 0 }),
            0
        );
    }

    #[test]
    fn test_bfs_distance_unreachable() {
        // Two snakes whose solid segments seal the full x=5 column; both
        // tails sit off the wall so the tail-vacation rule opens no gap.
        let mut board = empty_board();
        board
            .snakes
            .push(snake("a", &[(5, 10), (5, 9), (5, 8), (5, 7), (5, 6), (6, 6)]));
        board.snakes.push(snake(
            "b",
            &[(5, 5), (5, 4), (5, 3), (5, 2), (5, 1), (5, 0), (6, 0)],
        ));

        let d = bfs_distance(&board, &Coord { x: 0, y: 5 }, &Coord { x: 10, y: 5 });
        assert_eq!(d, -1);
    }

    #[test]
    fn test_voronoi_sample_is_deterministic_and_bounded() {
        let first = voronoi_sample_tiles(11, 11);
        let second = voronoi_sample_tiles(11, 11);
        assert_eq!(first, second);
        assert!(first.len() >= 15 && first.len() <= 30, "got {}", first.len());
        for tile in &first {
            assert!(tile.x >= 0 && tile.x < 11 && tile.y >= 0 && tile.y < 11);
        }
    }

    #[test]
    fn test_sampled_voronoi_favors_center() {
        let board = empty_board();
        let center = Coord { x: 5, y: 5 };
        let corner = Coord { x: 10, y: 10 };

        let (center_won, sample) = sampled_voronoi(&board, &center, &[corner]);
        let (corner_won, _) = sampled_voronoi(&board, &corner, &[center]);

        assert!(sample >= 15);
        assert!(center_won > corner_won);
    }

    #[test]
    fn test_sampled_voronoi_no_opponents_wins_all() {
        let board = empty_board();
        let (won, sample) = sampled_voronoi(&board, &Coord { x: 5, y: 5 }, &[]);
        assert_eq!(won, sample);
    }
}
