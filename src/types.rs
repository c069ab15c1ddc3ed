// Battlesnake API types and board primitives
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

/// The four legal move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the canonical evaluation order
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// Applies this direction to a coordinate, yielding the next head cell
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord {
                x: coord.x,
                y: coord.y + 1,
            },
            Direction::Down => Coord {
                x: coord.x,
                y: coord.y - 1,
            },
            Direction::Left => Coord {
                x: coord.x - 1,
                y: coord.y,
            },
            Direction::Right => Coord {
                x: coord.x + 1,
                y: coord.y,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Stable rank used by the deterministic tie-breaker (up < down < left < right)
    pub fn rank(&self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// A chosen direction together with the score that justified it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub score: f64,
}

impl Board {
    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// True when the cell is covered by a snake body segment that will still
    /// be there next turn. Each snake's tail cell vacates on the next turn and
    /// is therefore passable.
    pub fn is_blocked(&self, coord: &Coord) -> bool {
        for snake in &self.snakes {
            if snake.health <= 0 || snake.body.is_empty() {
                continue;
            }
            let solid_len = snake.body.len().saturating_sub(1);
            if snake.body[..solid_len].contains(coord) {
                return true;
            }
        }
        false
    }

    /// Snakes other than `id` that are still alive
    pub fn opponents_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Battlesnake> {
        let id = id.to_string();
        self.snakes
            .iter()
            .filter(move |s| s.id != id && s.health > 0)
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.health > 0).count()
    }
}

impl GameState {
    /// Re-views the state from another snake's perspective. Used by the
    /// opponent predictor; the board is unchanged.
    pub fn as_snake(&self, snake: &Battlesnake) -> GameState {
        GameState {
            game: self.game.clone(),
            turn: self.turn,
            board: self.board.clone(),
            you: snake.clone(),
        }
    }
}
