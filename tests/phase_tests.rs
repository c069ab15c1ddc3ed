//! Phase selection and profile rewrites on full game states

use std::collections::HashMap;

use basilisk::config::Config;
use basilisk::profiles::{board_density_pct, food_competition_detected, select_profile, Phase};
use basilisk::types::{Battlesnake, Board, Coord, Game, GameState};

fn snake(id: &str, head: (i32, i32), length: i32) -> Battlesnake {
    // Vertical body dropping from the head; length capped by the board edge
    let (x, y) = head;
    let body: Vec<Coord> = (0..length)
        .map(|i| Coord {
            x,
            y: (y - i).max(0),
        })
        .collect();
    Battlesnake {
        id: id.to_string(),
        name: String::new(),
        health: 90,
        head: Coord { x, y },
        length,
        body,
        latency: String::new(),
        shout: None,
    }
}

fn state_with(snakes: Vec<Battlesnake>, food: Vec<Coord>, turn: i32) -> GameState {
    let you = snakes[0].clone();
    GameState {
        game: Game {
            id: "phase".to_string(),
            ruleset: HashMap::new(),
            timeout: 500,
        },
        turn,
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
fn test_early_phase_on_open_board() {
    // Turn 10, four opponents, light occupancy
    let s = state_with(
        vec![
            snake("us", (5, 10), 3),
            snake("a", (0, 10), 4),
            snake("b", (2, 10), 4),
            snake("c", (8, 10), 4),
            snake("d", (10, 10), 3),
        ],
        vec![Coord { x: 5, y: 5 }; 9],
        10,
    );
    assert!(board_density_pct(&s) <= 20);

    let config = Config::default_hardcoded();
    let (phase, profile) = select_profile(&s, &config.phase);
    assert_eq!(phase, Phase::Early);
    assert!(!profile.voronoi_enabled);
}

#[test]
fn test_mid_phase_after_opening() {
    // Turn 100, three opponents, moderate occupancy
    let s = state_with(
        vec![
            snake("us", (5, 10), 9),
            snake("a", (0, 10), 9),
            snake("b", (2, 10), 9),
            snake("c", (8, 10), 9),
        ],
        vec![Coord { x: 5, y: 5 }; 9],
        100,
    );
    let density = board_density_pct(&s);
    assert!(density > 20 && density <= 40, "density was {}", density);

    let config = Config::default_hardcoded();
    let (phase, profile) = select_profile(&s, &config.phase);
    assert_eq!(phase, Phase::Mid);
    assert!(profile.voronoi_enabled);
}

#[test]
fn test_late_phase_with_few_opponents() {
    // Turn 50, two opponents, light occupancy: the field has thinned
    let s = state_with(
        vec![
            snake("us", (5, 10), 10),
            snake("a", (0, 10), 10),
            snake("b", (10, 10), 10),
        ],
        vec![Coord { x: 5, y: 5 }; 9],
        50,
    );

    let config = Config::default_hardcoded();
    let (phase, profile) = select_profile(&s, &config.phase);
    assert_eq!(phase, Phase::Late);
    assert!(!profile.length_enabled);
}

#[test]
fn test_late_phase_when_crowded() {
    // Turn 90, four opponents, heavy occupancy
    let s = state_with(
        vec![
            snake("us", (0, 10), 11),
            snake("a", (2, 10), 11),
            snake("b", (4, 10), 11),
            snake("c", (6, 10), 11),
            snake("d", (8, 10), 11),
        ],
        vec![Coord { x: 5, y: 5 }; 9],
        90,
    );
    assert!(board_density_pct(&s) > 40);

    let config = Config::default_hardcoded();
    let (phase, _) = select_profile(&s, &config.phase);
    assert_eq!(phase, Phase::Late);
}

#[test]
fn test_food_competition_rewrites_profile() {
    // One food for four snakes and the opponents sit right on top of it
    let s = state_with(
        vec![
            snake("us", (10, 10), 3),
            snake("a", (4, 5), 3),
            snake("b", (6, 5), 3),
            snake("c", (5, 6), 3),
        ],
        vec![Coord { x: 5, y: 4 }],
        30,
    );

    let config = Config::default_hardcoded();
    assert!(food_competition_detected(&s, &config.phase));

    let (_, profile) = select_profile(&s, &config.phase);
    assert!(!profile.voronoi_enabled);
    assert!(!profile.center_control_enabled);
    assert!(profile.food_weight >= 500.0);
}

#[test]
fn test_no_competition_with_plentiful_food() {
    let s = state_with(
        vec![
            snake("us", (10, 10), 3),
            snake("a", (4, 5), 3),
            snake("b", (6, 5), 3),
            snake("c", (5, 6), 3),
        ],
        vec![Coord { x: 5, y: 4 }; 8],
        30,
    );

    let config = Config::default_hardcoded();
    assert!(!food_competition_detected(&s, &config.phase));
}
