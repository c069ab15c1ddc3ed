// Heuristic evaluator
//
// Pure function of (state, profile). Returns the weighted sum over the
// enabled heuristics plus a per-heuristic breakdown for diagnostics. The
// flood fill from our head is computed at most once per evaluation and
// shared by every heuristic that needs it.

use crate::pathfind::{bfs_distance, flood_fill_count, sampled_voronoi};
use crate::profile;
use crate::profiles::WeightProfile;
use crate::types::{Battlesnake, Coord, GameState};

/// Per-heuristic score contributions. Zero means disabled or not triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub boundary: f64,
    pub self_collision: f64,
    pub head_to_head: f64,
    pub reachable_area: f64,
    pub adjacent_head: f64,
    pub head_collision_danger: f64,
    pub center_control: f64,
    pub food_urgency: f64,
    pub food_safety: f64,
    pub tail_chase: f64,
    pub voronoi: f64,
    pub competitive_length: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.boundary
            + self.self_collision
            + self.head_to_head
            + self.reachable_area
            + self.adjacent_head
            + self.head_collision_danger
            + self.center_control
            + self.food_urgency
            + self.food_safety
            + self.tail_chase
            + self.voronoi
            + self.competitive_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores the state from `state.you`'s perspective under `profile`.
pub fn evaluate(state: &GameState, profile: &WeightProfile) -> Evaluation {
    profile!("eval", {
        let you = &state.you;
        let board = &state.board;
        let head = you.head;
        let opponents: Vec<&Battlesnake> = board.opponents_of(&you.id).collect();

        let mut b = ScoreBreakdown::default();

        // 1. Wall
        if !board.in_bounds(&head) {
            b.boundary = profile.boundary_penalty;
        }

        // 2. Self collision (tail excluded, it vacates)
        let solid = you.body.len().saturating_sub(1);
        if solid > 1 && you.body[1..solid].contains(&head) {
            b.self_collision = profile.self_collision_penalty;
        }

        // 3. Occupied head-to-head
        for opp in &opponents {
            if opp.head == head {
                b.head_to_head += if you.length > opp.length {
                    profile.head_to_head_win_bonus
                } else {
                    profile.head_to_head_loss_penalty
                };
            }
        }

        // Shared flood fill from our head
        let our_area = if profile.flood_fill_enabled {
            Some(flood_fill_count(board, &head))
        } else {
            None
        };

        // 4. Reachable area
        if let Some(area) = our_area {
            b.reachable_area = area as f64 * profile.flood_fill_weight;
        }

        // 5. Adjacent-head caution
        if profile.adjacent_head_enabled {
            for opp in &opponents {
                if head.manhattan_distance(&opp.head) == 1 {
                    b.adjacent_head += if you.length > opp.length {
                        profile.adjacent_head_win_bonus
                    } else {
                        profile.adjacent_head_loss_penalty
                    };
                }
            }
        }

        // 6. Predictive head-collision danger: the opponent may step onto our
        // head cell next turn even though the simulator froze it.
        if profile.head_danger_enabled {
            for opp in &opponents {
                let reachable = crate::types::Direction::all()
                    .iter()
                    .any(|d| d.apply(&opp.head) == head);
                if reachable {
                    b.head_collision_danger += if you.length > opp.length {
                        profile.head_danger_win_bonus
                    } else {
                        profile.head_danger_loss_penalty
                    };
                }
            }
        }

        // 7. Center control early with a crowd, wall aversion otherwise
        if profile.center_control_enabled {
            let center_x = board.width / 2;
            let center_y = board.height / 2;
            let in_center =
                (head.x - center_x).abs() <= 2 && (head.y - center_y).abs() <= 2;
            let early_crowd = state.turn <= profile.center_control_turn_cutoff
                && opponents.len() >= profile.center_control_min_opponents;

            if early_crowd && in_center {
                b.center_control = profile.center_control_bonus;
            } else if head.x == 0
                || head.x == board.width - 1
                || head.y == 0
                || head.y == board.height - 1
            {
                b.center_control = profile.wall_touch_penalty;
            }
        }

        let hungry = profile.food_enabled
            && you.health < profile.health_threshold
            && !board.food.is_empty();

        // 8. Food urgency
        if hungry {
            if let Some(food) = nearest_food(board.food.as_slice(), &head) {
                let d = bfs_distance(board, &head, &food);
                if d >= 0 {
                    b.food_urgency = profile.food_weight / (1.0 + d as f64);
                }

                // 9. Food safety: don't starve into a pocket
                if profile.food_safety_enabled {
                    if let Some(area) = our_area {
                        let food_area = flood_fill_count(board, &food);
                        if (food_area as f64) < profile.food_safety_area_ratio * area as f64 {
                            b.food_safety = profile.food_safety_penalty;
                        }
                    }
                }
            }
        }

        // 10. Tail chase when healthy but boxed in
        if profile.tail_chase_enabled && !hungry {
            if let (Some(area), Some(tail)) = (our_area, you.body.last()) {
                let constrained =
                    (area as i32) < you.length * profile.tail_chase_space_factor;
                if constrained {
                    let d = head.manhattan_distance(tail);
                    b.tail_chase = profile.tail_chase_weight / (1.0 + d as f64);
                }
            }
        }

        // 11. Sampled Voronoi control
        if profile.voronoi_enabled && !opponents.is_empty() {
            let heads: Vec<Coord> = opponents.iter().map(|o| o.head).collect();
            let (won, sample) = sampled_voronoi(board, &head, &heads);
            if sample > 0 {
                b.voronoi = won as f64 / sample as f64 * profile.voronoi_weight;
            }
        }

        // 12. Competitive length: pursue food only while the lead is small
        if profile.length_enabled
            && you.health >= profile.health_threshold
            && !board.food.is_empty()
        {
            let longest_opp = opponents.iter().map(|o| o.length).max().unwrap_or(0);
            if you.length < longest_opp + profile.length_lead_cutoff {
                let weight = if you.length < longest_opp {
                    profile.length_critical_weight
                } else {
                    profile.length_weight
                };
                if let Some(food) = nearest_food(board.food.as_slice(), &head) {
                    let d = head.manhattan_distance(&food);
                    b.competitive_length = weight / (1.0 + d as f64);
                }
            }
        }

        Evaluation {
            score: b.total(),
            breakdown: b,
        }
    })
}

fn nearest_food(food: &[Coord], from: &Coord) -> Option<Coord> {
    food.iter()
        .min_by_key(|f| from.manhattan_distance(f))
        .copied()
}
