// Minimax search with alpha-beta pruning and deadline preemption
//
// Opponent moves are only branched for the nearest opponent and only in the
// first few maximizing plies (the opponent-simulation horizon); below that
// the simulator freezes opponents and the predictive head-collision
// heuristic carries the risk. The deadline check at every node entry and
// loop iteration guarantees termination: a preempted node falls through to
// the cheap evaluator instead of raising.

use log::warn;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::moves::safe_moves;
use crate::pathfind::flood_fill_count;
use crate::predictor::{nearest_opponent, ordered_opponent_moves};
use crate::profile;
use crate::profiles::WeightProfile;
use crate::sim::{advance_frozen, advance_with_opponent};
use crate::types::{Direction, GameState, MoveDecision};

/// Picks a move for `state.you` under `profile`, searching to `max_depth`
/// plies or until `deadline`, whichever comes first. `depth0_scores` are the
/// caller's one-ply evaluations used for convergence-aware tie-breaking.
pub fn choose_move(
    state: &GameState,
    max_depth: u8,
    profile: &WeightProfile,
    depth0_scores: &[(Direction, f64)],
    deadline: Instant,
    cfg: &SearchConfig,
) -> MoveDecision {
    profile!("search", {
        let candidates = safe_moves(&state.board, &state.you);

        if candidates.is_empty() {
            warn!(
                "Turn {}: no safe moves for {}, forced up",
                state.turn, state.you.id
            );
            return MoveDecision {
                direction: Direction::Up,
                score: f64::NEG_INFINITY,
            };
        }

        if candidates.len() == 1 {
            let direction = candidates[0];
            let score = depth0_score(depth0_scores, direction)
                .unwrap_or_else(|| evaluate(&advance_frozen(state, direction), profile).score);
            return MoveDecision { direction, score };
        }

        // Space filter: drop moves that flood-fill into less room than our own
        // body needs. If that kills every candidate, keep the unfiltered set;
        // moving beats freezing.
        let filtered: Vec<Direction> = candidates
            .iter()
            .copied()
            .filter(|&dir| {
                let child = advance_frozen(state, dir);
                flood_fill_count(&child.board, &child.you.head) >= state.you.length as usize
            })
            .collect();
        let candidates = if filtered.is_empty() {
            candidates
        } else {
            filtered
        };

        let opp_horizon = max_depth.min(cfg.opponent_sim_depth);

        let mut scored: Vec<(Direction, f64)> = Vec::with_capacity(candidates.len());
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        for dir in candidates {
            if Instant::now() >= deadline && !scored.is_empty() {
                break;
            }
            let value = score_our_move(
                state,
                dir,
                max_depth,
                alpha,
                beta,
                profile,
                opp_horizon,
                deadline,
                cfg,
            );
            alpha = alpha.max(value);
            scored.push((dir, value));
        }

        let mut best = scored[0];
        for &candidate in &scored[1..] {
            if better(candidate, best, depth0_scores, state, cfg) {
                best = candidate;
            }
        }

        MoveDecision {
            direction: best.0,
            score: best.1,
        }
    })
}

/// Value of one of our moves at a maximizing node. Inside the opponent
/// horizon the nearest opponent branches and we take its worst case;
/// otherwise opponents stay frozen.
#[allow(clippy::too_many_arguments)]
fn score_our_move(
    state: &GameState,
    dir: Direction,
    depth: u8,
    alpha: f64,
    beta: f64,
    profile: &WeightProfile,
    opp_horizon: u8,
    deadline: Instant,
    cfg: &SearchConfig,
) -> f64 {
    if opp_horizon > 0 {
        if let Some(opponent) = nearest_opponent(state) {
            let opponent_id = opponent.id.clone();
            let mut branches = ordered_opponent_moves(state, opponent);
            if branches.is_empty() {
                // Trapped opponent: forced, single branch
                branches.push(Direction::Up);
            }

            let mut worst = f64::INFINITY;
            let mut local_beta = beta;
            for opp_dir in branches {
                let child = advance_with_opponent(state, dir, &opponent_id, opp_dir);
                let value = minimax(
                    &child,
                    depth - 1,
                    false,
                    alpha,
                    local_beta,
                    profile,
                    opp_horizon - 1,
                    deadline,
                    cfg,
                );
                worst = worst.min(value);
                local_beta = local_beta.min(worst);
                if local_beta <= alpha {
                    crate::simple_profiler::record_alpha_beta_cutoff();
                    break;
                }
                if Instant::now() >= deadline {
                    break;
                }
            }
            return worst;
        }
    }

    let child = advance_frozen(state, dir);
    minimax(&child, depth - 1, false, alpha, beta, profile, 0, deadline, cfg)
}

#[allow(clippy::too_many_arguments)]
fn minimax(
    state: &GameState,
    depth: u8,
    maximizing: bool,
    mut alpha: f64,
    mut beta: f64,
    profile: &WeightProfile,
    opp_horizon: u8,
    deadline: Instant,
    cfg: &SearchConfig,
) -> f64 {
    // Deadline escape: cheapest possible leaf, guarantees termination
    if Instant::now() >= deadline {
        return evaluate(state, &WeightProfile::cheap()).score;
    }
    if depth == 0 {
        return evaluate(state, profile).score;
    }

    let candidates = safe_moves(&state.board, &state.you);
    if candidates.is_empty() {
        return evaluate(state, profile).score;
    }

    if maximizing {
        let mut best = f64::NEG_INFINITY;
        for dir in candidates {
            let value = score_our_move(
                state, dir, depth, alpha, beta, profile, opp_horizon, deadline, cfg,
            );
            best = best.max(value);
            alpha = alpha.max(best);
            if alpha >= beta {
                crate::simple_profiler::record_alpha_beta_cutoff();
                break;
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        best
    } else {
        // The minimizing ply is the move-order alternation of alpha-beta, not
        // an opponent turn; opponent moves branch explicitly above.
        let mut best = f64::INFINITY;
        for dir in candidates {
            let child = advance_frozen(state, dir);
            let value = minimax(
                &child,
                depth - 1,
                true,
                alpha,
                beta,
                profile,
                opp_horizon,
                deadline,
                cfg,
            );
            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                crate::simple_profiler::record_alpha_beta_cutoff();
                break;
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        best
    }
}

fn depth0_score(depth0_scores: &[(Direction, f64)], dir: Direction) -> Option<f64> {
    depth0_scores
        .iter()
        .find(|(d, _)| *d == dir)
        .map(|(_, s)| *s)
}

/// Convergence-aware comparison: clear minimax gaps win outright; scores
/// inside the tie window fall back to the depth-0 pre-score, which still
/// separates survival from suicide when deep scores converge; exact ties go
/// to the per-(snake, turn, move) bias.
fn better(
    a: (Direction, f64),
    b: (Direction, f64),
    depth0_scores: &[(Direction, f64)],
    state: &GameState,
    cfg: &SearchConfig,
) -> bool {
    if (a.1 - b.1).abs() >= cfg.tie_break_window {
        return a.1 > b.1;
    }

    let d0_a = depth0_score(depth0_scores, a.0);
    let d0_b = depth0_score(depth0_scores, b.0);
    if let (Some(d0_a), Some(d0_b)) = (d0_a, d0_b) {
        if (d0_a - d0_b).abs() > f64::EPSILON {
            return d0_a > d0_b;
        }
    }

    tie_bias(&state.you.id, state.turn, a.0) > tie_bias(&state.you.id, state.turn, b.0)
}

/// Deterministic bias that breaks symmetric ties differently for different
/// snake ids and turns, so identical snakes stop mirroring each other. The
/// (id, turn, move) triple hashes to a bucket in [0,100); the rank term keeps
/// the ordering total when buckets collide.
fn tie_bias(snake_id: &str, turn: i32, dir: Direction) -> f64 {
    let mut hasher = DefaultHasher::new();
    snake_id.hash(&mut hasher);
    turn.hash(&mut hasher);
    dir.rank().hash(&mut hasher);
    let bucket = (hasher.finish() % 100) as f64;
    bucket * 0.001 + dir.rank() as f64 * 0.0001
}
