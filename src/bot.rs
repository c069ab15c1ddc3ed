// Bot orchestration: phase pick, depth pick, depth-0 pre-scores, search
// invocation and response assembly. The decision core itself is the
// synchronous `decide`, which the move endpoint runs on the blocking pool
// and the replay tooling calls directly.

use log::{info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::budget::BudgetStore;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::eval::evaluate;
use crate::moves::safe_moves;
use crate::profiles::{board_density_pct, select_profile, Phase};
use crate::search::choose_move;
use crate::sim::advance_frozen;
use crate::types::{Battlesnake, Board, Direction, Game, GameState, MoveDecision};

/// Everything the move endpoint needs to report about one decision
#[derive(Debug, Clone, Copy)]
pub struct DecisionReport {
    pub decision: MoveDecision,
    pub phase: Phase,
    pub depth: u8,
}

/// Battlesnake bot with methods corresponding to the API endpoints
pub struct Bot {
    config: Config,
    budgets: BudgetStore,
    debug_logger: DebugLogger,
}

impl Bot {
    pub fn new(config: Config) -> Self {
        let debug_logger = DebugLogger::from_config(&config.debug);
        let budgets = BudgetStore::new(config.timing.fallback_budget_ms);
        Bot {
            config,
            budgets,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "basilisk",
            "color": "#2E8B57",
            "head": "fang",
            "tail": "coil",
            "version": env!("CARGO_PKG_VERSION"),
        })
    }

    /// Called when a game starts: derives and stores the game's budget
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        let budget = self.config.timing.compute_budget(game.timeout as u64);
        self.budgets.set(&game.id, budget);
        info!(
            "GAME START {} (timeout {}ms, budget {}ms)",
            game.id, game.timeout, budget
        );
    }

    /// Called when a game ends: erases the stored budget
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        self.budgets.clear(&game.id);
        info!("GAME OVER {}", game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The deadline is fixed before anything else happens; the search runs on
    /// the blocking pool so the async reactor keeps serving other games.
    pub async fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();
        let budget = self.budgets.lookup(&game.id);
        let deadline = start_time + Duration::from_millis(budget);

        let state = GameState {
            game: game.clone(),
            turn: *turn,
            board: board.clone(),
            you: you.clone(),
        };

        let config = self.config.clone();
        let state_for_search = state.clone();
        let report = tokio::task::spawn_blocking(move || {
            decide(&state_for_search, &config, deadline)
        })
        .await
        .unwrap_or_else(|e| {
            warn!("Search task failed ({}), forced up", e);
            DecisionReport {
                decision: MoveDecision {
                    direction: Direction::Up,
                    score: f64::NEG_INFINITY,
                },
                phase: Phase::Late,
                depth: 0,
            }
        });

        let chosen = report.decision.direction;
        info!(
            "Turn {}: {} (score {:.1}, phase {:?}, depth {}, {}ms of {}ms)",
            turn,
            chosen.as_str(),
            report.decision.score,
            report.phase,
            report.depth,
            start_time.elapsed().as_millis(),
            budget
        );

        self.debug_logger.log_move(&state, &report);

        json!({ "move": chosen.as_str() })
    }
}

/// Synchronous decision core: profile, depth, depth-0 pre-scores, search.
pub fn decide(state: &GameState, config: &Config, deadline: Instant) -> DecisionReport {
    let (phase, profile) = select_profile(state, &config.phase);
    let depth = pick_depth(state, config);

    // One-ply evaluations against the selected profile; these feed the
    // convergence-aware tie-breaker.
    let depth0_scores: Vec<(Direction, f64)> = safe_moves(&state.board, &state.you)
        .into_iter()
        .map(|dir| {
            let child = advance_frozen(state, dir);
            (dir, evaluate(&child, &profile).score)
        })
        .collect();

    let decision = choose_move(
        state,
        depth,
        &profile,
        &depth0_scores,
        deadline,
        &config.search,
    );

    crate::simple_profiler::merge_thread_local();

    DecisionReport {
        decision,
        phase,
        depth,
    }
}

/// Depth guideline by board situation; the deadline still rules the search.
fn pick_depth(state: &GameState, config: &Config) -> u8 {
    let alive = state.board.alive_count();
    if alive <= 1 {
        return config.search.solo_depth;
    }
    if alive == 2 {
        return config.search.duel_depth;
    }
    if board_density_pct(state) > config.search.crowded_density_pct {
        return config.search.crowded_depth;
    }
    config.search.default_depth
}
