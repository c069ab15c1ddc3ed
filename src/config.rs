// Configuration module for reading Snake.toml
// Timing, search and phase knobs live here; the evaluator's weight profiles
// are a closed enumeration in `profiles` and are not configurable at runtime.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub phase: PhaseConfig,
    pub debug: DebugConfig,
}

/// Timing and budget constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Engine timeout assumed when the start request never arrived
    pub default_timeout_ms: u64,
    /// Budget used when the store has no entry for the game
    pub fallback_budget_ms: u64,
    /// Minimum network/serialisation reserve subtracted from the timeout
    pub reserve_floor_ms: u64,
    /// Reserve as a percentage of the timeout, when larger than the floor
    pub reserve_pct: u64,
    /// Budgets never drop below this
    pub min_budget_ms: u64,
}

impl TimingConfig {
    /// Computation budget for a game: the engine timeout minus the larger of
    /// the flat reserve and the percentage reserve, floored at the minimum.
    pub fn compute_budget(&self, timeout_ms: u64) -> u64 {
        let reserve = self.reserve_floor_ms.max(timeout_ms * self.reserve_pct / 100);
        self.min_budget_ms.max(timeout_ms.saturating_sub(reserve))
    }
}

/// Search shape constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Minimax scores closer than this are considered converged and fall
    /// back to depth-0 tie-breaking
    pub tie_break_window: f64,
    /// Maximizing plies that branch on the nearest opponent's moves
    pub opponent_sim_depth: u8,
    /// Depth guidelines; the deadline is authoritative
    pub solo_depth: u8,
    pub duel_depth: u8,
    pub crowded_depth: u8,
    pub default_depth: u8,
    /// Board density above which the crowded depth applies
    pub crowded_density_pct: i32,
}

/// Phase selection thresholds
#[derive(Debug, Deserialize, Clone)]
pub struct PhaseConfig {
    pub early_turn_limit: i32,
    pub crowd_density_pct: i32,
    pub few_opponents: usize,
    pub food_per_snake: f64,
}

/// Debug logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback.
    /// This should match the constants defined in Snake.toml.
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                default_timeout_ms: 500,
                fallback_budget_ms: 450,
                reserve_floor_ms: 50,
                reserve_pct: 15,
                min_budget_ms: 25,
            },
            search: SearchConfig {
                tie_break_window: 50.0,
                opponent_sim_depth: 3,
                solo_depth: 10,
                duel_depth: 8,
                crowded_depth: 5,
                default_depth: 6,
                crowded_density_pct: 40,
            },
            phase: PhaseConfig {
                early_turn_limit: 75,
                crowd_density_pct: 40,
                few_opponents: 2,
                food_per_snake: 1.5,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "basilisk_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
