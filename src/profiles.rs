// Weight profiles and game-phase selection
//
// A profile is a fully-populated, immutable set of enable flags, weights and
// thresholds for the evaluator. Profiles are a closed enumeration: the three
// phase profiles, the food-competition rewrite applied on top of them, the
// cheap deadline-escape profile and the fixed opponent-predictor profile.

use crate::config::PhaseConfig;
use crate::types::{Coord, GameState};

/// Game phase derived from turn, opponent count and board occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    /// Late when the board is crowded or the field has thinned out, Early
    /// while the opening lasts, Mid otherwise.
    pub fn select(turn: i32, opponents: usize, density_pct: i32, cfg: &PhaseConfig) -> Phase {
        if density_pct > cfg.crowd_density_pct {
            return Phase::Late;
        }
        if opponents <= cfg.few_opponents {
            return Phase::Late;
        }
        if turn <= cfg.early_turn_limit {
            return Phase::Early;
        }
        Phase::Mid
    }
}

/// Board occupancy as a percentage: total snake length over total cells.
pub fn board_density_pct(state: &GameState) -> i32 {
    let cells = state.board.width * state.board.height;
    if cells == 0 {
        return 0;
    }
    let total_length: i32 = state
        .board
        .snakes
        .iter()
        .filter(|s| s.health > 0)
        .map(|s| s.length)
        .sum();
    total_length * 100 / cells
}

/// Per-heuristic enable flags, weights and thresholds.
/// Immutable within a single decision.
#[derive(Debug, Clone)]
pub struct WeightProfile {
    // Hard safety terms, carried by every profile
    pub boundary_penalty: f64,
    pub self_collision_penalty: f64,
    pub head_to_head_win_bonus: f64,
    pub head_to_head_loss_penalty: f64,

    // Reachable area (flood fill)
    pub flood_fill_enabled: bool,
    pub flood_fill_weight: f64,

    // Adjacent-head caution
    pub adjacent_head_enabled: bool,
    pub adjacent_head_win_bonus: f64,
    pub adjacent_head_loss_penalty: f64,

    // Predictive head-collision danger (compensates frozen opponents)
    pub head_danger_enabled: bool,
    pub head_danger_win_bonus: f64,
    pub head_danger_loss_penalty: f64,

    // Center control / wall touch
    pub center_control_enabled: bool,
    pub center_control_bonus: f64,
    pub wall_touch_penalty: f64,
    pub center_control_turn_cutoff: i32,
    pub center_control_min_opponents: usize,

    // Food urgency and its safety check
    pub food_enabled: bool,
    pub food_weight: f64,
    pub health_threshold: i32,
    pub food_safety_enabled: bool,
    pub food_safety_penalty: f64,
    pub food_safety_area_ratio: f64,

    // Tail chase when space gets tight
    pub tail_chase_enabled: bool,
    pub tail_chase_weight: f64,
    pub tail_chase_space_factor: i32,

    // Sampled Voronoi control
    pub voronoi_enabled: bool,
    pub voronoi_weight: f64,

    // Competitive length pursuit
    pub length_enabled: bool,
    pub length_weight: f64,
    pub length_critical_weight: f64,
    pub length_lead_cutoff: i32,
}

impl WeightProfile {
    fn base() -> WeightProfile {
        WeightProfile {
            boundary_penalty: -10_000.0,
            self_collision_penalty: -10_000.0,
            head_to_head_win_bonus: 500.0,
            head_to_head_loss_penalty: -5_000.0,

            flood_fill_enabled: true,
            flood_fill_weight: 12.0,

            adjacent_head_enabled: true,
            adjacent_head_win_bonus: 150.0,
            adjacent_head_loss_penalty: -800.0,

            head_danger_enabled: true,
            head_danger_win_bonus: 300.0,
            head_danger_loss_penalty: -2_000.0,

            center_control_enabled: true,
            center_control_bonus: 50.0,
            wall_touch_penalty: -25.0,
            center_control_turn_cutoff: 75,
            center_control_min_opponents: 2,

            food_enabled: true,
            food_weight: 250.0,
            health_threshold: 30,
            food_safety_enabled: true,
            food_safety_penalty: -300.0,
            food_safety_area_ratio: 0.5,

            tail_chase_enabled: true,
            tail_chase_weight: 200.0,
            tail_chase_space_factor: 2,

            voronoi_enabled: false,
            voronoi_weight: 0.0,

            length_enabled: true,
            length_weight: 150.0,
            length_critical_weight: 300.0,
            length_lead_cutoff: 2,
        }
    }

    /// Opening: growth and food, no territory accounting yet.
    pub fn early_game() -> WeightProfile {
        WeightProfile {
            food_weight: 350.0,
            health_threshold: 35,
            ..Self::base()
        }
    }

    /// Mid game against a full field: positioning and Voronoi control,
    /// food only when hungry.
    pub fn mid_game() -> WeightProfile {
        WeightProfile {
            flood_fill_weight: 15.0,
            voronoi_enabled: true,
            voronoi_weight: 100.0,
            tail_chase_weight: 150.0,
            ..Self::base()
        }
    }

    /// Endgame or crowded board: survival. Space and tail chasing dominate,
    /// length competition is off.
    pub fn late_game() -> WeightProfile {
        WeightProfile {
            flood_fill_weight: 25.0,
            voronoi_enabled: true,
            voronoi_weight: 50.0,
            tail_chase_weight: 400.0,
            tail_chase_space_factor: 3,
            food_weight: 150.0,
            health_threshold: 25,
            length_enabled: false,
            ..Self::base()
        }
    }

    /// Deadline-escape profile: everything that walks the board is off.
    pub fn cheap() -> WeightProfile {
        WeightProfile {
            flood_fill_enabled: false,
            flood_fill_weight: 0.0,
            food_safety_enabled: false,
            tail_chase_enabled: false,
            voronoi_enabled: false,
            voronoi_weight: 0.0,
            length_enabled: false,
            ..Self::base()
        }
    }

    /// Fixed profile for the one-ply opponent predictor: safeties, space and
    /// hunger, plus a strong term against colliding with us. Strategic
    /// heuristics are off.
    pub fn predictor() -> WeightProfile {
        WeightProfile {
            flood_fill_weight: 10.0,
            head_danger_loss_penalty: -4_000.0,
            food_weight: 250.0,
            health_threshold: 40,
            food_safety_enabled: false,
            center_control_enabled: false,
            tail_chase_enabled: false,
            length_enabled: false,
            ..Self::base()
        }
    }

    /// Rewrites the profile for a contested-food board: forget territory,
    /// out-eat the field.
    pub fn apply_food_competition(&mut self) {
        self.voronoi_enabled = false;
        self.center_control_enabled = false;
        self.food_weight = 500.0;
        self.health_threshold = 50;
        self.length_enabled = true;
        self.length_weight = 300.0;
        self.length_critical_weight = 450.0;
    }
}

/// Detects boards where food is scarce and opponents sit closer to it than
/// we do. `food_per_snake` below the threshold plus an average opponent
/// food distance under ours counts as competition.
pub fn food_competition_detected(state: &GameState, cfg: &PhaseConfig) -> bool {
    let alive = state.board.alive_count();
    if alive == 0 || state.board.food.is_empty() {
        return false;
    }

    let food_per_snake = state.board.food.len() as f64 / alive as f64;
    if food_per_snake >= cfg.food_per_snake {
        return false;
    }

    let our_dist = nearest_food_distance(state, &state.you.head);
    let opponents: Vec<i32> = state
        .board
        .opponents_of(&state.you.id)
        .map(|opp| nearest_food_distance(state, &opp.head))
        .collect();
    if opponents.is_empty() {
        return false;
    }

    let avg_opp = opponents.iter().sum::<i32>() as f64 / opponents.len() as f64;
    avg_opp < our_dist as f64
}

fn nearest_food_distance(state: &GameState, from: &Coord) -> i32 {
    state
        .board
        .food
        .iter()
        .map(|f| from.manhattan_distance(f))
        .min()
        .unwrap_or(i32::MAX)
}

/// Picks the decision profile for this turn: phase profile first, then the
/// food-competition rewrite when the detector fires.
pub fn select_profile(state: &GameState, cfg: &PhaseConfig) -> (Phase, WeightProfile) {
    let opponents = state.board.opponents_of(&state.you.id).count();
    let density = board_density_pct(state);
    let phase = Phase::select(state.turn, opponents, density, cfg);

    let mut profile = match phase {
        Phase::Early => WeightProfile::early_game(),
        Phase::Mid => WeightProfile::mid_game(),
        Phase::Late => WeightProfile::late_game(),
    };

    if food_competition_detected(state, cfg) {
        profile.apply_food_competition();
    }

    (phase, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn cfg() -> PhaseConfig {
        Config::default_hardcoded().phase
    }

    #[test]
    fn test_phase_early() {
        assert_eq!(Phase::select(10, 4, 15, &cfg()), Phase::Early);
    }

    #[test]
    fn test_phase_mid() {
        assert_eq!(Phase::select(100, 3, 30, &cfg()), Phase::Mid);
    }

    #[test]
    fn test_phase_late_few_opponents() {
        assert_eq!(Phase::select(50, 2, 25, &cfg()), Phase::Late);
    }

    #[test]
    fn test_phase_late_crowded() {
        assert_eq!(Phase::select(90, 4, 45, &cfg()), Phase::Late);
    }

    #[test]
    fn test_early_profile_has_no_voronoi() {
        let p = WeightProfile::early_game();
        assert!(!p.voronoi_enabled);
        assert!(p.food_enabled);
    }

    #[test]
    fn test_late_profile_drops_length_competition() {
        let p = WeightProfile::late_game();
        assert!(!p.length_enabled);
        assert!(p.flood_fill_weight > WeightProfile::mid_game().flood_fill_weight);
        assert!(p.tail_chase_weight > WeightProfile::mid_game().tail_chase_weight);
    }

    #[test]
    fn test_cheap_profile_disables_board_walks() {
        let p = WeightProfile::cheap();
        assert!(!p.flood_fill_enabled);
        assert!(!p.voronoi_enabled);
        assert!(!p.tail_chase_enabled);
        // Safeties stay on
        assert!(p.boundary_penalty <= -1000.0);
        assert!(p.head_danger_enabled);
    }

    #[test]
    fn test_food_competition_rewrite() {
        let mut p = WeightProfile::mid_game();
        p.apply_food_competition();
        assert!(!p.voronoi_enabled);
        assert!(!p.center_control_enabled);
        assert!(p.food_weight >= 500.0);
        assert!(p.health_threshold >= 50);
    }
}
