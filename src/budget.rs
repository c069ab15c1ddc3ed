// Per-game time-budget store
//
// Written once at game start, read on every move, erased at game end. A
// lookup without a prior set yields the configured fallback, never an error,
// so a restarted server keeps answering moves for games it never saw start.

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug)]
pub struct BudgetStore {
    budgets: Mutex<HashMap<String, u64>>,
    fallback_ms: u64,
}

impl BudgetStore {
    pub fn new(fallback_ms: u64) -> Self {
        BudgetStore {
            budgets: Mutex::new(HashMap::new()),
            fallback_ms,
        }
    }

    pub fn set(&self, game_id: &str, budget_ms: u64) {
        self.budgets
            .lock()
            .expect("budget store poisoned")
            .insert(game_id.to_string(), budget_ms);
    }

    pub fn lookup(&self, game_id: &str) -> u64 {
        self.budgets
            .lock()
            .expect("budget store poisoned")
            .get(game_id)
            .copied()
            .unwrap_or(self.fallback_ms)
    }

    pub fn clear(&self, game_id: &str) {
        self.budgets
            .lock()
            .expect("budget store poisoned")
            .remove(game_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_round_trip() {
        let store = BudgetStore::new(450);
        let timing = Config::default_hardcoded().timing;

        store.set("game-1", timing.compute_budget(500));
        assert_eq!(store.lookup("game-1"), 425);

        store.clear("game-1");
        assert_eq!(store.lookup("game-1"), 450);
    }

    #[test]
    fn test_miss_yields_fallback() {
        let store = BudgetStore::new(450);
        assert_eq!(store.lookup("never-started"), 450);
    }

    #[test]
    fn test_games_are_isolated() {
        let store = BudgetStore::new(450);
        store.set("a", 100);
        store.set("b", 200);
        assert_eq!(store.lookup("a"), 100);
        assert_eq!(store.lookup("b"), 200);
        store.clear("a");
        assert_eq!(store.lookup("a"), 450);
        assert_eq!(store.lookup("b"), 200);
    }
}
