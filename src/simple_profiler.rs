//! Simple profiling macros using thread-local storage
//!
//! Lightweight timing instrumentation without changing function signatures.
//! Enable with environment variable: BATTLESNAKE_PROFILE=1

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

thread_local! {
    static MOVE_GEN_TIME: RefCell<u64> = RefCell::new(0);
    static MOVE_GEN_COUNT: RefCell<usize> = RefCell::new(0);

    static EVAL_TIME: RefCell<u64> = RefCell::new(0);
    static EVAL_COUNT: RefCell<usize> = RefCell::new(0);

    static FLOOD_FILL_TIME: RefCell<u64> = RefCell::new(0);
    static FLOOD_FILL_COUNT: RefCell<usize> = RefCell::new(0);

    static VORONOI_TIME: RefCell<u64> = RefCell::new(0);
    static VORONOI_COUNT: RefCell<usize> = RefCell::new(0);

    static APPLY_MOVE_TIME: RefCell<u64> = RefCell::new(0);
    static APPLY_MOVE_COUNT: RefCell<usize> = RefCell::new(0);

    static SEARCH_TIME: RefCell<u64> = RefCell::new(0);
    static SEARCH_COUNT: RefCell<usize> = RefCell::new(0);
    static ALPHA_BETA_CUTOFFS: RefCell<usize> = RefCell::new(0);
}

// Global aggregators
static GLOBAL_MOVE_GEN_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_MOVE_GEN_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_EVAL_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_EVAL_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_FLOOD_FILL_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_FLOOD_FILL_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_VORONOI_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_VORONOI_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_APPLY_MOVE_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_APPLY_MOVE_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_SEARCH_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_SEARCH_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_ALPHA_BETA_CUTOFFS: AtomicUsize = AtomicUsize::new(0);

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("BATTLESNAKE_PROFILE").is_ok()
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "move_gen" => {
                MOVE_GEN_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                MOVE_GEN_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "eval" => {
                EVAL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                EVAL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "flood_fill" => {
                FLOOD_FILL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                FLOOD_FILL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "voronoi" => {
                VORONOI_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                VORONOI_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "apply_move" => {
                APPLY_MOVE_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                APPLY_MOVE_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "search" => {
                SEARCH_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                SEARCH_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

#[inline]
pub fn record_alpha_beta_cutoff() {
    if is_profiling_enabled() {
        ALPHA_BETA_CUTOFFS.with(|c| *c.borrow_mut() += 1);
    }
}

/// Folds this thread's counters into the global aggregators and resets them.
/// Call once per decision from the thread that ran the search.
pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    let pairs: [(&'static std::thread::LocalKey<RefCell<u64>>, &AtomicU64); 6] = [
        (&MOVE_GEN_TIME, &GLOBAL_MOVE_GEN_TIME),
        (&EVAL_TIME, &GLOBAL_EVAL_TIME),
        (&FLOOD_FILL_TIME, &GLOBAL_FLOOD_FILL_TIME),
        (&VORONOI_TIME, &GLOBAL_VORONOI_TIME),
        (&APPLY_MOVE_TIME, &GLOBAL_APPLY_MOVE_TIME),
        (&SEARCH_TIME, &GLOBAL_SEARCH_TIME),
    ];
    for (local, global) in pairs {
        local.with(|t| {
            global.fetch_add(*t.borrow(), Ordering::Relaxed);
            *t.borrow_mut() = 0;
        });
    }

    let counts: [(&'static std::thread::LocalKey<RefCell<usize>>, &AtomicUsize); 7] = [
        (&MOVE_GEN_COUNT, &GLOBAL_MOVE_GEN_COUNT),
        (&EVAL_COUNT, &GLOBAL_EVAL_COUNT),
        (&FLOOD_FILL_COUNT, &GLOBAL_FLOOD_FILL_COUNT),
        (&VORONOI_COUNT, &GLOBAL_VORONOI_COUNT),
        (&APPLY_MOVE_COUNT, &GLOBAL_APPLY_MOVE_COUNT),
        (&SEARCH_COUNT, &GLOBAL_SEARCH_COUNT),
        (&ALPHA_BETA_CUTOFFS, &GLOBAL_ALPHA_BETA_CUTOFFS),
    ];
    for (local, global) in counts {
        local.with(|c| {
            global.fetch_add(*c.borrow(), Ordering::Relaxed);
            *c.borrow_mut() = 0;
        });
    }
}

fn line(label: &str, time_ns: u64, count: usize, total_ns: u64) {
    let ms = time_ns as f64 / 1_000_000.0;
    let pct = if total_ns > 0 {
        100.0 * time_ns as f64 / total_ns as f64
    } else {
        0.0
    };
    let avg_us = if count > 0 {
        time_ns as f64 / (count as f64 * 1000.0)
    } else {
        0.0
    };
    eprintln!(
        "  {:<16} {:>10.2}ms ({:>5.1}%) - {} calls, {:.2}µs avg",
        label, ms, pct, count, avg_us
    );
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    line(
        "Move Gen:",
        GLOBAL_MOVE_GEN_TIME.load(Ordering::Relaxed),
        GLOBAL_MOVE_GEN_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    line(
        "Evaluation:",
        GLOBAL_EVAL_TIME.load(Ordering::Relaxed),
        GLOBAL_EVAL_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    line(
        "Flood Fill:",
        GLOBAL_FLOOD_FILL_TIME.load(Ordering::Relaxed),
        GLOBAL_FLOOD_FILL_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    line(
        "Voronoi:",
        GLOBAL_VORONOI_TIME.load(Ordering::Relaxed),
        GLOBAL_VORONOI_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    line(
        "Apply Move:",
        GLOBAL_APPLY_MOVE_TIME.load(Ordering::Relaxed),
        GLOBAL_APPLY_MOVE_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    line(
        "Search:",
        GLOBAL_SEARCH_TIME.load(Ordering::Relaxed),
        GLOBAL_SEARCH_COUNT.load(Ordering::Relaxed),
        total_ns,
    );

    let cutoffs = GLOBAL_ALPHA_BETA_CUTOFFS.load(Ordering::Relaxed);
    eprintln!("\nAlpha-Beta Cutoffs: {}", cutoffs);
    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    GLOBAL_MOVE_GEN_TIME.store(0, Ordering::Relaxed);
    GLOBAL_MOVE_GEN_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_EVAL_TIME.store(0, Ordering::Relaxed);
    GLOBAL_EVAL_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_FLOOD_FILL_TIME.store(0, Ordering::Relaxed);
    GLOBAL_FLOOD_FILL_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_VORONOI_TIME.store(0, Ordering::Relaxed);
    GLOBAL_VORONOI_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_APPLY_MOVE_TIME.store(0, Ordering::Relaxed);
    GLOBAL_APPLY_MOVE_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_SEARCH_TIME.store(0, Ordering::Relaxed);
    GLOBAL_SEARCH_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_ALPHA_BETA_CUTOFFS.store(0, Ordering::Relaxed);
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
