// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]

use std::env;
use std::process;

use basilisk::config::Config;
use basilisk::replay::ReplayEngine;
use basilisk::types::Direction;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'turn:move'", pair));
            }

            let turn = parts[0]
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", parts[0], e))?;
            let direction = ReplayEngine::parse_direction(parts[1])?;

            Ok((turn, vec![direction]))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(1);
    }

    let log_file = &args[1];
    let verbose = args.contains(&"--verbose".to_string());

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
        .unwrap_or("Snake.toml");

    let config = Config::from_file(config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {} - using hardcoded defaults", e);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(i) = args.iter().position(|a| a == "--validate") {
        let raw = args.get(i + 1).map(|s| s.as_str()).unwrap_or("");
        let expected = match parse_expected_moves(raw) {
            Ok(expected) => expected,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        match engine.validate_expected_moves(&entries, &expected) {
            Ok(()) => println!("All expected moves validated."),
            Err(e) => {
                eprintln!("Validation failed: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let results = if let Some(i) = args.iter().position(|a| a == "--turns") {
        let raw = args.get(i + 1).map(|s| s.as_str()).unwrap_or("");
        let turns = match parse_turns(raw) {
            Ok(turns) => turns,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        engine.replay_turns(&entries, &turns)
    } else {
        engine.replay_all(&entries)
    };

    match results {
        Ok(results) => engine.print_report(&results),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
