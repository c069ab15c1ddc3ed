// Asynchronous JSONL move logging
//
// Fire-and-forget: each decision is serialised and appended from a spawned
// tokio task so the move response never waits on disk. The file is opened
// lazily on the first write.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::DecisionReport;
use crate::config::DebugConfig;
use crate::types::{Board, GameState};

/// One logged decision. The full board goes along so the replay tooling can
/// re-run the core on the exact state.
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    chosen_move: String,
    score: f64,
    phase: String,
    search_depth: u8,
    board: Board,
    our_id: String,
    timestamp: String,
}

#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    path: String,
    enabled: bool,
}

impl DebugLogger {
    pub fn from_config(config: &DebugConfig) -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            path: config.log_file_path.clone(),
            enabled: config.enabled,
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            path: String::new(),
            enabled: false,
        }
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    pub fn log_move(&self, state: &GameState, report: &DecisionReport) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            turn: state.turn,
            chosen_move: report.decision.direction.as_str().to_string(),
            score: report.decision.score,
            phase: format!("{:?}", report.phase),
            search_depth: report.depth,
            board: state.board.clone(),
            our_id: state.you.id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let file_handle = self.file.clone();
        let path = self.path.clone();

        tokio::spawn(async move {
            Self::write_entry(file_handle, path, entry).await;
        });
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, path: String, entry: DebugLogEntry) {
        let mut guard = file_handle.lock().await;

        if guard.is_none() {
            match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(file) => *guard = Some(file),
                Err(e) => {
                    error!("Failed to open debug log file '{}': {}", path, e);
                    return;
                }
            }
        }

        if let Some(file) = guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => error!("Failed to serialize debug log entry: {}", e),
            }
        }
    }
}
