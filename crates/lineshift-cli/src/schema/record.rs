use chrono::{DateTime, Utc};
use lineshift_engine::{Board, Direction, GameStats, LineSelector, TileSeed};
use serde::{Deserialize, Serialize};

/// Recorded play session with metadata for replay functionality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed token used for tile spawning
    pub seed: TileSeed,
    /// Final game statistics at the time of recording
    pub final_stats: GameStats,
    /// Board at the time of recording
    pub final_board: Board,
    /// Accepted commands in the order they were applied
    pub actions: Vec<RecordedAction>,
}

/// A command that changed the session.
///
/// Only accepted turns are recorded; rejected ones never touch the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordedAction {
    Turn {
        line: LineSelector,
        direction: Direction,
    },
    Reset,
}
