use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use lineshift_engine::{
    Board, Direction, GameSession, GameStats, LineIndexOutOfRange, LineKind, LineSelector,
    RecordStore, TileSeed, TurnRejected, TurnReport,
};

use crate::schema::record::{RecordedAction, RecordedSession};

/// A wrapper around [`GameSession`] that records every accepted command.
///
/// This type provides the same gameplay API as `GameSession`, but keeps the
/// list of turns and resets for later replay. Use
/// [`into_history`](Self::into_history) to extract the recorded history
/// after the game ends.
#[derive(Debug)]
pub struct RecordingSession<S> {
    session: GameSession<S>,
    actions: Vec<RecordedAction>,
}

/// Provides read-only access to the underlying `GameSession`.
///
/// `DerefMut` must not be implemented: turns and resets have to go through
/// `RecordingSession` to be recorded.
impl<S> Deref for RecordingSession<S> {
    type Target = GameSession<S>;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl<S> RecordingSession<S>
where
    S: RecordStore,
{
    pub fn new(seed: Option<TileSeed>, store: S) -> Self {
        Self {
            session: GameSession::new(seed, store),
            actions: vec![],
        }
    }

    /// Consumes the session and returns the recorded history.
    ///
    /// Returns `None` for unseeded sessions, which cannot be replayed.
    pub fn into_history(self) -> Option<SessionHistory> {
        let seed = self.session.seed()?.clone();
        Some(SessionHistory {
            seed,
            final_stats: *self.session.stats(),
            final_board: *self.session.board(),
            actions: self.actions,
        })
    }

    pub fn set_selected_line(
        &mut self,
        kind: LineKind,
        index: usize,
    ) -> Result<(), LineIndexOutOfRange> {
        self.session.set_selected_line(kind, index)
    }

    pub fn select_line(&mut self, line: LineSelector) {
        self.session.select_line(line);
    }

    pub fn try_execute_turn(&mut self, direction: Direction) -> Result<TurnReport, TurnRejected> {
        let report = self.session.try_execute_turn(direction)?;
        self.actions.push(RecordedAction::Turn {
            line: report.line,
            direction,
        });
        Ok(report)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.actions.push(RecordedAction::Reset);
    }
}

/// Recorded history of a game session.
///
/// Contains everything needed to replay the session: the seed token and the
/// accepted commands. Created by [`RecordingSession::into_history`].
#[derive(Debug)]
pub struct SessionHistory {
    seed: TileSeed,
    final_stats: GameStats,
    final_board: Board,
    actions: Vec<RecordedAction>,
}

impl SessionHistory {
    pub fn to_recorded(&self) -> RecordedSession {
        RecordedSession {
            recorded_at: Utc::now(),
            seed: self.seed.clone(),
            final_stats: self.final_stats,
            final_board: self.final_board,
            actions: self.actions.clone(),
        }
    }

    /// Saves the recorded session to a JSON file and returns its path.
    ///
    /// The filename is generated from the current timestamp:
    /// `lineshift_{YYYYMMDD_HHMMSS}.json`. The directory is created if it
    /// doesn't exist.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let data = self.to_recorded();
        let filename = format!("lineshift_{}.json", data.recorded_at.format("%Y%m%d_%H%M%S"));
        let filepath = record_dir.join(filename);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}
