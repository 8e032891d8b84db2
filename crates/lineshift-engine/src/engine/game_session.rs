use std::fmt;

use crate::{
    LineIndexOutOfRange, TurnRejected,
    core::{
        board::{Board, Direction, LineKind, LineSelector},
        merge::{MergeResult, resolve_merges},
        shift::{ShiftResult, shift_line},
    },
};

use super::{
    best_record::{BestRecord, MemoryStore, RecordStore},
    game_stats::GameStats,
    spawn::{SpawnEvent, spawn_tile},
    tile_rng::{TileRng, TileSeed},
};

/// Number of tiles placed on the empty board when a game starts.
const INITIAL_TILES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the next turn command.
    Idle,
    /// No empty cell was left for the spawn step; only [`GameSession::reset`] continues.
    GameOver,
}

/// Status message produced by the last turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnStatus {
    Neutral,
    /// The merge phase ran more than one round.
    Chain { chain_count: usize },
    GameOver,
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStatus::Neutral => Ok(()),
            TurnStatus::Chain { chain_count } => write!(
                f,
                "Chain {chain_count} / multiplier rule: round k merge scores new rank × (k+1)"
            ),
            TurnStatus::GameOver => f.write_str("Game over: no empty cells"),
        }
    }
}

/// Everything that happened during one turn, for rendering and recording.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub line: LineSelector,
    pub direction: Direction,
    pub shift: ShiftResult,
    pub merge: MergeResult,
    /// `None` when the board was full and the game ended.
    pub spawn: Option<SpawnEvent>,
    pub status: TurnStatus,
    pub stats: GameStats,
    pub best: BestRecord,
}

/// A game from start to game over, with best-record persistence.
///
/// `GameSession` owns the whole session state: board, statistics, selected
/// line, RNG, and the [`RecordStore`] holding the best record. Presentation
/// layers read it through the accessors and drive it with
/// [`set_selected_line`](Self::set_selected_line),
/// [`try_execute_turn`](Self::try_execute_turn) and [`reset`](Self::reset).
///
/// A turn runs to completion inside one `&mut self` call, so no other turn
/// can observe or interleave with a half-applied one.
///
/// # Turn sequence
///
/// 1. Shift the selected line one step (rejected if the direction does not
///    match the line orientation)
/// 2. Resolve chained merges and add their gain to the score
/// 3. Spawn a tile; if no cell is empty the session ends
/// 4. Update the best record and save it to the store
///
/// # Example
///
/// ```
/// use lineshift_engine::{Direction, GameSession, LineKind, MemoryStore, TileSeed};
///
/// let mut session = GameSession::new(Some(TileSeed::from_token("42")), MemoryStore::new());
/// assert_eq!(session.board().empty_count(), 23);
///
/// session.set_selected_line(LineKind::Column, 0).unwrap();
/// assert!(session.try_execute_turn(Direction::Left).is_err());
///
/// let report = session.try_execute_turn(Direction::Down).unwrap();
/// assert_eq!(session.stats().turn(), 1);
/// assert_eq!(session.best().best_score, report.stats.score());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<S = MemoryStore> {
    board: Board,
    stats: GameStats,
    best: BestRecord,
    selected_line: LineSelector,
    state: SessionState,
    status: TurnStatus,
    seed: Option<TileSeed>,
    rng: TileRng,
    store: S,
}

impl<S> GameSession<S>
where
    S: RecordStore,
{
    /// Starts a new session, loading the best record from `store`.
    ///
    /// With a seed, every spawn of the session is reproducible; without one
    /// the spawns come from the OS random source.
    pub fn new(seed: Option<TileSeed>, mut store: S) -> Self {
        let best = store.load();
        let rng = TileRng::new(seed.as_ref());
        let mut this = Self {
            board: Board::EMPTY,
            stats: GameStats::new(),
            best,
            selected_line: LineSelector::default(),
            state: SessionState::Idle,
            status: TurnStatus::Neutral,
            seed,
            rng,
            store,
        };
        this.reset();
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the live board, e.g. to set up a position for inspection.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn best(&self) -> &BestRecord {
        &self.best
    }

    #[must_use]
    pub fn selected_line(&self) -> LineSelector {
        self.selected_line
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn status(&self) -> TurnStatus {
        self.status
    }

    #[must_use]
    pub fn seed(&self) -> Option<&TileSeed> {
        self.seed.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_selected_line(
        &mut self,
        kind: LineKind,
        index: usize,
    ) -> Result<(), LineIndexOutOfRange> {
        self.selected_line = LineSelector::new(kind, index)?;
        Ok(())
    }

    pub fn select_line(&mut self, line: LineSelector) {
        self.selected_line = line;
    }

    /// Clears the board and score, spawns the initial tiles and leaves game over.
    ///
    /// The selected line, the RNG stream and the best record carry over.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.state = SessionState::Idle;
        self.status = TurnStatus::Neutral;
        for _ in 0..INITIAL_TILES {
            if let Some(spawn) = spawn_tile(&mut self.board, &mut self.rng) {
                self.stats.observe_tile(spawn.rank);
            }
        }
        log::info!(
            "new game (seed: {})",
            self.seed.as_ref().map_or("none", TileSeed::token)
        );
    }

    /// Plays one turn on the selected line.
    ///
    /// Rejected turns leave the session untouched; callers that only need
    /// the "silent no-op" behavior can discard the error.
    pub fn try_execute_turn(&mut self, direction: Direction) -> Result<TurnReport, TurnRejected> {
        if self.state.is_game_over() {
            return Err(TurnRejected::GameOver);
        }

        let line = self.selected_line;
        let shift = shift_line(&self.board, line, direction)
            .ok_or(TurnRejected::DirectionMismatch { line, direction })?;

        Ok(self.complete_turn(line, direction, shift))
    }

    fn complete_turn(
        &mut self,
        line: LineSelector,
        direction: Direction,
        shift: ShiftResult,
    ) -> TurnReport {
        let merge = resolve_merges(shift.board);
        self.board = merge.board;
        self.stats.complete_turn(&merge);

        let spawn = spawn_tile(&mut self.board, &mut self.rng);
        self.status = match spawn {
            Some(spawn) => {
                self.stats.observe_tile(spawn.rank);
                if merge.chain_count > 1 {
                    TurnStatus::Chain {
                        chain_count: merge.chain_count,
                    }
                } else {
                    TurnStatus::Neutral
                }
            }
            None => {
                self.state = SessionState::GameOver;
                TurnStatus::GameOver
            }
        };

        log::debug!(
            "turn {}: {line} {direction}, {} merges in {} rounds, +{}, spawn {:?}",
            self.stats.turn(),
            merge.events.len(),
            merge.chain_count,
            merge.gain,
            spawn
        );
        if self.state.is_game_over() {
            log::info!(
                "game over after {} turns, score {}",
                self.stats.turn(),
                self.stats.score()
            );
        }

        self.best.observe(self.stats.score(), self.stats.max_tile());
        self.store.save(&self.best);

        TurnReport {
            line,
            direction,
            shift,
            merge,
            spawn,
            status: self.status,
            stats: self.stats,
            best: self.best,
        }
    }
}
