//! Turn orchestration and session state.
//!
//! This module drives the pure board operations from [`crate::core`] through
//! complete turns:
//!
//! - [`GameSession`] - Session state, turn sequencing and best-record persistence
//! - [`GameStats`] - Score, max tile and turn counters of one game
//! - [`BestRecord`] / [`RecordStore`] - Cross-session best values and their storage
//! - [`TileRng`] / [`TileSeed`] - Seedable randomness for tile spawns
//! - [`spawn_tile`] - Spawn policy placing one tile per turn
//!
//! # Game Flow
//!
//! 1. Start a [`GameSession`]; two tiles are spawned on the empty board
//! 2. Select a row or column
//! 3. Shift it one step; the leading tile falls off, the trailing cell empties
//! 4. Equal neighbours merge in chained rounds with a growing multiplier
//! 5. One tile spawns; if no cell is empty the game is over
//!
//! # Example
//!
//! ```
//! use lineshift_engine::{Direction, GameSession, LineKind, MemoryStore};
//!
//! let mut session = GameSession::new(None, MemoryStore::new());
//!
//! session.set_selected_line(LineKind::Row, 0).unwrap();
//! // Rejected turns leave the session unchanged.
//! _ = session.try_execute_turn(Direction::Up);
//! assert_eq!(session.stats().turn(), 0);
//!
//! let report = session.try_execute_turn(Direction::Right).unwrap();
//! println!("{}", report.status);
//! ```

pub use self::{best_record::*, game_session::*, game_stats::*, spawn::*, tile_rng::*};

mod best_record;
mod game_session;
mod game_stats;
mod spawn;
mod tile_rng;
