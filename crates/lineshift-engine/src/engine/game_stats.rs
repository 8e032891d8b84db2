use serde::{Deserialize, Serialize};

use crate::core::{board::Rank, merge::MergeResult};

/// Per-session statistics.
///
/// Tracks the values shown next to the board and recorded with replays:
///
/// - **Score**: sum of every merge gain
/// - **Max tile**: highest rank that appeared this session (spawned or merged)
/// - **Turn**: number of completed turns
/// - **Merges / longest chain**: merge bookkeeping across turns
///
/// # Example
///
/// ```
/// use lineshift_engine::{Board, GameStats, resolve_merges};
///
/// let board = Board::from_rows([[1, 1, 2, 2, 0], [0; 5], [0; 5], [0; 5], [0; 5]]);
/// let mut stats = GameStats::new();
/// stats.complete_turn(&resolve_merges(board));
///
/// assert_eq!(stats.score(), 10);
/// assert_eq!(stats.max_tile(), 3);
/// assert_eq!(stats.turn(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    max_tile: Rank,
    turn: usize,
    total_merges: usize,
    longest_chain: usize,
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            max_tile: 0,
            turn: 0,
            total_merges: 0,
            longest_chain: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn max_tile(&self) -> Rank {
        self.max_tile
    }

    #[must_use]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub const fn total_merges(&self) -> usize {
        self.total_merges
    }

    #[must_use]
    pub const fn longest_chain(&self) -> usize {
        self.longest_chain
    }

    /// Raises the running max tile to `rank` if it is higher.
    pub fn observe_tile(&mut self, rank: Rank) {
        self.max_tile = self.max_tile.max(rank);
    }

    /// Applies the merge phase of a completed turn.
    pub fn complete_turn(&mut self, merge: &MergeResult) {
        self.turn += 1;
        self.score += merge.gain;
        self.total_merges += merge.events.len();
        self.longest_chain = self.longest_chain.max(merge.chain_count);
        self.observe_tile(merge.max_rank);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, resolve_merges};

    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = GameStats::new();
        assert_eq!(stats, GameStats::default());
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.max_tile(), 0);
        assert_eq!(stats.turn(), 0);
    }

    #[test]
    fn test_complete_turn_accumulates() {
        let chain = Board::from_ascii(
            "
            2 1 . . .
            . 1 . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );
        let quiet = Board::from_ascii(
            "
            1 2 . . .
            . . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let mut stats = GameStats::new();
        stats.complete_turn(&resolve_merges(chain));
        stats.complete_turn(&resolve_merges(quiet));

        assert_eq!(stats.turn(), 2);
        assert_eq!(stats.score(), 13);
        assert_eq!(stats.max_tile(), 3);
        assert_eq!(stats.total_merges(), 2);
        assert_eq!(stats.longest_chain(), 2);
    }

    #[test]
    fn test_observe_tile_never_lowers() {
        let mut stats = GameStats::new();
        stats.observe_tile(4);
        stats.observe_tile(2);
        assert_eq!(stats.max_tile(), 4);
    }

    #[test]
    fn test_stats_serialization_roundtrip() {
        let mut stats = GameStats::new();
        stats.observe_tile(5);
        let serialized = serde_json::to_string(&stats).unwrap();
        let deserialized: GameStats = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, stats);
    }
}
