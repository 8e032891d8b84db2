use super::board::{Board, CellMask, Coord, Rank};

/// A single merge performed by the chain-merge resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    /// Cell that was absorbed and became empty.
    pub from: Coord,
    /// Cell that received the merged tile.
    pub to: Coord,
    /// Rank of the merged tile.
    pub rank: Rank,
    /// 1-based round in which the merge happened.
    pub round: usize,
    /// Score earned by this merge (`rank × (round + 1)`).
    pub gain: u64,
}

/// Outcome of resolving every merge reachable from a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub board: Board,
    /// Number of rounds that produced at least one merge.
    pub chain_count: usize,
    /// Total score earned across all rounds.
    pub gain: u64,
    /// Highest rank formed by a merge (`0` when nothing merged).
    pub max_rank: Rank,
    /// Cells that received a merged tile in any round.
    pub merged_cells: CellMask,
    /// Every merge in the order it was found.
    pub events: Vec<MergeEvent>,
}

impl MergeResult {
    /// Score multiplier applied to merges in `round`.
    #[must_use]
    pub const fn multiplier(round: usize) -> u64 {
        round as u64 + 1
    }
}

/// Resolves chained merges until the board is stable.
///
/// Each round scans the board as it stood at the start of the round in
/// row-major order. A non-empty cell absorbs an equal neighbour below it, or
/// failing that an equal neighbour to its right; a cell takes part in at most
/// one merge per round. All merges of a round are then applied at once: the
/// absorbed cell empties and the surviving cell goes up one rank. Rounds
/// repeat until one finds nothing to merge.
///
/// Each merge scores `new_rank × (round + 1)`, so later rounds of a chain
/// are worth more. Tiles already at `Rank::MAX` never merge.
///
/// # Example
///
/// ```
/// use lineshift_engine::{Board, resolve_merges};
///
/// let board = Board::from_rows([
///     [1, 1, 2, 2, 0],
///     [0; 5],
///     [0; 5],
///     [0; 5],
///     [0; 5],
/// ]);
///
/// let result = resolve_merges(board);
/// assert_eq!(result.board.rows()[0], [2, 0, 3, 0, 0]);
/// assert_eq!(result.chain_count, 1);
/// assert_eq!(result.gain, 2 * 2 + 3 * 2);
/// ```
#[must_use]
pub fn resolve_merges(mut board: Board) -> MergeResult {
    let mut chain_count = 0;
    let mut gain = 0;
    let mut max_rank = 0;
    let mut merged_cells = CellMask::EMPTY;
    let mut events = Vec::new();

    loop {
        let pairs = find_round_merges(&board);
        if pairs.is_empty() {
            break;
        }

        chain_count += 1;
        let multiplier = MergeResult::multiplier(chain_count);
        for (from, to) in pairs {
            let rank = board.get(to) + 1;
            let merge_gain = u64::from(rank) * multiplier;
            board.set(from, 0);
            board.set(to, rank);
            gain += merge_gain;
            max_rank = max_rank.max(rank);
            merged_cells.insert(to);
            events.push(MergeEvent {
                from,
                to,
                rank,
                round: chain_count,
                gain: merge_gain,
            });
        }
    }

    MergeResult {
        board,
        chain_count,
        gain,
        max_rank,
        merged_cells,
        events,
    }
}

/// Finds the `(from, to)` pairs merged in one round, without applying them.
fn find_round_merges(board: &Board) -> Vec<(Coord, Coord)> {
    let mut merged = CellMask::EMPTY;
    let mut pairs = Vec::new();

    for to in Coord::all() {
        let rank = board.get(to);
        if rank == 0 || rank == Rank::MAX || merged.contains(to) {
            continue;
        }

        let partner = [to.below(), to.right()]
            .into_iter()
            .flatten()
            .find(|&other| board.get(other) == rank && !merged.contains(other));
        if let Some(from) = partner {
            merged.insert(to);
            merged.insert(from);
            pairs.push((from, to));
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_board_is_unchanged() {
        let board = Board::from_ascii(
            "
            1 2 1 2 1
            2 1 2 1 2
            1 2 1 2 1
            2 1 2 1 2
            1 2 1 2 .
            ",
        );

        let result = resolve_merges(board);

        assert_eq!(result.board, board);
        assert_eq!(result.chain_count, 0);
        assert_eq!(result.gain, 0);
        assert_eq!(result.max_rank, 0);
        assert!(result.merged_cells.is_empty());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_independent_pairs_merge_in_one_round() {
        let board = Board::from_ascii(
            "
            1 1 2 2 .
            . . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        assert_eq!(result.board.rows()[0], [2, 0, 3, 0, 0]);
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.gain, 10);
        assert_eq!(result.max_rank, 3);
        assert_eq!(
            result.events,
            vec![
                MergeEvent {
                    from: Coord::new(0, 1),
                    to: Coord::new(0, 0),
                    rank: 2,
                    round: 1,
                    gain: 4,
                },
                MergeEvent {
                    from: Coord::new(0, 3),
                    to: Coord::new(0, 2),
                    rank: 3,
                    round: 1,
                    gain: 6,
                },
            ]
        );
    }

    #[test]
    fn test_vertical_triple_merges_top_pair_only() {
        let board = Board::from_ascii(
            "
            1 . . . .
            1 . . . .
            1 . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        assert_eq!(
            result.board,
            Board::from_ascii(
                "
                2 . . . .
                . . . . .
                1 . . . .
                . . . . .
                . . . . .
                ",
            )
        );
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.gain, 4);
    }

    #[test]
    fn test_below_takes_priority_over_right() {
        let board = Board::from_ascii(
            "
            1 1 . . .
            1 . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        // (0,0) absorbs (1,0); the right neighbour keeps its tile.
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].from, Coord::new(1, 0));
        assert_eq!(result.events[0].to, Coord::new(0, 0));
        assert_eq!(result.board.rows()[0], [2, 1, 0, 0, 0]);
        assert_eq!(result.board.rows()[1], [0; 5]);
    }

    #[test]
    fn test_chain_uses_increasing_multiplier() {
        let board = Board::from_ascii(
            "
            2 1 . . .
            . 1 . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        // Round 1: (0,1) absorbs (1,1) -> rank 2, gain 2 * 2.
        // Round 2: (0,0) absorbs (0,1) -> rank 3, gain 3 * 3.
        assert_eq!(result.chain_count, 2);
        assert_eq!(result.gain, 4 + 9);
        assert_eq!(result.max_rank, 3);
        assert_eq!(result.board.rows()[0], [3, 0, 0, 0, 0]);
        assert_eq!(result.board.empty_count(), 24);
        assert_eq!(
            result.events.iter().map(|e| e.round).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(result.merged_cells.contains(Coord::new(0, 0)));
        assert!(result.merged_cells.contains(Coord::new(0, 1)));
    }

    #[test]
    fn test_merged_cell_cannot_absorb_twice_in_a_round() {
        let board = Board::from_ascii(
            "
            1 1 1 1 1
            . . . . .
            . . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        // Round 1: (0,0)<-(0,1), (0,2)<-(0,3); (0,4) stays.
        // Round 2: none of [2, 0, 2, 0, 1] are adjacent-equal.
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.board.rows()[0], [2, 0, 2, 0, 1]);
        assert_eq!(result.gain, 8);
    }

    #[test]
    fn test_top_rank_pair_does_not_merge() {
        let board = Board::from_rows([
            [Rank::MAX, Rank::MAX, 0, 0, 0],
            [Rank::MAX, 0, 0, 0, 0],
            [0; 5],
            [0; 5],
            [0; 5],
        ]);

        let result = resolve_merges(board);

        assert_eq!(result.board, board);
        assert_eq!(result.chain_count, 0);
        assert_eq!(result.gain, 0);
    }

    #[test]
    fn test_merge_can_reach_top_rank() {
        let below_max = Rank::MAX - 1;
        let board = Board::from_rows([
            [below_max, below_max, 0, 0, 0],
            [0; 5],
            [0; 5],
            [0; 5],
            [0; 5],
        ]);

        let result = resolve_merges(board);

        assert_eq!(result.board.rows()[0], [Rank::MAX, 0, 0, 0, 0]);
        assert_eq!(result.chain_count, 1);
        assert_eq!(result.max_rank, Rank::MAX);
        assert_eq!(result.gain, u64::from(Rank::MAX) * 2);
    }

    #[test]
    fn test_merged_tile_merges_again_next_round() {
        let board = Board::from_ascii(
            "
            . . . . .
            1 2 . . .
            1 . . . .
            . . . . .
            . . . . .
            ",
        );

        let result = resolve_merges(board);

        assert_eq!(result.events[0].round, 1);
        assert_eq!(result.events[0].to, Coord::new(1, 0));
        assert_eq!(result.events[1].round, 2);
        assert_eq!(result.events[1].to, Coord::new(1, 0));
        assert_eq!(result.events[1].from, Coord::new(1, 1));
        assert_eq!(result.board.rows()[1], [3, 0, 0, 0, 0]);
        assert_eq!(result.gain, 2 * 2 + 3 * 3);
    }
}
