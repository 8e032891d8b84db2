use crate::core::board::{Board, Coord, Rank};

use super::tile_rng::TileRng;

/// Empty-cell count at or below which the board counts as crowded.
const CROWDED_EMPTY_CELLS: usize = 7;

/// A tile placed by the spawn policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub coord: Coord,
    pub rank: Rank,
}

/// Chooses the rank of a new tile from one uniform roll in `[0, 1)`.
///
/// | empty cells | rank 1      | rank 2        | rank 3     |
/// |-------------|-------------|---------------|------------|
/// | `<= 7`      | `< 0.80`    | `0.80..0.98`  | `>= 0.98`  |
/// | `> 7`       | `< 0.90`    | `>= 0.90`     | never      |
#[must_use]
pub fn spawn_rank(empty_count: usize, roll: f64) -> Rank {
    if empty_count <= CROWDED_EMPTY_CELLS {
        if roll < 0.8 {
            1
        } else if roll < 0.98 {
            2
        } else {
            3
        }
    } else if roll < 0.9 {
        1
    } else {
        2
    }
}

/// Places one new tile on a random empty cell.
///
/// Draws the cell first (`floor(roll × empty_count)` into the row-major list
/// of empty cells), then the rank via [`spawn_rank`] using the empty-cell
/// count from before the placement.
///
/// Returns `None` without drawing when the board has no empty cell.
pub fn spawn_tile(board: &mut Board, rng: &mut TileRng) -> Option<SpawnEvent> {
    let empties = board.empty_cells();
    if empties.is_empty() {
        return None;
    }

    let index = pick_index(rng.next_unit(), empties.len());
    let coord = empties[index];
    let rank = spawn_rank(empties.len(), rng.next_unit());
    board.set(coord, rank);

    Some(SpawnEvent { coord, rank })
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pick_index(roll: f64, len: usize) -> usize {
    // `min` guards against rounding pushing `roll × len` up to `len`.
    ((roll * len as f64).floor() as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use crate::TileSeed;

    use super::*;

    #[test]
    fn test_spawn_rank_thresholds_on_crowded_board() {
        assert_eq!(spawn_rank(7, 0.0), 1);
        assert_eq!(spawn_rank(7, 0.799), 1);
        assert_eq!(spawn_rank(7, 0.8), 2);
        assert_eq!(spawn_rank(7, 0.979), 2);
        assert_eq!(spawn_rank(7, 0.98), 3);
        assert_eq!(spawn_rank(1, 0.999), 3);
    }

    #[test]
    fn test_spawn_rank_thresholds_on_open_board() {
        assert_eq!(spawn_rank(8, 0.0), 1);
        assert_eq!(spawn_rank(8, 0.899), 1);
        assert_eq!(spawn_rank(8, 0.9), 2);
        assert_eq!(spawn_rank(25, 0.999), 2);
    }

    #[expect(clippy::cast_precision_loss)]
    fn rank_frequencies(empty_count: usize, samples: usize) -> [f64; 4] {
        let mut rng = TileRng::from_seed(&TileSeed::from_token("distribution"));
        let mut counts = [0_usize; 4];
        for _ in 0..samples {
            counts[usize::from(spawn_rank(empty_count, rng.next_unit()))] += 1;
        }
        counts.map(|count| count as f64 / samples as f64)
    }

    #[test]
    fn test_rank_distribution_on_open_board() {
        let freq = rank_frequencies(10, 200_000);
        assert!((freq[1] - 0.90).abs() < 0.01, "rank 1: {}", freq[1]);
        assert!((freq[2] - 0.10).abs() < 0.01, "rank 2: {}", freq[2]);
        assert_eq!(freq[3], 0.0);
    }

    #[test]
    fn test_rank_distribution_on_crowded_board() {
        let freq = rank_frequencies(5, 200_000);
        assert!((freq[1] - 0.80).abs() < 0.01, "rank 1: {}", freq[1]);
        assert!((freq[2] - 0.18).abs() < 0.01, "rank 2: {}", freq[2]);
        assert!((freq[3] - 0.02).abs() < 0.005, "rank 3: {}", freq[3]);
    }

    #[test]
    fn test_spawn_on_full_board_fails() {
        let mut board = Board::from_ascii(
            "
            1 2 1 2 1
            2 1 2 1 2
            1 2 1 2 1
            2 1 2 1 2
            1 2 1 2 1
            ",
        );
        let before = board;
        let mut rng = TileRng::from_seed(&TileSeed::from_token("1"));

        assert_eq!(spawn_tile(&mut board, &mut rng), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_spawn_fills_the_only_empty_cell() {
        let mut board = Board::from_ascii(
            "
            1 2 1 2 1
            2 1 2 1 2
            1 2 . 2 1
            2 1 2 1 2
            1 2 1 2 1
            ",
        );
        let mut rng = TileRng::from_seed(&TileSeed::from_token("1"));

        let event = spawn_tile(&mut board, &mut rng).unwrap();

        assert_eq!(event.coord, Coord::new(2, 2));
        assert!((1..=3).contains(&event.rank));
        assert_eq!(board.get(Coord::new(2, 2)), event.rank);
        assert!(board.is_full());
    }

    #[test]
    fn test_spawn_draws_cell_then_rank() {
        // Seed 1 draws 1015568748 / 2^32 ≈ 0.2365 for the cell, then
        // 1586005467 / 2^32 ≈ 0.3693 for the rank.
        let mut board = Board::EMPTY;
        let mut rng = TileRng::from_seed(&TileSeed::from_token("1"));

        let event = spawn_tile(&mut board, &mut rng).unwrap();

        // floor(0.2365 × 25) = 5 -> second row, first column.
        assert_eq!(event.coord, Coord::new(1, 0));
        assert_eq!(event.rank, 1);
    }

    #[test]
    fn test_pick_index_stays_in_bounds() {
        assert_eq!(pick_index(0.0, 25), 0);
        assert_eq!(pick_index(0.999_999_999_999, 25), 24);
        assert_eq!(pick_index(0.5, 1), 0);
    }
}
