use std::{collections::BTreeMap, path::PathBuf};

use lineshift_engine::{
    BOARD_SIZE, Direction, GameSession, GameStats, LineSelector, MemoryStore, Rank, TileSeed,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::util::Output;

const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Maximum number of turns per game
    #[arg(long, default_value_t = 500)]
    turns: usize,
    /// Seed token for tile spawning (game N uses "<SEED>-N")
    #[arg(long, default_value = "lineshift")]
    seed: String,
    /// Seed for the random line and direction choices
    #[arg(long, default_value_t = 0)]
    policy_seed: u64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct GameResult {
    game: usize,
    seed: TileSeed,
    game_over: bool,
    stats: GameStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Summary {
    games: usize,
    game_overs: usize,
    mean_score: f64,
    max_score: u64,
    mean_turns: f64,
    best_tile: Rank,
    longest_chain: usize,
    /// Number of games by their max tile.
    max_tile_counts: BTreeMap<Rank, usize>,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    summary: Summary,
    results: Vec<GameResult>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        turns,
        seed,
        policy_seed,
        output,
    } = arg;

    let mut policy = Pcg32::seed_from_u64(*policy_seed);
    let mut results = Vec::with_capacity(*games);
    for game in 0..*games {
        let tile_seed = TileSeed::from_token(&format!("{seed}-{game}"));
        results.push(play_game(game, tile_seed, *turns, &mut policy));
        if (game + 1) % PROGRESS_INTERVAL == 0 {
            eprintln!("Played {}/{games} games", game + 1);
        }
    }

    let summary = summarize(&results);
    eprintln!(
        "Mean score {:.1}, max score {}, best tile {}",
        summary.mean_score, summary.max_score, summary.best_tile
    );

    Output::save_json(&SimulationReport { summary, results }, output.clone())?;
    Ok(())
}

/// Plays one game with uniformly random lines and directions.
fn play_game(game: usize, seed: TileSeed, max_turns: usize, policy: &mut Pcg32) -> GameResult {
    let mut session = GameSession::new(Some(seed.clone()), MemoryStore::new());

    for _ in 0..max_turns {
        let direction = Direction::ALL[policy.random_range(0..Direction::ALL.len())];
        let index = policy.random_range(0..BOARD_SIZE);
        if let Ok(line) = LineSelector::new(direction.line_kind(), index) {
            session.select_line(line);
        }
        if session.try_execute_turn(direction).is_err() {
            break;
        }
    }

    GameResult {
        game,
        seed,
        game_over: session.session_state().is_game_over(),
        stats: *session.stats(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn summarize(results: &[GameResult]) -> Summary {
    let games = results.len();
    let mean = |total: f64| {
        if games == 0 {
            0.0
        } else {
            total / games as f64
        }
    };

    let mut max_tile_counts = BTreeMap::new();
    for result in results {
        *max_tile_counts.entry(result.stats.max_tile()).or_insert(0) += 1;
    }

    Summary {
        games,
        game_overs: results.iter().filter(|r| r.game_over).count(),
        mean_score: mean(results.iter().map(|r| r.stats.score() as f64).sum()),
        max_score: results.iter().map(|r| r.stats.score()).max().unwrap_or(0),
        mean_turns: mean(results.iter().map(|r| r.stats.turn() as f64).sum()),
        best_tile: results
            .iter()
            .map(|r| r.stats.max_tile())
            .max()
            .unwrap_or(0),
        longest_chain: results
            .iter()
            .map(|r| r.stats.longest_chain())
            .max()
            .unwrap_or(0),
        max_tile_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_game_is_reproducible() {
        let seed = TileSeed::from_token("sim-0");
        let a = play_game(0, seed.clone(), 200, &mut Pcg32::seed_from_u64(3));
        let b = play_game(0, seed, 200, &mut Pcg32::seed_from_u64(3));

        assert_eq!(a.stats, b.stats);
        assert_eq!(a.game_over, b.game_over);
    }

    #[test]
    fn test_play_game_stops_at_turn_limit() {
        let result = play_game(
            0,
            TileSeed::from_token("limit"),
            25,
            &mut Pcg32::seed_from_u64(1),
        );

        assert_eq!(result.stats.turn(), 25);
        assert!(!result.game_over);
        assert!(result.stats.max_tile() >= 1);
    }

    #[test]
    fn test_summarize() {
        let mut policy = Pcg32::seed_from_u64(7);
        let results: Vec<_> = (0..4)
            .map(|game| {
                let seed = TileSeed::from_token(&format!("sum-{game}"));
                play_game(game, seed, 30, &mut policy)
            })
            .collect();

        let summary = summarize(&results);

        assert_eq!(summary.games, 4);
        assert_eq!(summary.max_tile_counts.values().sum::<usize>(), 4);
        assert!((summary.mean_turns - 30.0).abs() < f64::EPSILON);
        assert_eq!(
            summary.max_score,
            results.iter().map(|r| r.stats.score()).max().unwrap()
        );
        assert!(summary.mean_score <= summary.max_score as f64);
    }

    #[test]
    fn test_summarize_no_games() {
        let summary = summarize(&[]);
        assert_eq!(summary.games, 0);
        assert!(summary.mean_score.abs() < f64::EPSILON);
        assert!(summary.max_tile_counts.is_empty());
    }
}
