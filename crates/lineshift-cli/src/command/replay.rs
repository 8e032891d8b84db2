use std::path::PathBuf;

use anyhow::Context as _;
use lineshift_engine::{GameSession, MemoryStore};

use crate::{
    schema::record::{RecordedAction, RecordedSession},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_path: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { recording_path } = arg;

    let recording = util::read_recording_file(recording_path)?;
    eprintln!(
        "Replaying {} actions recorded at {} (seed: {})",
        recording.actions.len(),
        recording.recorded_at,
        recording.seed
    );

    let session = replay(&recording)?;
    let stats = session.stats();
    print!("{}", session.board());
    println!(
        "score: {}  max tile: {}  turns: {}  merges: {}  longest chain: {}",
        stats.score(),
        stats.max_tile(),
        stats.turn(),
        stats.total_merges(),
        stats.longest_chain()
    );

    verify(&recording, &session)?;
    eprintln!("Replay matches the recorded stats and board");
    Ok(())
}

/// Re-executes every recorded action on a fresh session.
///
/// The best record is kept in memory so that replays never touch the
/// player's record file.
fn replay(recording: &RecordedSession) -> anyhow::Result<GameSession> {
    let mut session = GameSession::new(Some(recording.seed.clone()), MemoryStore::new());
    for (i, action) in recording.actions.iter().enumerate() {
        match *action {
            RecordedAction::Turn { line, direction } => {
                session.select_line(line);
                session
                    .try_execute_turn(direction)
                    .with_context(|| format!("Action #{i} ({line} {direction}) was rejected"))?;
            }
            RecordedAction::Reset => session.reset(),
        }
    }
    Ok(session)
}

fn verify(recording: &RecordedSession, session: &GameSession) -> anyhow::Result<()> {
    let expected = &recording.final_stats;
    let actual = session.stats();
    anyhow::ensure!(
        actual == expected,
        "Replay diverged: recorded score {} / max tile {} / turn {}, replayed score {} / max tile {} / turn {}",
        expected.score(),
        expected.max_tile(),
        expected.turn(),
        actual.score(),
        actual.max_tile(),
        actual.turn(),
    );
    anyhow::ensure!(
        session.board() == &recording.final_board,
        "Replay diverged: recorded board\n{}replayed board\n{}",
        recording.final_board,
        session.board(),
    );
    Ok(())
}
