use std::path::PathBuf;

use lineshift_engine::TileSeed;

use crate::{
    command::play::app::PlayApp, record::RecordingSession, store::JsonFileStore, tui::Tui,
};

mod app;
mod screen;

const DEFAULT_RECORD_FILE: &str = "./data/best_record.json";
const DEFAULT_RECORD_DIR: &str = "./data/recordings/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed token for reproducible tile spawns
    #[clap(long)]
    seed: Option<TileSeed>,
    /// JSON file holding the best score and best tile
    #[clap(long, default_value = DEFAULT_RECORD_FILE)]
    record_file: PathBuf,
    /// Save the game recording to a file when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = DEFAULT_RECORD_DIR)]
    record_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            record_file: DEFAULT_RECORD_FILE.into(),
            save_recording: false,
            record_dir: DEFAULT_RECORD_DIR.into(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        record_file,
        save_recording,
        record_dir,
    } = arg;

    // Recordings can only be replayed from a seed.
    let seed = seed
        .clone()
        .or_else(|| save_recording.then(TileSeed::random));
    let store = JsonFileStore::new(record_file);
    log::info!("using best record file {}", store.path().display());

    let mut app = PlayApp::new(RecordingSession::new(seed, store));
    Tui::new().run(&mut app)?;

    if *save_recording && let Some(history) = app.into_session().into_history() {
        let path = history.save(record_dir)?;
        eprintln!("Saved recording to {}", path.display());
    }

    Ok(())
}
