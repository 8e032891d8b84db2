use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use lineshift_engine::{BEST_RECORD_KEY, BestRecord, RecordStore};
use serde_json::{Map, Value};

/// Best-record store backed by a JSON file.
///
/// The file holds an object keyed by store identifier, so that several
/// records can share one file:
///
/// ```json
/// { "line-fixed-puzzle-v1": { "bestScore": 120, "bestTile": 6 } }
/// ```
///
/// Read and write failures never reach the game: a missing or corrupt
/// record loads as zeros and a failed save is logged.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> anyhow::Result<Option<Map<String, Value>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open record file: {}", self.path.display())
                });
            }
        };
        let entries = serde_json::from_reader(io::BufReader::new(file)).with_context(|| {
            format!("Failed to parse record file: {}", self.path.display())
        })?;
        Ok(Some(entries))
    }

    fn try_load(&self) -> anyhow::Result<Option<BestRecord>> {
        let Some(mut entries) = self.read_entries()? else {
            return Ok(None);
        };
        let Some(entry) = entries.remove(BEST_RECORD_KEY) else {
            return Ok(None);
        };
        let record = serde_json::from_value(entry).with_context(|| {
            format!(
                "Invalid {BEST_RECORD_KEY} entry in record file: {}",
                self.path.display()
            )
        })?;
        Ok(Some(record))
    }

    fn try_save(&self, record: &BestRecord) -> anyhow::Result<()> {
        // Keep entries written under other keys; a corrupt file is replaced.
        let mut entries = self.read_entries().unwrap_or_default().unwrap_or_default();
        entries.insert(BEST_RECORD_KEY.to_owned(), serde_json::to_value(record)?);

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create file: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &entries)
            .with_context(|| format!("Failed to write JSON to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&mut self) -> BestRecord {
        match self.try_load() {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                log::warn!("ignoring best record: {e:#}");
                BestRecord::default()
            }
        }
    }

    fn save(&mut self, record: &BestRecord) {
        if let Err(e) = self.try_save(record) {
            log::warn!("failed to save best record: {e:#}");
        }
    }
}
