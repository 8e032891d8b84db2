use serde::{Deserialize, Serialize};

use crate::core::board::Rank;

/// Identifier under which the best record is stored.
pub const BEST_RECORD_KEY: &str = "line-fixed-puzzle-v1";

/// Best score and best tile across every session.
///
/// Serialized as the flat object `{"bestScore": n, "bestTile": n}`; missing
/// fields read as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRecord {
    #[serde(default)]
    pub best_score: u64,
    #[serde(default)]
    pub best_tile: Rank,
}

impl BestRecord {
    /// Folds in the current session values; both fields only ever grow.
    pub fn observe(&mut self, score: u64, max_tile: Rank) {
        self.best_score = self.best_score.max(score);
        self.best_tile = self.best_tile.max(max_tile);
    }
}

/// Durable storage for the [`BestRecord`].
///
/// Implementations never fail towards the caller: `load` falls back to
/// [`BestRecord::default`] when the record is absent or unreadable, and
/// `save` reports write failures through the `log` facade.
pub trait RecordStore {
    fn load(&mut self) -> BestRecord;
    fn save(&mut self, record: &BestRecord);
}

/// In-memory store used by tests and headless replays.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<BestRecord>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(record: BestRecord) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }

    /// Returns the last saved record, if any.
    #[must_use]
    pub fn record(&self) -> Option<BestRecord> {
        self.record
    }

    /// Returns how many times `save` was called.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl RecordStore for MemoryStore {
    fn load(&mut self) -> BestRecord {
        self.record.unwrap_or_default()
    }

    fn save(&mut self, record: &BestRecord) {
        self.record = Some(*record);
        self.saves += 1;
    }
}

impl<S> RecordStore for &mut S
where
    S: RecordStore + ?Sized,
{
    fn load(&mut self) -> BestRecord {
        (**self).load()
    }

    fn save(&mut self, record: &BestRecord) {
        (**self).save(record);
    }
}
