//! In-memory store bridging the parse phase and the AI phase.
//!
//! A batch parse captures each file's code text; a later per-file AI request
//! looks it up by filename instead of re-uploading the file.
//!
//! Semantics:
//! - one slot: `Empty` until the first batch, then `Populated` with exactly
//!   the latest batch (no merge, no versioning, no TTL);
//! - `populate` swaps the whole mapping under a write lock, so concurrent
//!   batches are applied one at a time and the last one to take the lock wins;
//!   every swap bumps a generation counter that makes the order observable;
//! - within one batch, a repeated filename keeps its last record;
//! - lookups take a read lock and never observe a half-written batch.
//!
//! Create one per process and share it through application state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::models::{ParsedFileRecord, SourceFile};

/// Code text captured for one file, plus whatever the parser attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry {
    pub filename: String,
    pub code: String,
    pub metadata: Map<String, Value>,
}

impl From<ParsedFileRecord> for CacheEntry {
    fn from(r: ParsedFileRecord) -> Self {
        Self {
            filename: r.filename,
            code: r.file_content,
            metadata: r.metadata,
        }
    }
}

impl From<SourceFile> for CacheEntry {
    fn from(f: SourceFile) -> Self {
        let mut metadata = Map::new();
        if let Some(path) = f.relative_path {
            metadata.insert("relative_path".into(), Value::String(path));
        }
        Self {
            filename: f.filename,
            code: f.content,
            metadata,
        }
    }
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Populated {
        generation: u64,
        entries: Arc<HashMap<String, CacheEntry>>,
    },
}

/// Observable state of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    /// 0 while empty, then incremented by every populate.
    pub generation: u64,
    /// Sorted filenames of the current batch.
    pub filenames: Vec<String>,
}

/// Process-wide, single-slot filename → code text store.
#[derive(Debug, Default)]
pub struct ResultStore {
    slot: RwLock<Slot>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole mapping with `entries`; returns the new generation.
    pub async fn populate<I>(&self, entries: I) -> u64
    where
        I: IntoIterator<Item = CacheEntry>,
    {
        // Build outside the lock; only the swap is serialized.
        let map: HashMap<String, CacheEntry> = entries
            .into_iter()
            .map(|e| (e.filename.clone(), e))
            .collect();
        let count = map.len();
        let entries = Arc::new(map);

        let mut slot = self.slot.write().await;
        let generation = match &*slot {
            Slot::Empty => 1,
            Slot::Populated { generation, .. } => generation + 1,
        };
        *slot = Slot::Populated {
            generation,
            entries,
        };
        drop(slot);

        info!(generation, files = count, "result store populated");
        generation
    }

    /// Populates from structural-analyzer records.
    pub async fn populate_from_parsed(&self, records: Vec<ParsedFileRecord>) -> u64 {
        self.populate(records.into_iter().map(CacheEntry::from)).await
    }

    /// Code text captured for `filename` by the latest batch.
    ///
    /// # Errors
    /// [`AnalyzerError::NotFound`] if the store is empty or the latest batch
    /// did not contain `filename`.
    pub async fn lookup(&self, filename: &str) -> AnalyzerResult<String> {
        self.entry(filename).await.map(|e| e.code)
    }

    /// Full entry captured for `filename` by the latest batch.
    pub async fn entry(&self, filename: &str) -> AnalyzerResult<CacheEntry> {
        let entries = match &*self.slot.read().await {
            Slot::Empty => None,
            Slot::Populated { entries, .. } => Some(Arc::clone(entries)),
        };
        match entries.as_ref().and_then(|m| m.get(filename)) {
            Some(e) => Ok(e.clone()),
            None => {
                debug!(%filename, "result store miss");
                Err(AnalyzerError::NotFound(filename.to_string()))
            }
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        match &*self.slot.read().await {
            Slot::Empty => StoreSnapshot {
                generation: 0,
                filenames: Vec::new(),
            },
            Slot::Populated {
                generation,
                entries,
            } => {
                let mut filenames: Vec<String> = entries.keys().cloned().collect();
                filenames.sort();
                StoreSnapshot {
                    generation: *generation,
                    filenames,
                }
            }
        }
    }
}
