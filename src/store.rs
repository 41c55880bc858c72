use crate::config::StoreParams;
use crate::error::DrResult;
use crate::keybinds::{KeybindTable, KeybindsRecord};
use crate::sequences::{Sequence, SequenceBook};
use crate::stats::{SequenceStats, StatsBook};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Persistence for the three records the engine consumes.
///
/// Loads never fail: unreadable or malformed data is logged and replaced by
/// the empty default. Saves replace the whole record in one write.
pub trait Store {
    fn load_keybinds(&self) -> KeybindTable;
    fn load_sequences(&self) -> SequenceBook;
    fn load_stats(&self) -> StatsBook;

    fn save_keybinds(&mut self, table: &KeybindTable) -> DrResult<()>;
    fn save_sequences(&mut self, book: &SequenceBook) -> DrResult<()>;
    fn save_stats(&mut self, book: &StatsBook) -> DrResult<()>;
}

/// A directory holding `keybinds`, `sequences` and `playStats` as JSON files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    keybinds_path: PathBuf,
    sequences_path: PathBuf,
    stats_path: PathBuf,
}

impl JsonStore {
    pub fn new(params: &StoreParams) -> Self {
        Self {
            keybinds_path: params.keybinds_path(),
            sequences_path: params.sequences_path(),
            stats_path: params.stats_path(),
        }
    }

    /// Store rooted at `dir` with the default file names.
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        let params = StoreParams {
            data_dir: dir.as_ref().to_string_lossy().into_owned(),
            ..StoreParams::default()
        };
        Self::new(&params)
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    if !path.exists() {
        debug!("No {} file at '{}'", what, path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Failed to parse {} from '{}': {}", what, path.display(), e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read {} from '{}': {}", what, path.display(), e);
            None
        }
    }
}

/// Serializes into a sibling temp file, then renames it over `path`.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> DrResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer(&mut tmp, value)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Per-entry stats load: one bad record is dropped, the rest survive.
fn stats_from_value(value: serde_json::Value) -> StatsBook {
    let mut book = StatsBook::new();
    let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_value(value) {
        Ok(map) => map,
        Err(e) => {
            warn!("Stats record is not an object, starting empty: {}", e);
            return book;
        }
    };

    for (name, raw) in entries {
        match serde_json::from_value::<SequenceStats>(raw) {
            Ok(stats) => book.insert(&name, stats),
            Err(e) => warn!("Dropping unreadable stats for '{}': {}", name, e),
        }
    }
    book
}

impl Store for JsonStore {
    fn load_keybinds(&self) -> KeybindTable {
        read_json::<KeybindsRecord>(&self.keybinds_path, "keybinds")
            .map(|r| KeybindTable::from_record(&r))
            .unwrap_or_default()
    }

    fn load_sequences(&self) -> SequenceBook {
        read_json::<Vec<Sequence>>(&self.sequences_path, "sequences")
            .map(|v| v.into_iter().collect())
            .unwrap_or_default()
    }

    fn load_stats(&self) -> StatsBook {
        read_json::<serde_json::Value>(&self.stats_path, "stats")
            .map(stats_from_value)
            .unwrap_or_default()
    }

    fn save_keybinds(&mut self, table: &KeybindTable) -> DrResult<()> {
        write_json_atomic(&self.keybinds_path, &table.to_record())
    }

    fn save_sequences(&mut self, book: &SequenceBook) -> DrResult<()> {
        write_json_atomic(&self.sequences_path, book)
    }

    fn save_stats(&mut self, book: &StatsBook) -> DrResult<()> {
        write_json_atomic(&self.stats_path, book)
    }
}

/// In-memory store. Keeps the last saved stats and counts stats writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub keybinds: KeybindTable,
    pub sequences: SequenceBook,
    pub stats: StatsBook,
    pub stats_writes: usize,
}

impl MemoryStore {
    pub fn new(keybinds: KeybindTable, sequences: SequenceBook) -> Self {
        Self {
            keybinds,
            sequences,
            ..Self::default()
        }
    }
}

impl Store for MemoryStore {
    fn load_keybinds(&self) -> KeybindTable {
        self.keybinds.clone()
    }

    fn load_sequences(&self) -> SequenceBook {
        self.sequences.clone()
    }

    fn load_stats(&self) -> StatsBook {
        self.stats.clone()
    }

    fn save_keybinds(&mut self, table: &KeybindTable) -> DrResult<()> {
        self.keybinds = table.clone();
        Ok(())
    }

    fn save_sequences(&mut self, book: &SequenceBook) -> DrResult<()> {
        self.sequences = book.clone();
        Ok(())
    }

    fn save_stats(&mut self, book: &StatsBook) -> DrResult<()> {
        self.stats = book.clone();
        self.stats_writes += 1;
        Ok(())
    }
}
