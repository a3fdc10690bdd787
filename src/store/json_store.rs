use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::{Error, Result};
use crate::store::schema::{HistoryData, SCHEMA_VERSION, WordStatsData};

const WORD_STATS_FILE: &str = "word_stats.json";
const HISTORY_FILE: &str = "quiz_history.json";

/// JSON-file key-value persistence for word stats and session history.
/// Reads degrade: a missing, unreadable or unparsable file yields an empty
/// default (the session continues with all words treated as new) and the
/// corruption is logged. Only writes surface `Error::Persistence`.
///
/// Concurrent processes sharing the same data dir are last-write-wins.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadr");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .map_err(|e| Error::Persistence(format!("cannot create {base_dir:?}: {e}")))?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    warn!(file = name, error = %e, "stored data unparsable, starting empty");
                    T::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => T::default(),
            Err(e) => {
                warn!(file = name, error = %e, "stored data unreadable, starting empty");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let write = || -> std::io::Result<()> {
            let json = serde_json::to_string_pretty(data)?;
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };
        write().map_err(|e| Error::Persistence(format!("cannot save {name}: {e}")))
    }

    fn remove(&self, name: &str) -> Result<()> {
        match fs::remove_file(self.file_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Persistence(format!("cannot remove {name}: {e}"))),
        }
    }

    pub fn load_word_stats(&self) -> WordStatsData {
        let data: WordStatsData = self.load(WORD_STATS_FILE);
        if data.schema_version != SCHEMA_VERSION {
            warn!(
                found = data.schema_version,
                expected = SCHEMA_VERSION,
                "stale word stats schema, starting empty"
            );
            return WordStatsData::default();
        }
        // A parsable file can still carry counts no grading event produces
        // (wrong > shown). Treat it like any other corruption.
        if !data.stats.is_consistent() {
            warn!(
                file = WORD_STATS_FILE,
                "stored word stats violate wrong <= shown, starting empty"
            );
            return WordStatsData::default();
        }
        data
    }

    pub fn save_word_stats(&self, data: &WordStatsData) -> Result<()> {
        self.save(WORD_STATS_FILE, data)
    }

    pub fn clear_word_stats(&self) -> Result<()> {
        self.remove(WORD_STATS_FILE)
    }

    pub fn load_history(&self) -> HistoryData {
        let data: HistoryData = self.load(HISTORY_FILE);
        if data.schema_version != SCHEMA_VERSION {
            warn!(
                found = data.schema_version,
                expected = SCHEMA_VERSION,
                "stale history schema, starting empty"
            );
            return HistoryData::default();
        }
        data
    }

    pub fn save_history(&self, data: &HistoryData) -> Result<()> {
        self.save(HISTORY_FILE, data)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.remove(HISTORY_FILE)
    }
}
