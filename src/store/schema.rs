use serde::{Deserialize, Serialize};

use crate::engine::word_stats::WordStatsStore;
use crate::history::HistoryLog;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordStatsData {
    pub schema_version: u32,
    pub stats: WordStatsStore,
}

impl Default for WordStatsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats: WordStatsStore::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryData {
    pub schema_version: u32,
    pub history: HistoryLog,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            history: HistoryLog::default(),
        }
    }
}
