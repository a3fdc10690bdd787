use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-word performance record. Created lazily on the first grading event
/// for a word; only removed by a full reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStat {
    pub shown: u32,
    pub wrong: u32,
}

impl WordStat {
    /// Fraction of times answered correctly, or None for a word never shown.
    pub fn accuracy(&self) -> Option<f64> {
        if self.shown == 0 {
            None
        } else {
            Some((self.shown - self.wrong) as f64 / self.shown as f64)
        }
    }
}

/// Per-word summary row for stats display, sorted by word id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsRow {
    pub id: String,
    pub correct: u32,
    pub wrong: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WordStatsStore {
    pub stats: HashMap<String, WordStat>,
}

impl WordStatsStore {
    pub fn get(&self, word_id: &str) -> Option<&WordStat> {
        self.stats.get(word_id)
    }

    /// Record one grading event. Not idempotent: every call stands for one
    /// real answer.
    pub fn record(&mut self, word_id: &str, was_correct: bool) {
        let stat = self.stats.entry(word_id.to_string()).or_default();
        stat.shown += 1;
        if !was_correct {
            stat.wrong += 1;
        }
    }

    pub fn has_wrong(&self, word_id: &str) -> bool {
        self.stats.get(word_id).is_some_and(|s| s.wrong > 0)
    }

    pub fn clear_all(&mut self) {
        self.stats.clear();
    }

    /// Holds iff every stat satisfies `wrong <= shown`. `record` maintains
    /// this; persisted data that fails it is treated as corrupt.
    pub fn is_consistent(&self) -> bool {
        self.stats.values().all(|s| s.wrong <= s.shown)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn summary(&self) -> Vec<StatsRow> {
        let mut rows: Vec<StatsRow> = self
            .stats
            .iter()
            .map(|(id, stat)| StatsRow {
                id: id.clone(),
                correct: stat.shown - stat.wrong,
                wrong: stat.wrong,
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }
}
