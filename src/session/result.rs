use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final tally of one completed session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub correct_count: usize,
    pub total_count: usize,
}

/// One row of the session history. Immutable once created; the log is
/// append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "lesson")]
    pub lesson_id: String,
    #[serde(alias = "correct")]
    pub correct_count: usize,
    #[serde(alias = "total")]
    pub total_count: usize,
}

impl HistoryEntry {
    pub fn from_result(lesson_id: &str, result: SessionResult) -> Self {
        Self {
            timestamp: Utc::now(),
            lesson_id: lesson_id.to_string(),
            correct_count: result.correct_count,
            total_count: result.total_count,
        }
    }
}
