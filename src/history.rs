use serde::{Deserialize, Serialize};

use crate::session::result::HistoryEntry;

/// Append-only log of completed sessions, oldest first. No deduplication
/// and no size cap; entries are only removed by a full clear.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::result::SessionResult;

    fn entry(lesson: &str, correct: usize) -> HistoryEntry {
        HistoryEntry::from_result(
            lesson,
            SessionResult {
                correct_count: correct,
                total_count: 10,
            },
        )
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = HistoryLog::default();
        log.append(entry("a1", 3));
        log.append(entry("a2", 7));
        let all = log.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].lesson_id, "a1");
        assert_eq!(all[1].lesson_id, "a2");
    }

    #[test]
    fn test_appended_entry_is_last() {
        let mut log = HistoryLog::default();
        log.append(entry("a1", 3));
        let e = entry("a2", 9);
        log.append(e.clone());
        assert_eq!(log.all().last(), Some(&e));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut log = HistoryLog::default();
        let e = entry("a1", 3);
        log.append(e.clone());
        log.append(e);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_clear_all() {
        let mut log = HistoryLog::default();
        log.append(entry("a1", 3));
        log.clear_all();
        assert!(log.is_empty());
    }
}
