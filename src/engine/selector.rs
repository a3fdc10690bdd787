use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::word_stats::{WordStat, WordStatsStore};
use crate::lesson::VocabularyEntry;

const HIGH_ACCURACY: f64 = 0.8;
const LOW_ACCURACY: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionFilter {
    #[default]
    All,
    /// Only words the learner has answered wrong at least once.
    WrongOnly,
}

/// Sampling weight for one word. New words and well-known words (accuracy
/// >= 0.8) get 1, shaky words (0.5..0.8) get 3, weak words (< 0.5) get 5.
/// The breakpoints are a contract, not a tunable.
pub fn weight(stat: Option<&WordStat>) -> u32 {
    match stat.and_then(|s| s.accuracy()) {
        None => 1,
        Some(acc) if acc >= HIGH_ACCURACY => 1,
        Some(acc) if acc >= LOW_ACCURACY => 3,
        Some(_) => 5,
    }
}

/// Build the question set for one session: filter, expand each candidate
/// `weight` times, shuffle the pool uniformly, truncate to `count`.
/// Repeats of a weak word in the result are intentional reinforcement.
pub fn build_set<R: Rng>(
    all_words: &[VocabularyEntry],
    count: usize,
    filter: SelectionFilter,
    stats: &WordStatsStore,
    rng: &mut R,
) -> Vec<VocabularyEntry> {
    let mut pool: Vec<&VocabularyEntry> = Vec::new();
    for word in all_words {
        let keep = match filter {
            SelectionFilter::All => true,
            SelectionFilter::WrongOnly => stats.has_wrong(&word.id),
        };
        if keep {
            for _ in 0..weight(stats.get(&word.id)) {
                pool.push(word);
            }
        }
    }

    pool.shuffle(rng);
    pool.truncate(count);
    pool.into_iter().cloned().collect()
}
