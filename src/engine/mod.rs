pub mod selector;
pub mod word_stats;
