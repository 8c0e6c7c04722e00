//! Checker configuration
//!
//! One config struct for the whole core; the defaults are the shipped product
//! policy (1000-char input cap, 5 history slots, 2-3 s mock latency).

use serde::{Deserialize, Serialize};

/// Storage key the history snapshot is persisted under.
pub const HISTORY_STORAGE_KEY: &str = "fact-check-history";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Maximum accepted input length, counted in characters.
    pub max_characters: usize,
    /// History capacity; the oldest entry is evicted beyond this.
    pub max_history_items: usize,
    /// Key the history snapshot is stored under.
    pub storage_key: String,
    /// Mock verdict source latency window, milliseconds.
    pub mock_delay_min_ms: u64,
    pub mock_delay_max_ms: u64,
    /// Mock confidence is drawn from [confidence_min, confidence_min + confidence_range).
    pub confidence_min: f64,
    pub confidence_range: f64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_characters: 1000,
            max_history_items: 5,
            storage_key: HISTORY_STORAGE_KEY.to_string(),
            mock_delay_min_ms: 2000,
            mock_delay_max_ms: 3000,
            confidence_min: 0.65,
            confidence_range: 0.30,
        }
    }
}
