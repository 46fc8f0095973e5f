//! Ranked importance of a single feature slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance of one feature slot, resolved to its column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRecord {
    /// Position in the model's importance vector.
    pub raw_index: usize,
    /// Position under descending score order, starting from 0.
    pub rank: usize,
    /// Column name, if the attribute metadata covers this slot.
    pub name: Option<String>,
    /// Importance value as reported by the model, usually within 0-1.
    pub score: f64,
}

impl ImportanceRecord {
    pub fn new(raw_index: usize, name: Option<String>, score: f64, rank: usize) -> Self {
        Self {
            raw_index,
            rank,
            name,
            score,
        }
    }

    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

impl fmt::Display for ImportanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeatureInfo [rank={}, score={}, name={}]",
            self.rank,
            self.score,
            self.name_or("null")
        )
    }
}
