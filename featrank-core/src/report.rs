//! Reporting helpers over a resolved importance list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::record::ImportanceRecord;

/// Resolved importance records, in the order they were returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportanceReport {
    pub records: Vec<ImportanceRecord>,
}

impl ImportanceReport {
    pub fn new(records: Vec<ImportanceRecord>) -> Self {
        Self { records }
    }

    /// The `n` most important features, best first.
    pub fn top(&self, n: usize) -> Vec<&ImportanceRecord> {
        let mut by_rank: Vec<_> = self.records.iter().collect();
        by_rank.sort_by_key(|r| r.rank);
        by_rank.into_iter().take(n).collect()
    }

    pub fn named(&self) -> impl Iterator<Item = &ImportanceRecord> {
        self.records.iter().filter(|r| r.name.is_some())
    }

    /// Slot indices the attribute metadata did not name.
    pub fn unresolved_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .filter(|r| r.name.is_none())
            .map(|r| r.raw_index)
            .collect()
    }

    /// Score by column name. Unnamed slots are keyed `feature_<index>`.
    ///
    /// When two records map to the same key, the first one in report order is
    /// kept and the later one is logged and left out.
    pub fn to_name_map(&self) -> HashMap<String, f64> {
        let mut map = HashMap::with_capacity(self.records.len());
        for r in &self.records {
            let key = r
                .name
                .clone()
                .unwrap_or_else(|| format!("feature_{}", r.raw_index));
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(r.score);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        key = %slot.key(),
                        raw_index = r.raw_index,
                        kept = *slot.get(),
                        dropped = r.score,
                        "Duplicate feature name in report; keeping the first score"
                    );
                }
            }
        }
        map
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<ImportanceRecord>> for ImportanceReport {
    fn from(records: Vec<ImportanceRecord>) -> Self {
        Self::new(records)
    }
}

impl fmt::Display for ImportanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>5}  {:>5}  {:>10}  name", "rank", "index", "score")?;
        for r in &self.records {
            writeln!(
                f,
                "{:>5}  {:>5}  {:>10.6}  {}",
                r.rank,
                r.raw_index,
                r.score,
                r.name_or("-")
            )?;
        }
        Ok(())
    }
}
