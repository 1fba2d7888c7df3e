//! Execution result types.
//!
//! A backend reports one bitstring per trial ("memory" form). [`Counts`]
//! aggregates those into a histogram for callers that only care about
//! outcome frequencies.
//!
//! # Bitstring convention
//!
//! Character `i` counted from the **right** end of a bitstring is
//! classical bit `i`. Every backend must emit this convention; the path
//! decoder depends on it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A histogram of measurement outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from per-trial memory.
    pub fn from_memory(memory: &[String]) -> Self {
        let mut counts = Self::new();
        for outcome in memory {
            counts.insert(outcome.clone(), 1);
        }
        counts
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of a specific outcome.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent outcome, if any.
    ///
    /// Ties are broken lexicographically so the result is deterministic.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_memory() {
        let memory = vec!["01".to_string(), "01".to_string(), "10".to_string()];
        let counts = Counts::from_memory(&memory);
        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 1);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.insert("00", 5);
        counts.insert("11", 9);
        assert_eq!(counts.most_frequent(), Some(("11", 9)));
    }

    #[test]
    fn test_most_frequent_tie_is_deterministic() {
        let mut counts = Counts::new();
        counts.insert("10", 4);
        counts.insert("01", 4);
        assert_eq!(counts.most_frequent(), Some(("01", 4)));
    }

    #[test]
    fn test_empty_counts() {
        let counts = Counts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.most_frequent(), None);
    }
}
