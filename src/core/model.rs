//! Ranked result model
//!
//! The frequency index produces a [`TopK`]; every renderer consumes it.

use serde::{Deserialize, Serialize};

/// One ranked token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedToken {
    pub token: String,
    pub frequency: u64,
    pub occurrence_order: u64,
}

impl RankedToken {
    pub fn new(token: impl Into<String>, frequency: u64, occurrence_order: u64) -> Self {
        Self {
            token: token.into(),
            frequency,
            occurrence_order,
        }
    }
}

/// Result of a top-K extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopK {
    /// Entries in rank order (frequency desc, first occurrence asc)
    pub entries: Vec<RankedToken>,

    /// How many entries were asked for
    pub requested: usize,

    /// All tokens recorded, repeats included
    pub total_tokens: u64,

    /// Distinct tokens recorded
    pub unique_tokens: u64,
}

impl TopK {
    /// Whether fewer entries than requested were available
    pub fn is_partial(&self) -> bool {
        self.entries.len() < self.requested
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest frequency among the extracted entries
    pub fn max_frequency(&self) -> u64 {
        self.entries.first().map(|e| e.frequency).unwrap_or(0)
    }

    /// Share of all recorded tokens, in percent
    pub fn percent(&self, entry: &RankedToken) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        100.0 * entry.frequency as f64 / self.total_tokens as f64
    }

    /// (token, frequency) pairs, mostly for assertions
    #[cfg(test)]
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .map(|e| (e.token.as_str(), e.frequency))
            .collect()
    }
}
