//! Frequency index - trie + heap aggregator
//!
//! The trie maps each distinct token to a node; the heap orders the tokens by
//! frequency. Each terminal node stores the heap slot of its entry, which
//! lets a repeated token be bumped in place instead of searched for.
//!
//! Usage:
//! ```rust,ignore
//! let mut index = FrequencyIndex::new();
//! for word in ["a", "a", "b"] {
//!     index.record(word.as_bytes())?;
//! }
//! let top = index.extract_top_k(2)?;
//! assert_eq!(top.pairs(), vec![("a", 2), ("b", 1)]);
//! ```

use crate::core::error::{FreqError, Result};
use crate::core::heap::{FrequencyHeap, HeapEntry};
use crate::core::model::{RankedToken, TopK};
use crate::core::tokenizer::normalize;
use crate::core::trie::Trie;

#[derive(Debug)]
pub struct FrequencyIndex {
    trie: Trie,
    heap: FrequencyHeap,
    total_tokens: u64,
    unique_tokens: u64,
    next_order: u64,
}

impl Default for FrequencyIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            heap: FrequencyHeap::new(),
            total_tokens: 0,
            unique_tokens: 0,
            next_order: 0,
        }
    }

    /// Normalize `raw` and count it. Returns `false` when it normalized away.
    pub fn record(&mut self, raw: &[u8]) -> Result<bool> {
        self.record_normalized(&normalize(raw))
    }

    /// Count a token that is already normalized. Empty tokens are discarded
    /// and reported as `false`.
    pub fn record_normalized(&mut self, token: &str) -> Result<bool> {
        if token.is_empty() {
            return Ok(false);
        }
        let id = self.trie.find_or_create_path(token)?;
        self.total_tokens += 1;

        let node = self.trie.node_mut(id);
        match node.heap_slot {
            Some(slot) => {
                node.frequency += 1;
                self.heap.increase_key_at(slot, &mut self.trie);
            }
            None => {
                node.frequency = 1;
                node.is_terminal = true;
                let entry = HeapEntry {
                    token: token.to_string(),
                    frequency: 1,
                    occurrence_order: self.next_order,
                    node: id,
                };
                self.next_order += 1;
                self.unique_tokens += 1;
                let slot = self.heap.insert(entry, &mut self.trie);
                self.trie.node_mut(id).heap_slot = Some(slot);
            }
        }
        Ok(true)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn unique_tokens(&self) -> u64 {
        self.unique_tokens
    }

    /// Current frequency of `token`, if it has been recorded
    #[cfg(test)]
    pub fn frequency_of(&self, token: &str) -> Option<u64> {
        self.trie
            .get(token)
            .filter(|node| node.is_terminal)
            .map(|node| node.frequency)
    }

    /// Occurrence order of `token`, if it has been recorded
    #[cfg(test)]
    pub fn occurrence_order_of(&self, token: &str) -> Option<u64> {
        let slot = self.trie.get(token)?.heap_slot?;
        Some(self.heap.entries()[slot].occurrence_order)
    }

    /// Pop up to `k` entries in rank order.
    ///
    /// Consumes the index: extraction empties the heap, so it can only happen once.
    pub fn extract_top_k(mut self, k: usize) -> Result<TopK> {
        if k == 0 {
            return Err(FreqError::ZeroLength);
        }
        if self.unique_tokens == 0 {
            return Err(FreqError::NoData);
        }

        let mut entries = Vec::with_capacity(k.min(self.heap.len()));
        while entries.len() < k {
            let Some(entry) = self.heap.extract_max(&mut self.trie) else {
                break;
            };
            entries.push(RankedToken::new(
                entry.token,
                entry.frequency,
                entry.occurrence_order,
            ));
        }

        Ok(TopK {
            entries,
            requested: k,
            total_tokens: self.total_tokens,
            unique_tokens: self.unique_tokens,
        })
    }

    /// Verify heap order, back-pointers and token conservation.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let entries = self.heap.entries();

        for i in 1..entries.len() {
            let parent = &entries[(i - 1) / 2];
            if entries[i].precedes(parent) {
                return Err(format!(
                    "heap order broken at slot {}: '{}' precedes parent '{}'",
                    i, entries[i].token, parent.token
                ));
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            let node = self.trie.node(entry.node);
            if node.heap_slot != Some(i) {
                return Err(format!(
                    "back-pointer for '{}' is {:?}, expected slot {}",
                    entry.token, node.heap_slot, i
                ));
            }
            if node.frequency != entry.frequency {
                return Err(format!(
                    "frequency mismatch for '{}': node {}, heap {}",
                    entry.token, node.frequency, entry.frequency
                ));
            }
        }

        let mut terminals = 0u64;
        let mut sum = 0u64;
        for (id, node) in self.trie.iter() {
            if node.is_terminal {
                terminals += 1;
                sum += node.frequency;
            }
            if let Some(slot) = node.heap_slot {
                if entries.get(slot).map(|e| e.node) != Some(id) {
                    return Err(format!("node points at slot {} it does not own", slot));
                }
            }
        }
        if terminals != self.unique_tokens {
            return Err(format!(
                "{} terminal nodes but {} unique tokens",
                terminals, self.unique_tokens
            ));
        }
        if sum != self.total_tokens {
            return Err(format!(
                "frequencies sum to {} but {} tokens were recorded",
                sum, self.total_tokens
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::{scan_units, Mode};
    use std::collections::HashMap;

    fn index_of(text: &str, mode: Mode) -> FrequencyIndex {
        let mut index = FrequencyIndex::new();
        for unit in scan_units(text.as_bytes(), mode) {
            index.record(unit).unwrap();
            index.check_invariants().unwrap();
        }
        index
    }

    fn ranked(text: &str, mode: Mode, k: usize) -> Vec<(String, u64)> {
        index_of(text, mode)
            .extract_top_k(k)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| (e.token, e.frequency))
            .collect()
    }

    fn pairs(expected: &[(&str, u64)]) -> Vec<(String, u64)> {
        expected.iter().map(|(t, f)| (t.to_string(), *f)).collect()
    }

    /// Deterministic token stream with a skewed distribution
    fn token_stream(len: usize, seed: u64) -> Vec<String> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let r = (state >> 33) % 1000;
                let bucket = if r < 500 { r % 5 } else if r < 850 { r % 40 } else { r % 300 };
                format!("w{}", bucket)
            })
            .collect()
    }

    #[test]
    fn test_repeated_words_rank_first() {
        assert_eq!(ranked("a a b", Mode::Word, 2), pairs(&[("a", 2), ("b", 1)]));
    }

    #[test]
    fn test_scan_order_irrelevant_once_frequencies_differ() {
        assert_eq!(ranked("b a a", Mode::Word, 2), pairs(&[("a", 2), ("b", 1)]));
    }

    #[test]
    fn test_ties_broken_by_first_occurrence() {
        assert_eq!(ranked("x y x y", Mode::Word, 2), pairs(&[("x", 2), ("y", 2)]));
        assert_eq!(ranked("y x x y", Mode::Word, 2), pairs(&[("y", 2), ("x", 2)]));
    }

    #[test]
    fn test_character_mode() {
        assert_eq!(
            ranked("aab", Mode::Character, 2),
            pairs(&[("a", 2), ("b", 1)])
        );
    }

    #[test]
    fn test_under_fill_returns_fewer_entries() {
        let top = index_of("a b a", Mode::Word).extract_top_k(5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top.requested, 5);
        assert!(top.is_partial());
    }

    #[test]
    fn test_empty_input_reports_no_data() {
        let index = index_of("", Mode::Word);
        assert_eq!(index.unique_tokens(), 0);
        assert!(matches!(index.extract_top_k(3), Err(FreqError::NoData)));
    }

    #[test]
    fn test_all_discarded_input_reports_no_data() {
        let index = index_of("--- !!! ...", Mode::Word);
        assert_eq!(index.total_tokens(), 0);
        assert!(matches!(index.extract_top_k(1), Err(FreqError::NoData)));
    }

    #[test]
    fn test_zero_length_rejected() {
        let index = index_of("a", Mode::Word);
        assert!(matches!(index.extract_top_k(0), Err(FreqError::ZeroLength)));
    }

    #[test]
    fn test_record_normalizes() {
        let mut index = FrequencyIndex::new();
        assert!(index.record(b"Hello,").unwrap());
        assert!(index.record(b"HELLO").unwrap());
        assert!(!index.record(b"...").unwrap());
        assert_eq!(index.frequency_of("hello"), Some(2));
        assert_eq!(index.total_tokens(), 2);
        assert_eq!(index.unique_tokens(), 1);
    }

    #[test]
    fn test_record_normalized_rejects_invalid_symbols() {
        let mut index = FrequencyIndex::new();
        let err = index.record_normalized("Hello").unwrap_err();
        assert!(matches!(err, FreqError::InvalidSymbol { .. }));
        assert_eq!(index.total_tokens(), 0);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_record_normalized_discards_empty_token() {
        let mut index = FrequencyIndex::new();
        assert!(!index.record_normalized("").unwrap());
        assert_eq!(index.total_tokens(), 0);
        assert_eq!(index.unique_tokens(), 0);
        assert!(!index.trie.node(crate::core::trie::NodeId::ROOT).is_terminal);
        index.check_invariants().unwrap();
        assert!(matches!(index.extract_top_k(3), Err(FreqError::NoData)));

        let mut index = FrequencyIndex::new();
        index.record_normalized("a").unwrap();
        index.record_normalized("").unwrap();
        let top = index.extract_top_k(3).unwrap();
        assert_eq!(top.pairs(), vec![("a", 1)]);
        assert_eq!(top.total_tokens, 1);
    }

    #[test]
    fn test_repetition_keeps_occurrence_order() {
        let mut index = FrequencyIndex::new();
        index.record_normalized("first").unwrap();
        index.record_normalized("second").unwrap();
        for _ in 0..50 {
            index.record_normalized("second").unwrap();
            assert_eq!(index.occurrence_order_of("second"), Some(1));
        }
        assert_eq!(index.frequency_of("second"), Some(51));
        assert_eq!(index.occurrence_order_of("first"), Some(0));
    }

    #[test]
    fn test_prefix_is_not_counted_as_token() {
        let index = index_of("cat cats", Mode::Word);
        assert_eq!(index.frequency_of("cat"), Some(1));
        assert_eq!(index.frequency_of("ca"), None);
        assert_eq!(index.unique_tokens(), 2);
    }

    #[test]
    fn test_invariants_hold_on_skewed_stream() {
        let mut index = FrequencyIndex::new();
        for token in token_stream(2000, 7) {
            index.record_normalized(&token).unwrap();
            index.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_top_k_matches_sort_oracle() {
        let stream = token_stream(5000, 42);

        let mut index = FrequencyIndex::new();
        let mut counts: HashMap<&str, (u64, u64)> = HashMap::new();
        let mut next = 0;
        for token in &stream {
            index.record_normalized(token).unwrap();
            let slot = counts.entry(token.as_str()).or_insert_with(|| {
                next += 1;
                (0, next - 1)
            });
            slot.0 += 1;
        }

        let mut expected: Vec<(&str, u64, u64)> =
            counts.iter().map(|(t, (f, o))| (*t, *f, *o)).collect();
        expected.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let total: u64 = expected.iter().map(|e| e.1).sum();
        assert_eq!(index.total_tokens(), total);
        assert_eq!(index.unique_tokens(), expected.len() as u64);

        let top = index.extract_top_k(25).unwrap();
        let got: Vec<(&str, u64, u64)> = top
            .entries
            .iter()
            .map(|e| (e.token.as_str(), e.frequency, e.occurrence_order))
            .collect();
        assert_eq!(got, expected[..25].to_vec());
    }

    #[test]
    fn test_extract_everything_in_rank_order() {
        let stream = token_stream(800, 3);
        let mut index = FrequencyIndex::new();
        for token in &stream {
            index.record_normalized(token).unwrap();
        }
        let unique = index.unique_tokens() as usize;
        let top = index.extract_top_k(usize::MAX).unwrap();
        assert_eq!(top.len(), unique);
        for pair in top.entries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.frequency > b.frequency
                    || (a.frequency == b.frequency && a.occurrence_order < b.occurrence_order)
            );
        }
    }
}
