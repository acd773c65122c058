//! Trie index over the 36-symbol alphabet [a-z0-9]
//!
//! Nodes live in an arena owned by the trie and are addressed by [`NodeId`].
//! Each terminal node carries the token's frequency and, once the token has
//! been pushed onto the frequency heap, the slot it currently occupies there.

use crate::core::error::{FreqError, Result};
use crate::core::heap::SlotTracker;

/// Number of symbols in the alphabet: 26 letters followed by 10 digits
pub const ALPHABET_SIZE: usize = 36;

/// Index of a node in the trie arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[cfg(test)]
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }
}

#[derive(Debug, Clone)]
pub struct TrieNode {
    children: [Option<NodeId>; ALPHABET_SIZE],
    pub is_terminal: bool,
    pub frequency: u64,
    pub heap_slot: Option<usize>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: [None; ALPHABET_SIZE],
            is_terminal: false,
            frequency: 0,
            heap_slot: None,
        }
    }
}

/// Map a byte to its symbol rank: 'a'..='z' -> 0..=25, '0'..='9' -> 26..=35
#[inline]
pub fn symbol_rank(byte: u8) -> Option<usize> {
    match byte {
        b'a'..=b'z' => Some((byte - b'a') as usize),
        b'0'..=b'9' => Some(26 + (byte - b'0') as usize),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
        }
    }

    /// Walk the path for `token`, creating missing nodes, and return its last node.
    ///
    /// The token must already be normalized. Any byte outside the alphabet is
    /// rejected before a single node is created.
    pub fn find_or_create_path(&mut self, token: &str) -> Result<NodeId> {
        let ranks = Self::ranks(token)?;

        let mut current = NodeId::ROOT;
        for rank in ranks {
            current = match self.nodes[current.0].children[rank] {
                Some(child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(TrieNode::new());
                    self.nodes[current.0].children[rank] = Some(child);
                    child
                }
            };
        }
        Ok(current)
    }

    /// Look up the node for `token` without creating anything
    #[cfg(test)]
    pub fn get(&self, token: &str) -> Option<&TrieNode> {
        let mut current = NodeId::ROOT;
        for byte in token.bytes() {
            let rank = symbol_rank(byte)?;
            current = self.nodes[current.0].children[rank]?;
        }
        Some(&self.nodes[current.0])
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes, root included
    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TrieNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }

    fn ranks(token: &str) -> Result<Vec<usize>> {
        token
            .bytes()
            .map(|byte| {
                symbol_rank(byte).ok_or_else(|| FreqError::InvalidSymbol {
                    token: token.to_string(),
                    symbol: byte as char,
                })
            })
            .collect()
    }
}

impl SlotTracker for Trie {
    fn set_slot(&mut self, node: NodeId, slot: Option<usize>) {
        self.nodes[node.0].heap_slot = slot;
    }
}
