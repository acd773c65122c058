//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Tokenization and normalization
//! - The trie, the frequency heap and the index combining them
//! - The ranked result model and its renderers
//! - Input file reading

pub mod error;
pub mod file_reader;
pub mod heap;
pub mod index;
pub mod model;
pub mod render;
pub mod tokenizer;
pub mod trie;
