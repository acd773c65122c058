//! Flows module - End-to-end operations built from the core
//!
//! Provides:
//! - frequency: count tokens across files and report the top K

pub mod frequency;
