//! Error types for the frequency index and input handling

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core (index, trie, input reading)
#[derive(Debug, Error)]
pub enum FreqError {
    /// An input file could not be opened or read
    #[error("cannot read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token reached the trie without being normalized first
    #[error("token '{token}' contains '{symbol}', which is outside [a-z0-9]")]
    InvalidSymbol { token: String, symbol: char },

    /// Top-K extraction was asked for zero entries
    #[error("length must be a positive integer")]
    ZeroLength,

    /// Nothing countable was recorded
    #[error("no data: the input contained no countable tokens")]
    NoData,
}

pub type Result<T> = std::result::Result<T, FreqError>;
