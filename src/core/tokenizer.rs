//! Tokenizer module - Splits raw input into countable tokens
//!
//! Two scanning modes are supported:
//! - word: whitespace-delimited units
//! - character: every single byte is its own unit
//!
//! Each raw unit is then normalized: non-alphanumeric bytes are dropped and
//! ASCII letters are lowercased. A unit that normalizes to the empty string
//! is discarded by the caller.
//!
//! Usage:
//! ```rust,ignore
//! let units: Vec<&[u8]> = scan_units(b"Hello, World!", Mode::Word).collect();
//! assert_eq!(normalize(units[0]), "hello");
//! ```

use std::fmt;

/// Tokenization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Whitespace-delimited words
    #[default]
    Word,
    /// Single characters (bytes)
    Character,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Word => "word",
            Mode::Character => "char",
        };
        write!(f, "{}", name)
    }
}

/// Split raw bytes into scan units according to the mode.
///
/// Word mode splits on space, `\t`, `\n`, `\v`, `\f` and `\r` and never yields
/// empty units; character mode yields one unit per
/// byte, whitespace included (it normalizes away).
pub fn scan_units(bytes: &[u8], mode: Mode) -> Box<dyn Iterator<Item = &[u8]> + '_> {
    match mode {
        Mode::Word => Box::new(
            bytes
                .split(|&b| is_separator(b))
                .filter(|unit| !unit.is_empty()),
        ),
        Mode::Character => Box::new(bytes.chunks(1)),
    }
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Normalize a raw unit into a token: keep ASCII alphanumerics, lowercase letters.
pub fn normalize(raw: &[u8]) -> String {
    raw.iter()
        .filter(|b| b.is_ascii_alphanumeric())
        .map(|b| b.to_ascii_lowercase() as char)
        .collect()
}
