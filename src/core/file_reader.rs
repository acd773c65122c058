//! Input file reading
//!
//! Files are read whole as bytes: tokenization is ASCII-only, so no UTF-8
//! decoding is needed and invalid sequences simply normalize away.

use std::fs;
use std::path::Path;

use crate::core::error::{FreqError, Result};

/// Number of leading bytes inspected for binary content
const BINARY_CHECK_LEN: usize = 8192;

/// Contents of one input file
#[derive(Debug, Clone)]
pub struct InputFile {
    pub bytes: Vec<u8>,
    /// Null bytes were found near the start of the file
    pub looks_binary: bool,
}

/// Read `path` completely; failures carry the offending path.
pub fn read_input(path: &Path) -> Result<InputFile> {
    let bytes = fs::read(path).map_err(|source| FreqError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let check_len = std::cmp::min(BINARY_CHECK_LEN, bytes.len());
    let looks_binary = bytes[..check_len].contains(&0);

    Ok(InputFile {
        bytes,
        looks_binary,
    })
}
