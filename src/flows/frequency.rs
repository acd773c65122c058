//! Frequency flow - count tokens across files and report the top K
//!
//! Files are consumed strictly in the order given; within a file tokens are
//! recorded in scan order. Occurrence order breaks frequency ties, so this
//! ordering is visible in the final ranking.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::file_reader::read_input;
use crate::core::index::FrequencyIndex;
use crate::core::model::TopK;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::tokenizer::{scan_units, Mode};

/// Per-file ingestion summary
#[derive(Debug, Clone, Default)]
pub struct FileCount {
    pub path: PathBuf,
    pub bytes: usize,
    pub recorded: u64,
    pub discarded: u64,
}

/// Record every token of `path` into `index`
pub fn count_file(index: &mut FrequencyIndex, path: &Path, mode: Mode) -> Result<FileCount> {
    let input = read_input(path)?;
    if input.looks_binary {
        tracing::warn!(path = %path.display(), "file appears to be binary");
    }

    let mut count = FileCount {
        path: path.to_path_buf(),
        bytes: input.bytes.len(),
        ..Default::default()
    };
    for unit in scan_units(&input.bytes, mode) {
        let recorded = index
            .record(unit)
            .with_context(|| format!("failed to index a token from {}", path.display()))?;
        if recorded {
            count.recorded += 1;
        } else {
            count.discarded += 1;
        }
    }

    tracing::debug!(
        path = %count.path.display(),
        bytes = count.bytes,
        recorded = count.recorded,
        discarded = count.discarded,
        "file indexed"
    );
    Ok(count)
}

/// Build an index from `paths`, in order. The first unreadable file aborts the run.
pub fn count_files(paths: &[PathBuf], mode: Mode) -> Result<FrequencyIndex> {
    let mut index = FrequencyIndex::new();
    for path in paths {
        count_file(&mut index, path, mode)?;
    }

    debug_assert_eq!(index.check_invariants(), Ok(()));
    tracing::debug!(
        files = paths.len(),
        %mode,
        total = index.total_tokens(),
        unique = index.unique_tokens(),
        "ingestion finished"
    );
    Ok(index)
}

/// Count `paths` and extract the `length` most frequent tokens
pub fn top_tokens(paths: &[PathBuf], mode: Mode, length: usize) -> Result<TopK> {
    let index = count_files(paths, mode)?;
    let top = index.extract_top_k(length)?;

    if top.is_partial() {
        tracing::warn!(
            "only {} distinct tokens available (requested {})",
            top.len(),
            top.requested
        );
    }
    Ok(top)
}

/// Run the frequency command
pub fn run_frequency(
    paths: &[PathBuf],
    mode: Mode,
    length: usize,
    config: RenderConfig,
) -> Result<()> {
    let top = top_tokens(paths, mode, length)?;

    let renderer = Renderer::with_config(config);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    renderer
        .render_to(&top, &mut handle)
        .context("failed to write report")?;
    handle.flush().context("failed to write report")?;
    Ok(())
}
