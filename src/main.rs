//! freq - Chart the most frequent words or characters in text files
//!
//! freq provides:
//! - Word or character tokenization with ASCII normalization
//! - A trie + max-heap frequency index with stable tie-breaking
//! - Bar chart, JSON and Markdown reports

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
