//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::render::{OutputFormat, RenderConfig, DEFAULT_BAR_WIDTH};
use crate::core::tokenizer::Mode;

/// freq - chart the most frequent words or characters in text files.
#[derive(Parser, Debug)]
#[command(name = "freq")]
#[command(
    author,
    version,
    about,
    override_usage = "freq [-l length] [-w | -c] [--scaled] FILE...",
    long_about = r#"freq counts how often each token occurs across the given files and
prints the most frequent ones as a bar chart.

Tokens are whole words (default) or single characters. Every token is
normalized before counting: characters other than ASCII letters and digits
are dropped and letters are lowercased. Tokens that normalize to nothing are
ignored.

Ranking is by frequency; tokens with equal frequency keep the order in which
they were first seen. Files are read in the order given.

Examples:
    freq README.md
    freq -l 5 -c notes.txt
    freq --scaled -l 20 chapter1.txt chapter2.txt
    freq --format jsonl book.txt
"#
)]
pub struct Cli {
    /// Input files, processed in the order given.
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Number of tokens to report.
    #[arg(
        short = 'l',
        long = "length",
        default_value_t = 10,
        value_name = "LENGTH",
        value_parser = parse_positive,
        long_help = "Number of tokens to report (top K). Must be a positive integer.\n\n\
If fewer distinct tokens exist, all of them are reported and a note is printed\n\
to stderr."
    )]
    pub length: usize,

    /// Count whole words (default).
    #[arg(short = 'w', long = "words", overrides_with = "chars")]
    pub words: bool,

    /// Count single characters.
    #[arg(
        short = 'c',
        long = "chars",
        overrides_with = "words",
        long_help = "Count single characters instead of words. When both -w and -c are\n\
given, the last one wins."
    )]
    pub chars: bool,

    /// Scale bars to the most frequent reported token.
    #[arg(
        long,
        long_help = "Scale bar lengths against the highest frequency among the reported\n\
tokens instead of the total token count. Percentages are unaffected."
    )]
    pub scaled: bool,

    /// Output format (chart/jsonl/json/md).
    #[arg(
        long,
        default_value = "chart",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- chart (default): bar chart\n\
- jsonl: one JSON object per token\n\
- json: a single JSON document\n\
- md: Markdown table"
    )]
    pub format: OutputFormat,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Bar width of the chart, in blocks.
    #[arg(
        long,
        env = "FREQ_WIDTH",
        default_value_t = DEFAULT_BAR_WIDTH,
        value_name = "N",
        value_parser = parse_positive
    )]
    pub width: usize,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Enable debug diagnostics on stderr (per-file token counts, totals).\n\
RUST_LOG overrides this when set."
    )]
    pub verbose: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.chars && !self.words {
            Mode::Character
        } else {
            Mode::Word
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let color = !self.no_color && std::io::stdout().is_terminal();
        RenderConfig::new(self.format)
            .with_scaled(self.scaled)
            .with_pretty(self.pretty)
            .with_bar_width(self.width)
            .with_color(color)
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive integer", s)),
    }
}

/// Install the stderr diagnostics subscriber
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);
    if cli.no_color {
        colored::control::set_override(false);
    }

    crate::flows::frequency::run_frequency(
        &cli.files,
        cli.mode(),
        cli.length,
        cli.render_config(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("freq").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["a.txt"]).unwrap();
        assert_eq!(cli.length, 10);
        assert_eq!(cli.mode(), Mode::Word);
        assert_eq!(cli.format, OutputFormat::Chart);
        assert_eq!(cli.files, vec![PathBuf::from("a.txt")]);
        assert!(!cli.scaled);
    }

    #[test]
    fn test_length_flag() {
        let cli = parse(&["-l", "3", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.length, 3);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_length_must_be_positive() {
        assert!(parse(&["-l", "0", "a.txt"]).is_err());
        assert!(parse(&["-l", "-4", "a.txt"]).is_err());
        assert!(parse(&["-l", "ten", "a.txt"]).is_err());
    }

    #[test]
    fn test_length_missing_value() {
        assert!(parse(&["a.txt", "-l"]).is_err());
    }

    #[test]
    fn test_last_mode_flag_wins() {
        assert_eq!(parse(&["-w", "-c", "a.txt"]).unwrap().mode(), Mode::Character);
        assert_eq!(parse(&["-c", "-w", "a.txt"]).unwrap().mode(), Mode::Word);
        assert_eq!(parse(&["-c", "a.txt"]).unwrap().mode(), Mode::Character);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = parse(&["--bogus", "a.txt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_files_required() {
        let err = parse(&["-l", "3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_scaled_and_format() {
        let cli = parse(&["--scaled", "--format", "json", "--no-color", "a.txt"]).unwrap();
        let config = cli.render_config();
        assert!(config.scaled);
        assert!(!config.color);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(parse(&["--format", "xml", "a.txt"]).is_err());
    }

    #[test]
    fn test_width_flag() {
        let cli = parse(&["--width", "40", "a.txt"]).unwrap();
        assert_eq!(cli.render_config().bar_width, 40);
        assert!(parse(&["--width", "0", "a.txt"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["a.txt"]).unwrap().log_level(), "warn");
        assert_eq!(parse(&["-v", "a.txt"]).unwrap().log_level(), "debug");
        assert_eq!(parse(&["-q", "a.txt"]).unwrap().log_level(), "error");
        assert!(parse(&["-q", "-v", "a.txt"]).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("7"), Ok(7));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("").is_err());
    }
}
