//! Renderer module
//!
//! Renders a ranked [`TopK`] to different output formats: chart, jsonl, json, md

use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::core::model::{RankedToken, TopK};

/// Default bar display width (in block characters)
pub const DEFAULT_BAR_WIDTH: usize = 75;

const AXIS: char = '\u{2502}'; // │
const CORNER: char = '\u{2514}'; // └
const RULE: char = '\u{2500}'; // ─
const BLOCK: char = '\u{2591}'; // ░

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Chart,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chart" | "bar" => Ok(OutputFormat::Chart),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Scale bars against the largest extracted frequency instead of the total
    pub scaled: bool,
    pub bar_width: usize,
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: false,
            scaled: false,
            bar_width: DEFAULT_BAR_WIDTH,
            color: false,
        }
    }
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_scaled(mut self, scaled: bool) -> Self {
        self.scaled = scaled;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// One JSON row per ranked token
#[derive(Debug, Serialize)]
struct Row<'a> {
    rank: usize,
    token: &'a str,
    frequency: u64,
    occurrence_order: u64,
    percent: f64,
}

/// Renderer for ranked results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result to a string
    pub fn render(&self, top: &TopK) -> String {
        match self.config.format {
            OutputFormat::Chart => self.render_chart(top),
            OutputFormat::Jsonl => self.render_jsonl(top),
            OutputFormat::Json => self.render_json(top),
            OutputFormat::Markdown => self.render_markdown(top),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, top: &TopK, mut writer: W) -> std::io::Result<()> {
        let output = self.render(top);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Denominator for bar lengths
    fn scale_base(&self, top: &TopK) -> u64 {
        if self.config.scaled {
            top.max_frequency()
        } else {
            top.total_tokens
        }
    }

    /// Bar length: floor(bar_width * frequency / scale_base)
    fn bar_len(&self, entry: &RankedToken, base: u64) -> usize {
        if base == 0 {
            return 0;
        }
        let len = (self.config.bar_width as u128 * entry.frequency as u128) / base as u128;
        len as usize
    }

    fn rows<'a>(&self, top: &'a TopK) -> impl Iterator<Item = Row<'a>> + 'a {
        top.entries.iter().enumerate().map(move |(i, e)| Row {
            rank: i + 1,
            token: &e.token,
            frequency: e.frequency,
            occurrence_order: e.occurrence_order,
            percent: top.percent(e),
        })
    }

    /// Render as a horizontal bar chart
    fn render_chart(&self, top: &TopK) -> String {
        let label_width = top
            .entries
            .iter()
            .map(|e| e.token.len())
            .max()
            .unwrap_or(0)
            + 1;
        let base = self.scale_base(top);
        let gutter = " ".repeat(label_width);
        let mut output = String::new();

        for entry in &top.entries {
            let bar: String = std::iter::repeat(BLOCK)
                .take(self.bar_len(entry, base))
                .collect();
            let bar = if self.config.color {
                bar.cyan().to_string()
            } else {
                bar
            };
            let label = format!("{:<width$}", entry.token, width = label_width);
            let label = if self.config.color {
                label.bold().to_string()
            } else {
                label
            };

            output.push_str(&format!(
                "{}{}{}{:.2}%\n",
                label,
                AXIS,
                bar,
                top.percent(entry)
            ));
            output.push_str(&format!("{}{}{}\n", gutter, AXIS, bar));
            output.push_str(&gutter);
            output.push('\n');
        }

        let rule: String = std::iter::repeat(RULE).take(self.config.bar_width + 5).collect();
        output.push_str(&format!("{}{}{}", gutter, CORNER, rule));
        output
    }

    /// Render as JSON Lines (one JSON object per ranked token)
    fn render_jsonl(&self, top: &TopK) -> String {
        self.rows(top)
            .filter_map(|row| {
                if self.config.pretty {
                    serde_json::to_string_pretty(&row).ok()
                } else {
                    serde_json::to_string(&row).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON document
    fn render_json(&self, top: &TopK) -> String {
        let rows: Vec<Row> = self.rows(top).collect();
        let doc = serde_json::json!({
            "total_tokens": top.total_tokens,
            "unique_tokens": top.unique_tokens,
            "requested": top.requested,
            "entries": rows,
        });
        if self.config.pretty {
            serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&doc).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Render as a Markdown table
    fn render_markdown(&self, top: &TopK) -> String {
        let mut output = String::new();
        output.push_str("| Rank | Token | Frequency | Percent |\n");
        output.push_str("|------|-------|-----------|---------|\n");
        for row in self.rows(top) {
            output.push_str(&format!(
                "| {} | `{}` | {} | {:.2}% |\n",
                row.rank, row.token, row.frequency, row.percent
            ));
        }
        output.push_str(&format!(
            "\n{} tokens, {} distinct\n",
            top.total_tokens, top.unique_tokens
        ));
        output
    }
}
