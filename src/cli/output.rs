/// Summary and error output: JSON or table, with TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use crate::types::{ErrorOutput, RunSummaryOutput};

/// How the run summary and errors are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned key/value table (human-readable).
    Table,
}

/// Resolve the effective output format: `--json` wins, otherwise table on a TTY.
#[must_use]
pub fn resolve_format(json_flag: bool, is_tty: bool) -> OutputFormat {
    if json_flag || !is_tty {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    }
}

/// Output context passed to commands.
pub struct OutputCtx {
    /// Format for the run summary on stdout.
    pub format: OutputFormat,
    /// Whether errors on stderr are JSON envelopes.
    pub json_errors: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(json_flag: bool) -> Self {
        Self {
            format: resolve_format(json_flag, std::io::stdout().is_terminal()),
            json_errors: json_flag,
        }
    }
}

// --- Run summary ---

/// Write the run summary to stdout.
pub fn write_summary(summary: &RunSummaryOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Table => println!("{}", summary_table(summary)),
    }
}

fn summary_table(summary: &RunSummaryOutput) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(["TAG", &format!("#{}", summary.tag)]);
    table.add_row(["SINCE", &summary.min_date.to_string()]);
    table.add_row(["PAGES", &summary.pages.to_string()]);
    table.add_row(["POSTS", &summary.posts.to_string()]);
    table.add_row(["STOPPED", &summary.stop.to_string()]);
    table.add_row(["OUTPUT", summary.output.as_str()]);
    table
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, ctx: &OutputCtx) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if ctx.json_errors {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::feed::StopReason;

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(true, true), OutputFormat::Json);
        assert_eq!(resolve_format(false, false), OutputFormat::Json);
        assert_eq!(resolve_format(false, true), OutputFormat::Table);
    }

    #[test]
    fn test_summary_table_rows() {
        let summary = RunSummaryOutput {
            ok: true,
            tag: "rust".to_owned(),
            min_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            pages: 4,
            posts: 57,
            stop: StopReason::ReachedMinDate,
            output: "data.csv".to_owned(),
        };
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("#rust"));
        assert!(rendered.contains("2024-02-01"));
        assert!(rendered.contains("57"));
        assert!(rendered.contains("reached min date"));
        assert!(rendered.contains("data.csv"));
    }
}
