/// CLI argument definitions via clap derive.
use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use reqwest::Url;

use crate::export::ExportFormat;
use crate::feed::client::DEFAULT_BASE_URL;

/// tagdump: fetch Instagram posts for a hashtag into a pipe-delimited file.
#[derive(Debug, Parser)]
#[command(
    name = "tagdump",
    about = "Fetch Instagram post data for a hashtag, from min-date until now",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Tag name (a leading # is ignored).
    pub tag: String,

    /// Minimum creation date (YYYY-MM-DD, UTC).
    #[arg(value_name = "MIN_DATE", value_parser = parse_date)]
    pub min_date: NaiveDate,

    /// Output file.
    #[arg(short, long, value_name = "PATH", default_value = "data.csv")]
    pub output: PathBuf,

    /// File format.
    #[arg(long, value_name = "FORMAT", default_value = "pipe")]
    pub format: ExportFormat,

    /// Write a header row with the column names (pipe format).
    #[arg(long)]
    pub header: bool,

    /// Seconds to wait between page requests.
    #[arg(short, long, value_name = "SECS", default_value = "20")]
    pub wait: u64,

    /// Stop after this many page requests.
    #[arg(long, value_name = "N")]
    pub max_pages: Option<NonZeroUsize>,

    /// Export what was fetched so far if a later page request fails.
    #[arg(long)]
    pub keep_partial: bool,

    /// Endpoint origin.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Print the run summary and errors as JSON.
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{s}' ({e})"))
}
