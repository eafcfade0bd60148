/// `tagdump <tag> <min-date>`: fetch the feed, filter by date, export.
use std::num::NonZeroUsize;
use std::time::Duration;

use chrono::NaiveTime;
use tracing::info;

use crate::cli::{Cli, OutputCtx};
use crate::cli::output::write_summary;
use crate::errors::AppError;
use crate::export::{ExportOptions, export_posts};
use crate::feed::{FeedClient, FeedConfig, FetchOptions, fetch_posts};
use crate::types::RunSummaryOutput;

/// Run the fetch-filter-export pipeline.
///
/// # Errors
///
/// Returns `AppError` for an unusable hashtag, a failed page request (unless
/// `--keep-partial` covers it), or an unwritable output file.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), AppError> {
    let tag = normalize_tag(&cli.tag)?;
    let min_time = cli.min_date.and_time(NaiveTime::MIN).and_utc();

    let client = FeedClient::new(&FeedConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
    })?;

    let options = FetchOptions {
        wait: Duration::from_secs(cli.wait),
        max_pages: cli.max_pages.map(NonZeroUsize::get),
        keep_partial: cli.keep_partial,
    };

    info!(%tag, since = %cli.min_date, "fetching hashtag feed");
    let report = fetch_posts(&client, tag, min_time, &options)?;

    let written = export_posts(
        &cli.output,
        &report.posts,
        ExportOptions {
            format: cli.format,
            header: cli.header,
        },
    )?;

    let summary = RunSummaryOutput {
        ok: true,
        tag: tag.to_owned(),
        min_date: cli.min_date,
        pages: report.pages,
        posts: written,
        stop: report.stop,
        output: cli.output.display().to_string(),
    };
    write_summary(&summary, ctx);
    Ok(())
}

/// Strip surrounding whitespace and one leading `#`.
///
/// # Errors
///
/// Returns `AppError::InvalidTag` if nothing is left, or the tag contains whitespace.
pub fn normalize_tag(raw: &str) -> Result<&str, AppError> {
    let tag = raw.trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag);

    let reason = if tag.is_empty() {
        Some("hashtag is empty")
    } else if tag.chars().any(char::is_whitespace) {
        Some("hashtags cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AppError::InvalidTag {
            tag: raw.to_owned(),
            reason,
        }),
        None => Ok(tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("rust").unwrap(), "rust");
        assert_eq!(normalize_tag("#rust").unwrap(), "rust");
        assert_eq!(normalize_tag("  #café ").unwrap(), "café");
    }

    #[test]
    fn test_normalize_tag_rejects() {
        for bad in ["", "#", "  ", "two words", "#a\tb"] {
            assert!(
                matches!(normalize_tag(bad), Err(AppError::InvalidTag { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
