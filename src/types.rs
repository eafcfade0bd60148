/// Shared serializable types: the post record and what gets written to stdout/stderr.
///
/// `Post` is both the fetcher's output and the exporter's input. The summary
/// and error envelopes are decoupled from the internal fetch/export types.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feed::StopReason;

/// One post from the hashtag feed, flattened out of the API's nested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Numeric media ID (kept as a string, as the API returns it).
    pub id: String,
    /// Numeric ID of the author.
    pub owner_id: Option<String>,
    /// Creation time (`taken_at_timestamp`).
    pub created_time: Option<DateTime<Utc>>,
    /// Media kind, e.g. `GraphImage`, `GraphVideo`, `GraphSidecar`.
    pub typename: Option<String>,
    pub comment_count: Option<u64>,
    pub like_count: Option<u64>,
    /// Only present for videos.
    pub video_view_count: Option<u64>,
    /// Short code used in `instagram.com/p/<shortcode>` URLs.
    pub shortcode: Option<String>,
    /// Text of the first caption edge.
    pub caption: Option<String>,
    /// Author handle. The hashtag feed usually omits it.
    pub owner_username: Option<String>,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryOutput {
    /// Always `true`.
    pub ok: bool,
    /// Hashtag that was queried (without `#`).
    pub tag: String,
    /// Minimum creation date.
    pub min_date: NaiveDate,
    /// Number of feed pages requested.
    pub pages: usize,
    /// Number of posts written.
    pub posts: usize,
    /// Why pagination stopped.
    pub stop: StopReason,
    /// File the posts were written to (truncated even when `posts` is 0).
    pub output: String,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from an `AppError`.
    #[must_use]
    pub fn from_app_error(err: &AppError) -> Self {
        use crate::export::ExportError;
        use crate::feed::FeedError;

        let code = match err {
            AppError::InvalidTag { .. } => "invalid_tag",
            AppError::Feed(feed) => match feed {
                FeedError::InvalidBaseUrl { .. } | FeedError::Client(_) => "client_setup",
                FeedError::Transport { .. } => "network_error",
                FeedError::Status { .. } => "http_status",
                FeedError::Decode { .. } => "unexpected_response",
            },
            AppError::Export(export) => match export {
                ExportError::Create { .. } => "output_unwritable",
                ExportError::Write { .. } => "write_failed",
            },
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::export::ExportError;
    use crate::feed::FeedError;

    #[test]
    fn test_error_codes() {
        let err = AppError::InvalidTag {
            tag: "#".to_owned(),
            reason: "hashtag is empty",
        };
        assert_eq!(ErrorOutput::from_app_error(&err).error.code, "invalid_tag");

        let err = AppError::Feed(FeedError::Status {
            url: "https://example.com".to_owned(),
            status: 429,
        });
        let out = ErrorOutput::from_app_error(&err);
        assert!(!out.ok);
        assert_eq!(out.error.code, "http_status");
        assert!(out.error.message.contains("429"));

        let err = AppError::Export(ExportError::Create {
            path: PathBuf::from("/nope/data.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        let out = ErrorOutput::from_app_error(&err);
        assert_eq!(out.error.code, "output_unwritable");
        assert!(out.error.message.contains("/nope/data.csv"));
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = RunSummaryOutput {
            ok: true,
            tag: "rust".to_owned(),
            min_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            pages: 1,
            posts: 0,
            stop: StopReason::EmptyPage,
            output: "data.csv".to_owned(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["output"], "data.csv");
        assert_eq!(json["posts"], 0);
        assert_eq!(json["stop"], "empty_page");
        assert_eq!(json["min_date"], "2024-01-01");
    }
}
