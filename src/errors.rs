/// Top-level errors returned by commands.
use thiserror::Error;

use crate::export::ExportError;
use crate::feed::FeedError;

/// Everything that can make a run fail.
#[derive(Debug, Error)]
pub enum AppError {
    /// The hashtag argument is unusable.
    #[error("Invalid hashtag '{tag}': {reason}")]
    InvalidTag {
        /// The hashtag as given on the command line.
        tag: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Fetching the feed failed.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Writing the output failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Exit code mapping for `AppError` variants.
impl AppError {
    /// Return the CLI exit code for this error.
    ///
    /// 2 matches clap's own code for usage errors.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidTag { .. } => 2,
            Self::Feed(_) => 3,
            Self::Export(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_exit_codes() {
        let tag = AppError::InvalidTag {
            tag: String::new(),
            reason: "hashtag is empty",
        };
        assert_eq!(tag.exit_code(), 2);

        let feed = AppError::from(FeedError::Status {
            url: "u".to_owned(),
            status: 500,
        });
        assert_eq!(feed.exit_code(), 3);

        let export = AppError::from(ExportError::Write {
            path: PathBuf::from("data.csv"),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(export.exit_code(), 4);
        assert_eq!(
            export.to_string(),
            "Export error: Failed writing to 'data.csv': disk full"
        );
    }
}
