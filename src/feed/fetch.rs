/// Pagination loop: follow the continuation cursor until the feed runs out
/// or a post older than the minimum time shows up.
///
/// The endpoint does not promise strict chronological order, so stopping at
/// the first old post can drop newer posts that would have appeared on later
/// pages. That is a property of the feed; the loop does not try to work around it.
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::client::PageSource;
use super::errors::FeedError;
use crate::types::Post;

/// Why the pagination loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A page contained a post created before the minimum time.
    ReachedMinDate,
    /// The endpoint returned a page with no posts.
    EmptyPage,
    /// No further cursor, or `has_next_page` was false.
    Exhausted,
    /// `max_pages` requests were made.
    PageLimit,
    /// A later page failed and partial results were kept.
    Interrupted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ReachedMinDate => "reached min date",
            Self::EmptyPage => "empty page",
            Self::Exhausted => "no more pages",
            Self::PageLimit => "page limit",
            Self::Interrupted => "interrupted",
        })
    }
}

/// Pagination options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause before every request except the first.
    pub wait: Duration,
    /// Maximum number of requests (unlimited when `None`).
    pub max_pages: Option<usize>,
    /// Keep what was collected when a request after the first one fails.
    pub keep_partial: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(20),
            max_pages: None,
            keep_partial: false,
        }
    }
}

/// Result of a pagination run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Posts created at or after the minimum time, in feed order.
    pub posts: Vec<Post>,
    /// Number of pages fetched successfully.
    pub pages: usize,
    pub stop: StopReason,
}

/// Page through `tag`'s feed, keeping posts created at or after `min_time`.
///
/// Posts without a creation timestamp are dropped. When a page holds a post
/// older than `min_time`, the rest of that page is still filtered and then
/// the loop ends.
///
/// # Errors
///
/// Returns the first `FeedError`, unless `keep_partial` is set and at least
/// one page has already been fetched.
pub fn fetch_posts<S: PageSource + ?Sized>(
    source: &S,
    tag: &str,
    min_time: DateTime<Utc>,
    options: &FetchOptions,
) -> Result<FetchReport, FeedError> {
    let mut posts: Vec<Post> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    let stop = loop {
        if options.max_pages.is_some_and(|max| pages >= max) {
            break StopReason::PageLimit;
        }

        if let Some(c) = &cursor {
            if !options.wait.is_zero() {
                info!("Waiting {} seconds...", options.wait.as_secs_f64());
                std::thread::sleep(options.wait);
            }
            debug!(cursor = %c, "using cursor");
        }

        info!(page = pages + 1, "Fetching...");
        let page = match source.fetch_page(tag, cursor.as_deref()) {
            Ok(page) => page,
            Err(err) if options.keep_partial && pages > 0 => {
                warn!(error = %err, "fetch interrupted, keeping {} posts", posts.len());
                break StopReason::Interrupted;
            }
            Err(err) => return Err(err),
        };
        pages += 1;

        if page.posts.is_empty() {
            info!("No posts");
            break StopReason::EmptyPage;
        }

        let mut reached_min = false;
        for post in page.posts {
            match post.created_time {
                Some(t) if t >= min_time => posts.push(post),
                Some(_) => reached_min = true,
                None => debug!(id = %post.id, "dropping post without timestamp"),
            }
        }

        info!("{} posts kept so far", posts.len());

        if reached_min {
            break StopReason::ReachedMinDate;
        }

        match page.end_cursor.filter(|c| !c.is_empty()) {
            Some(next) if page.has_next_page => cursor = Some(next),
            _ => break StopReason::Exhausted,
        }
    };

    info!(%stop, pages, "Completed fetching");

    Ok(FetchReport { posts, pages, stop })
}
