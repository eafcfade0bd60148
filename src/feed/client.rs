/// Blocking HTTP client for the hashtag feed endpoint.
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use super::errors::FeedError;
use super::page::{FeedPage, decode_page};

/// Default endpoint origin.
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Anything that can return one page of a hashtag feed.
///
/// `FeedClient` is the real implementation; the pagination loop only sees this trait.
pub trait PageSource {
    /// Fetch the page that follows `cursor` (or the first page when `None`).
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the page cannot be retrieved or decoded.
    fn fetch_page(&self, tag: &str, cursor: Option<&str>) -> Result<FeedPage, FeedError>;
}

/// Connection settings for `FeedClient`.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Origin the `/explore/tags/...` path is appended to.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Feed client backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: Url,
}

impl FeedClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::InvalidBaseUrl` for base URLs that cannot carry a
    /// path, or `FeedError::Client` if the TLS backend fails to initialise.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        if config.base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidBaseUrl {
                url: config.base_url.to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl PageSource for FeedClient {
    fn fetch_page(&self, tag: &str, cursor: Option<&str>) -> Result<FeedPage, FeedError> {
        let url = page_url(&self.base_url, tag, cursor)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| FeedError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| FeedError::Transport {
            url: url.to_string(),
            source,
        })?;

        decode_page(&body).map_err(|source| FeedError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Build `{base}/explore/tags/{tag}/?__a=1[&max_id={cursor}]`.
///
/// The tag and cursor are percent-encoded. An empty cursor counts as none.
///
/// # Errors
///
/// Returns `FeedError::InvalidBaseUrl` if `base` cannot carry a path.
pub fn page_url(base: &Url, tag: &str, cursor: Option<&str>) -> Result<Url, FeedError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|()| FeedError::InvalidBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(["explore", "tags", tag, ""]);

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("__a", "1");
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.append_pair("max_id", cursor);
        }
    }

    Ok(url)
}
