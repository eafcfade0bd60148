/// Hashtag feed layer: HTTP client, response decoding, pagination.
pub mod client;
pub mod errors;
pub mod fetch;
pub mod page;

pub use client::{FeedClient, FeedConfig};
pub use errors::FeedError;
pub use fetch::{FetchOptions, StopReason, fetch_posts};
