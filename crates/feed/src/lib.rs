//! Feed fetcher for the upd8 notifier.
//!
//! Downloads a syndication feed over HTTP and reduces it to the handful of
//! fields the poll loop diffs on: the feed-level update stamp and the ordered
//! list of entries (most recent first).

mod client;
mod types;

pub use client::{Client, FeedError, FeedSource, parse_feed};
pub use types::{Feed, FeedEntry};
