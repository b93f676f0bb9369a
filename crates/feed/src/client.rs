//! HTTP feed client.
//!
//! Async client using `reqwest`; the body is handed to `feed-rs`, so RSS,
//! Atom and JSON Feed documents are all accepted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::types::{Feed, FeedEntry, render_stamp};

/// Errors from fetching or parsing a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed server returned {status}")]
    Status { status: u16 },

    #[error("parse error: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),

    #[error("feed has no updated or published stamp")]
    MissingUpdated,
}

/// Anything the poll loop can pull a [`Feed`] from.
pub trait FeedSource {
    /// Fetches the current state of the feed.
    fn fetch(&self) -> impl Future<Output = Result<Feed, FeedError>> + Send;
}

impl<T> FeedSource for Arc<T>
where
    T: FeedSource + Send + Sync,
{
    fn fetch(&self) -> impl Future<Output = Result<Feed, FeedError>> + Send {
        (**self).fetch()
    }
}

/// Feed client bound to a single URL.
pub struct Client {
    http: reqwest::Client,
    url: String,
}

impl Client {
    /// Creates a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("upd8/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Returns the feed URL this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for Client {
    async fn fetch(&self) -> Result<Feed, FeedError> {
        tracing::debug!(url = %self.url, "fetching feed");
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        parse_feed(&body)
    }
}

/// Parses a raw feed document.
///
/// The feed stamp is `updated`, falling back to `published`; a document with
/// neither is rejected. Entries without any stamp get an empty one, which
/// never matches a feed stamp.
pub fn parse_feed(body: &[u8]) -> Result<Feed, FeedError> {
    let parsed = feed_rs::parser::parse(body)?;

    let updated =
        render_stamp(parsed.updated.or(parsed.published)).ok_or(FeedError::MissingUpdated)?;

    let entries = parsed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            description: entry.summary.map(|s| s.content).unwrap_or_default(),
            link: entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default(),
            updated: render_stamp(entry.updated.or(entry.published)).unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    tracing::trace!(%updated, entries = entries.len(), "feed parsed");
    Ok(Feed::new(updated, entries))
}
