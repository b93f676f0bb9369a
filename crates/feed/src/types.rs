use chrono::{DateTime, Utc};

/// A single entry ("page") of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Opaque, string-comparable update stamp.
    pub updated: String,
}

/// A fetched feed, entries in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Feed-level update stamp.
    pub updated: String,
    pub entries: Vec<FeedEntry>,
}

impl Feed {
    /// Builds a feed from its rendered stamp and its entries in feed order.
    pub fn new(updated: impl Into<String>, entries: Vec<FeedEntry>) -> Self {
        Self {
            updated: updated.into(),
            entries,
        }
    }
}

/// Renders a parsed timestamp into the string form stamps are compared in.
pub(crate) fn render_stamp(stamp: Option<DateTime<Utc>>) -> Option<String> {
    stamp.map(|s| s.to_rfc3339())
}
