//! First-page detection.

use upd8_feed::Feed;

/// The chronologically earliest entry of the latest update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstPage {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Index of the first entry that is not part of the update, which equals
    /// the number of pages in it.
    pub page_count: usize,
}

/// Finds the first page of the update stamped `feed.updated`.
///
/// Entries are newest first. The update spans the leading run of entries
/// carrying the feed stamp; its first page is the last entry of that run.
/// Returns `None` when the run is empty or reaches the end of the list,
/// since then the start of the update is not visible in the feed.
pub fn locate_first_page(feed: &Feed) -> Option<FirstPage> {
    let boundary = feed
        .entries
        .iter()
        .position(|entry| entry.updated != feed.updated)?;

    let page = feed.entries.get(boundary.checked_sub(1)?)?;
    Some(FirstPage {
        title: page.title.clone(),
        description: page.description.clone(),
        link: page.link.clone(),
        page_count: boundary,
    })
}
