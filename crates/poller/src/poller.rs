//! The poll loop itself.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use upd8_feed::{FeedError, FeedSource};
use upd8_state::{StateError, StateStore, UpdateRecord};

use crate::scan::{FirstPage, locate_first_page};

/// Pause between the end of one check and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Errors that abort a single poll cycle. The loop logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Signal sent to listeners when a new update is detected.
///
/// Carries the metadata by value, so a listener never has to read the state
/// file to learn about the update it was told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    /// Feed stamp of the update.
    pub date: String,
    /// Title of the first page.
    pub first_page: String,
    /// Description of the first page.
    pub first_page_title: String,
    pub url: String,
    pub page_count: usize,
}

impl UpdateNotice {
    fn new(date: &str, page: FirstPage) -> Self {
        Self {
            date: date.to_string(),
            first_page: page.title,
            first_page_title: page.description,
            url: page.link,
            page_count: page.page_count,
        }
    }
}

/// What a single [`Poller::check`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No record existed; it was created from the current feed.
    Initialized,
    /// The feed stamp matches the record.
    Unchanged,
    /// A new update was detected and its first page located.
    Updated(UpdateNotice),
    /// The stamp moved but no first page could be located.
    UpdatedWithoutPage,
}

/// Owns everything one poll cycle touches.
pub struct Poller<S> {
    source: S,
    store: StateStore,
    notices: mpsc::Sender<UpdateNotice>,
    interval: Duration,
}

impl<S> Poller<S>
where
    S: FeedSource + Send + Sync + 'static,
{
    pub fn new(source: S, store: StateStore, notices: mpsc::Sender<UpdateNotice>) -> Self {
        Self {
            source,
            store,
            notices,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the pause between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs one poll cycle.
    pub async fn check(&self) -> Result<PollOutcome, PollError> {
        let feed = self.source.fetch().await?;

        let Some(previous) = self.load_previous()? else {
            self.store.save(&UpdateRecord::new(&feed.updated))?;
            info!(date = %feed.updated, "update record initialized");
            return Ok(PollOutcome::Initialized);
        };

        if previous.last_update_date == feed.updated {
            self.store.save(&previous.carry_over(&feed.updated))?;
            info!("no new update");
            return Ok(PollOutcome::Unchanged);
        }

        let Some(page) = locate_first_page(&feed) else {
            self.store.save(&UpdateRecord::new(&feed.updated))?;
            warn!(
                date = %feed.updated,
                entries = feed.entries.len(),
                "new update detected but its first page is not in the feed, skipping notification"
            );
            return Ok(PollOutcome::UpdatedWithoutPage);
        };

        let record = UpdateRecord {
            last_update_date: feed.updated.clone(),
            last_update_first_page: Some(page.title.clone()),
            last_update_first_page_title: Some(page.description.clone()),
            last_update_first_page_url: Some(page.link.clone()),
            last_update_page_count: Some(page.page_count),
        };
        self.store.save(&record)?;

        let notice = UpdateNotice::new(&feed.updated, page);
        info!(
            date = %notice.date,
            first_page = %notice.first_page,
            page_count = notice.page_count,
            "new update detected"
        );
        self.signal(notice.clone());

        Ok(PollOutcome::Updated(notice))
    }

    /// Loads the previous record. An unreadable record counts as absent so the
    /// next save replaces it.
    fn load_previous(&self) -> Result<Option<UpdateRecord>, StateError> {
        match self.store.load() {
            Err(StateError::Json(e)) => {
                warn!(path = %self.store.path().display(), "discarding malformed update record: {e}");
                Ok(None)
            }
            other => other,
        }
    }

    fn signal(&self, notice: UpdateNotice) {
        match self.notices.try_send(notice) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("update listener is behind, dropping notice")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => debug!("no update listener"),
        }
    }

    /// Loops until `cancel` fires: check, then sleep for the interval.
    pub async fn run(self, cancel: CancellationToken) {
        info!(interval_secs = self.interval.as_secs(), "poll loop started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.check() => {
                    if let Err(e) = result {
                        match e {
                            PollError::Feed(e) => warn!("feed check failed, retrying next cycle: {e}"),
                            PollError::State(e) => error!("update record unavailable: {e}"),
                        }
                    }
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("poll loop stopped");
    }

    /// Spawns [`Poller::run`] on the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
