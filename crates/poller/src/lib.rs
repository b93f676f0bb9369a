//! Poll loop for the upd8 notifier.
//!
//! Every cycle fetches the feed, compares its stamp against the persisted
//! [`UpdateRecord`](upd8_state::UpdateRecord), rewrites the record, and when the
//! stamp moved sends one [`UpdateNotice`] describing the update's first page.
//!
//! The loop is stopped cooperatively through a `CancellationToken`; the sleep
//! between cycles and an in-flight fetch are both interrupted by it.

mod poller;
mod scan;

pub use poller::{DEFAULT_POLL_INTERVAL, PollError, PollOutcome, Poller, UpdateNotice};
pub use scan::{FirstPage, locate_first_page};
