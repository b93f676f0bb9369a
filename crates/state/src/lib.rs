//! Last-update state for the upd8 notifier.
//!
//! A single JSON object on disk remembers the feed stamp seen by the last
//! successful poll plus a description of the most recently detected update.
//! The file has exactly one writer (the poll loop), so there is no locking.

mod record;
mod store;

pub use record::UpdateRecord;
pub use store::{DEFAULT_STATE_PATH, StateError, StateStore};
