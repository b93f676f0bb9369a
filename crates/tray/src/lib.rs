//! System tray model for the upd8 notifier.
//!
//! Provides the tray context menu (open site, exit), the update
//! notification shown when the poll loop finds new pages, and the one-shot
//! binding between a notification and the page it opens.
//!
//! The tray communicates with the application core via channels:
//! - [`TrayEvent`] — events from tray to core (menu clicks, notification clicks)
//! - [`TrayUpdate`] — updates from core to tray (show notification, shutdown)
//!
//! # Platform notes
//! - The concrete backend (desktop notifications, native tray icon) lives in
//!   the application; this crate has no GUI dependencies
//! - The tray event loop must not block the core

mod menu;
mod notification;
mod tray;

pub use menu::{MenuAction, MenuItem, MenuState};
pub use notification::{ClickBinding, UpdateNotification, format_notification_body};
pub use tray::{TrayConfig, TrayEvent, TrayHandle, TrayUpdate};
