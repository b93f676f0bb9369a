//! Platform-independent half of the tray backend.
//!
//! Each native tray drives these helpers from its own loop: updates from the
//! core are rendered as desktop notifications until a shutdown arrives, then
//! the core thread is joined.

use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread::JoinHandle;

use upd8_tray::{TrayEvent, TrayUpdate, UpdateNotification};

/// Blocks on `updates` until shutdown or until the core drops its handle.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub fn relay(updates: &mpsc::Receiver<TrayUpdate>, mut show: impl FnMut(&UpdateNotification)) {
    while let Ok(update) = updates.recv() {
        if apply(update, &mut show).is_break() {
            break;
        }
    }
    tracing::debug!("tray backend stopped");
}

/// Handles every pending update without blocking.
///
/// Breaks on shutdown or when the core is gone.
#[cfg_attr(target_os = "linux", allow(dead_code))]
pub fn drain(
    updates: &mpsc::Receiver<TrayUpdate>,
    mut show: impl FnMut(&UpdateNotification),
) -> ControlFlow<()> {
    loop {
        match updates.try_recv() {
            Ok(update) => apply(update, &mut show)?,
            Err(mpsc::TryRecvError::Empty) => return ControlFlow::Continue(()),
            Err(mpsc::TryRecvError::Disconnected) => return ControlFlow::Break(()),
        }
    }
}

fn apply(update: TrayUpdate, show: &mut impl FnMut(&UpdateNotification)) -> ControlFlow<()> {
    match update {
        TrayUpdate::ShowNotification(notification) => {
            show(&notification);
            ControlFlow::Continue(())
        }
        TrayUpdate::Shutdown => ControlFlow::Break(()),
    }
}

/// Shows a desktop notification, logging failures.
pub fn show_notification(notification: &UpdateNotification, events: &mpsc::Sender<TrayEvent>) {
    if let Err(e) = crate::notify::show(notification, events) {
        tracing::warn!(id = notification.id, "failed to show notification: {e}");
    }
}

/// Waits for the core thread and surfaces its result.
pub fn finish(core: JoinHandle<anyhow::Result<()>>) -> anyhow::Result<()> {
    core.join()
        .map_err(|_| anyhow::anyhow!("notifier core panicked"))??;
    tracing::info!("notifier shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use upd8_tray::{TrayConfig, TrayHandle};

    #[test]
    fn relay_shows_until_shutdown() {
        let (mut handle, _events, updates) = TrayHandle::new(TrayConfig::default());
        handle.notify("one");
        handle.notify("two");
        handle.shutdown();
        handle.notify("after shutdown");

        let mut shown = Vec::new();
        relay(&updates, |n| shown.push(n.body.clone()));
        assert_eq!(shown, vec!["one", "two"]);
    }

    #[test]
    fn relay_stops_when_core_drops() {
        let (mut handle, _events, updates) = TrayHandle::new(TrayConfig::default());
        handle.notify("last");
        drop(handle);

        let mut shown = 0;
        relay(&updates, |_| shown += 1);
        assert_eq!(shown, 1);
    }

    #[test]
    fn drain_continues_while_core_is_alive() {
        let (mut handle, _events, updates) = TrayHandle::new(TrayConfig::default());
        assert_eq!(drain(&updates, |_| {}), ControlFlow::Continue(()));

        let id = handle.notify("body");
        let mut seen = None;
        assert_eq!(
            drain(&updates, |n| seen = Some(n.id)),
            ControlFlow::Continue(())
        );
        assert_eq!(seen, Some(id));
    }

    #[test]
    fn drain_breaks_on_shutdown_or_disconnect() {
        let (handle, _events, updates) = TrayHandle::new(TrayConfig::default());
        handle.shutdown();
        assert_eq!(drain(&updates, |_| {}), ControlFlow::Break(()));

        let (handle, _events, updates) = TrayHandle::new(TrayConfig::default());
        drop(handle);
        assert_eq!(drain(&updates, |_| {}), ControlFlow::Break(()));
    }

    #[test]
    fn finish_propagates_core_result() {
        let ok = std::thread::spawn(|| Ok(()));
        assert!(finish(ok).is_ok());

        let failed = std::thread::spawn(|| Err(anyhow::anyhow!("feed client")));
        assert_eq!(finish(failed).unwrap_err().to_string(), "feed client");

        let panicked = std::thread::spawn(|| -> anyhow::Result<()> { panic!("boom") });
        assert!(finish(panicked).is_err());
    }
}
