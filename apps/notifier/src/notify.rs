//! Desktop notifications via notify-rust.
//!
//! On freedesktop platforms the notification carries a default action and a
//! watcher thread reports its activation as [`TrayEvent::NotificationClicked`].
//! Elsewhere the notification is shown without click handling and the native
//! tray reports a click on its icon instead.

use std::sync::mpsc;

use upd8_tray::{TrayEvent, UpdateNotification};

const APP_NAME: &str = "upd8";

/// Shows `notification`; its activation is reported on `events`.
#[cfg(all(unix, not(target_os = "macos")))]
pub fn show(
    notification: &UpdateNotification,
    events: &mpsc::Sender<TrayEvent>,
) -> Result<(), notify_rust::error::Error> {
    let handle = desktop(notification).action("default", "Open").show()?;

    let events = events.clone();
    let id = notification.id;
    let watcher = std::thread::Builder::new()
        .name(format!("upd8-notification-{id}"))
        .spawn(move || {
            handle.wait_for_action(|action| {
                if action == "default" {
                    let _ = events.send(TrayEvent::NotificationClicked(id));
                }
            });
        });
    if let Err(e) = watcher {
        tracing::warn!(id, "notification click watcher not started: {e}");
    }

    tracing::debug!(id, "desktop notification shown");
    Ok(())
}

/// Shows `notification`. Activations are not reported on this platform; the
/// tray icon click stands in for them.
#[cfg(not(all(unix, not(target_os = "macos"))))]
pub fn show(
    notification: &UpdateNotification,
    _events: &mpsc::Sender<TrayEvent>,
) -> Result<(), notify_rust::error::Error> {
    desktop(notification).show()?;
    tracing::debug!(id = notification.id, "desktop notification shown");
    Ok(())
}

fn desktop(notification: &UpdateNotification) -> notify_rust::Notification {
    let mut desktop = notify_rust::Notification::new();
    desktop
        .appname(APP_NAME)
        .summary(&notification.title)
        .body(&notification.body);
    if let Some(icon) = &notification.icon {
        desktop.icon(icon);
    }
    desktop
}
