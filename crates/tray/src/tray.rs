//! Tray handle, events, and update types.
//!
//! The backend that renders the icon and the notification bubbles runs on
//! its own thread; this module defines the channel-based interface the
//! application core uses to talk to it, independent of the GUI backend.

use std::sync::mpsc;

use crate::menu::MenuState;
use crate::notification::UpdateNotification;

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Tooltip shown on the tray icon.
    pub tooltip: String,
    /// Title of update notifications.
    pub notification_title: String,
    /// Optional icon name or path, used for the tray and notifications.
    pub icon: Option<String>,
    /// Context menu labels.
    pub menu: MenuState,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tooltip: "Homestuck^2 Notifier".into(),
            notification_title: "Homestuck^2 Update".into(),
            icon: None,
            menu: MenuState::default(),
        }
    }
}

/// Events emitted by the tray to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Open site" in the context menu.
    OpenSiteRequested,
    /// User clicked the notification with this ID.
    NotificationClicked(u64),
    /// User clicked "Exit" in the context menu.
    QuitRequested,
}

/// Updates sent from the core to the tray.
#[derive(Debug, Clone)]
pub enum TrayUpdate {
    /// Show a notification bubble.
    ShowNotification(UpdateNotification),
    /// Request tray shutdown.
    Shutdown,
}

/// Handle for communicating with the system tray from the core.
///
/// The tray backend loop owns the other ends of the channels.
pub struct TrayHandle {
    /// Send updates to the tray.
    update_tx: mpsc::Sender<TrayUpdate>,
    /// Receive events from the tray.
    event_rx: mpsc::Receiver<TrayEvent>,
    config: TrayConfig,
    next_notification_id: u64,
}

impl TrayHandle {
    /// Creates a new tray handle with its channel pair.
    ///
    /// Returns `(handle, event_sender, update_receiver)`; the sender/receiver
    /// pair is given to the tray backend loop.
    pub fn new(config: TrayConfig) -> (Self, mpsc::Sender<TrayEvent>, mpsc::Receiver<TrayUpdate>) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = Self {
            update_tx,
            event_rx,
            config,
            next_notification_id: 0,
        };

        (handle, event_tx, update_rx)
    }

    /// Shows a notification with the configured title and icon.
    ///
    /// Returns the notification ID that a later click will carry.
    pub fn notify(&mut self, body: impl Into<String>) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        let notification = UpdateNotification {
            id,
            title: self.config.notification_title.clone(),
            body: body.into(),
            icon: self.config.icon.clone(),
        };
        if self
            .update_tx
            .send(TrayUpdate::ShowNotification(notification))
            .is_err()
        {
            tracing::warn!(id, "tray backend gone, notification dropped");
        }
        id
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        let _ = self.update_tx.send(TrayUpdate::Shutdown);
    }

    /// Tries to receive a tray event (non-blocking).
    pub fn try_recv_event(&self) -> Option<TrayEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn config(&self) -> &TrayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_handle_creation() {
        let (handle, _event_tx, _update_rx) = TrayHandle::new(TrayConfig::default());
        assert_eq!(handle.config().notification_title, "Homestuck^2 Update");
        assert!(handle.try_recv_event().is_none());
    }

    #[test]
    fn notify_assigns_increasing_ids() {
        let (mut handle, _event_tx, update_rx) = TrayHandle::new(TrayConfig {
            icon: Some("hs2".into()),
            ..TrayConfig::default()
        });

        let first = handle.notify("one");
        let second = handle.notify("two");
        assert!(second > first);

        let mut shown = Vec::new();
        while let Ok(TrayUpdate::ShowNotification(n)) = update_rx.try_recv() {
            shown.push(n);
        }
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].id, first);
        assert_eq!(shown[0].title, "Homestuck^2 Update");
        assert_eq!(shown[0].body, "one");
        assert_eq!(shown[0].icon.as_deref(), Some("hs2"));
        assert_eq!(shown[1].id, second);
    }

    #[test]
    fn notify_without_backend_does_not_panic() {
        let (mut handle, _event_tx, update_rx) = TrayHandle::new(TrayConfig::default());
        drop(update_rx);
        handle.notify("lost");
    }

    #[test]
    fn tray_handle_events() {
        let (handle, event_tx, _update_rx) = TrayHandle::new(TrayConfig::default());

        event_tx.send(TrayEvent::OpenSiteRequested).unwrap();
        event_tx.send(TrayEvent::QuitRequested).unwrap();
        assert_eq!(handle.try_recv_event(), Some(TrayEvent::OpenSiteRequested));
        assert_eq!(handle.try_recv_event(), Some(TrayEvent::QuitRequested));
        assert!(handle.try_recv_event().is_none());
    }

    #[test]
    fn tray_handle_shutdown() {
        let (handle, _event_tx, update_rx) = TrayHandle::new(TrayConfig::default());

        handle.shutdown();
        let update = update_rx.recv().unwrap();
        assert!(matches!(update, TrayUpdate::Shutdown));
    }

    #[test]
    fn tray_config_default() {
        let config = TrayConfig::default();
        assert_eq!(config.tooltip, "Homestuck^2 Notifier");
        assert!(config.icon.is_none());
        assert_eq!(config.menu.quit_label, "Exit");
    }
}
