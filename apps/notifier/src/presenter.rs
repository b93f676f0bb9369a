//! Tray presenter: turns update notices into notifications and tray events
//! into browser launches.

use std::ops::ControlFlow;

use upd8_browser::Launcher;
use upd8_poller::UpdateNotice;
use upd8_tray::{ClickBinding, TrayEvent, TrayHandle, format_notification_body};

pub struct Presenter {
    tray: TrayHandle,
    launcher: Launcher,
    clicks: ClickBinding,
    site_url: String,
}

impl Presenter {
    pub fn new(tray: TrayHandle, launcher: Launcher, site_url: impl Into<String>) -> Self {
        Self {
            tray,
            launcher,
            clicks: ClickBinding::new(),
            site_url: site_url.into(),
        }
    }

    /// Shows the notification for a freshly detected update and binds its
    /// click to the update's first page.
    pub fn on_update(&mut self, notice: &UpdateNotice) {
        let body = format_notification_body(&notice.first_page_title, notice.page_count);
        let id = self.tray.notify(body);
        self.clicks.bind(id, notice.url.clone());
        tracing::debug!(id, url = %notice.url, "update notification shown");
    }

    /// Handles one tray event. Breaks when the user asked to exit.
    pub fn on_tray_event(&mut self, event: TrayEvent) -> ControlFlow<()> {
        match event {
            TrayEvent::OpenSiteRequested => {
                let url = self.site_url.clone();
                self.launch(url);
            }
            TrayEvent::NotificationClicked(id) => match self.clicks.take(id) {
                Some(url) => self.launch(url),
                None => tracing::debug!(id, "click on stale notification ignored"),
            },
            TrayEvent::QuitRequested => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Drains pending tray events. Breaks on the first exit request.
    pub fn pump_events(&mut self) -> ControlFlow<()> {
        while let Some(event) = self.tray.try_recv_event() {
            self.on_tray_event(event)?;
        }
        ControlFlow::Continue(())
    }

    fn launch(&self, url: String) {
        if let Err(e) = self.launcher.open(url.as_str()) {
            tracing::warn!(%url, "browser launch dropped: {e}");
        }
    }

    /// Shuts the tray backend down and drains the launcher.
    pub async fn shutdown(self) {
        self.tray.shutdown();
        self.launcher.shutdown().await;
    }
}
