//! Application orchestrator — wires the poller, tray and browser together.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use upd8_browser::Launcher;
use upd8_feed::Client;
use upd8_poller::{Poller, UpdateNotice};
use upd8_state::StateStore;
use upd8_tray::TrayHandle;

use crate::config::Config;
use crate::presenter::Presenter;

/// How often pending tray events are drained.
const TRAY_PUMP_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the notifier until the user exits.
///
/// `tray` talks to the native tray running on the main thread; dropping it
/// on return lets that loop wind down even when startup fails.
pub async fn run(config: Config, tray: TrayHandle) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // -- Poller --
    let client = Client::new(config.feed_url.clone(), config.request_timeout())?;
    tracing::info!(feed = client.url(), "feed client ready");
    let store = StateStore::new(config.state_path.clone());
    let (notice_tx, mut notice_rx) = mpsc::channel::<UpdateNotice>(4);
    let poll_task = Poller::new(client, store, notice_tx)
        .with_interval(config.poll_interval())
        .spawn(cancel.clone());

    let mut presenter = Presenter::new(tray, Launcher::spawn(), config.site_url.clone());

    tracing::info!("notifier ready");

    // -- Main loop: relay updates and tray events until exit --
    let mut pump = tokio::time::interval(TRAY_PUMP_INTERVAL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(notice) = notice_rx.recv() => presenter.on_update(&notice),
            _ = pump.tick() => {
                if let ControlFlow::Break(()) = presenter.pump_events() {
                    tracing::info!("quit requested via tray");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("SIGINT received, shutting down");
                break;
            }
        }
    }

    // -- Graceful shutdown --
    tracing::info!("stopping services...");
    cancel.cancel();
    if let Err(e) = poll_task.await {
        tracing::error!("poll task failed: {e}");
    }
    presenter.shutdown().await;

    Ok(())
}
