//! upd8 notifier entry point.

mod app;
mod backend;
mod config;
#[cfg(target_os = "linux")]
#[path = "native_tray_linux.rs"]
mod native_tray;
#[cfg(not(target_os = "linux"))]
mod native_tray;
mod notify;
mod presenter;

use tracing_subscriber::EnvFilter;
use upd8_tray::TrayHandle;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting upd8 notifier");

    let config = config::Config::load()?;
    tracing::info!(state = %config.state_path.display(), "configuration loaded");

    let (tray, events, updates) = TrayHandle::new(config.tray_config());
    let tray_config = tray.config().clone();

    // The tray keeps the main thread: macOS only runs its event loop there.
    let core = std::thread::Builder::new()
        .name("upd8-core".into())
        .spawn(move || -> anyhow::Result<()> {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(app::run(config, tray))
        })?;

    native_tray::run(tray_config, events, updates, core)
}
