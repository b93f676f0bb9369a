//! Notifier configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/upd8/notifier.toml`
//! - Windows: `%APPDATA%/upd8/notifier.toml`

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use upd8_tray::{MenuState, TrayConfig};

/// Notifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Feed polled for updates.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Page opened by the "Open Homestuck^2" menu entry.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Where the last-update record lives.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Seconds to wait after each check.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_notification_title")]
    pub notification_title: String,

    /// Icon name or path for the tray and notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn default_feed_url() -> String {
    "https://www.homestuck2.com/story/rss".into()
}

fn default_site_url() -> String {
    "https://www.homestuck2.com/".into()
}

fn default_state_path() -> PathBuf {
    PathBuf::from(upd8_state::DEFAULT_STATE_PATH)
}

fn default_poll_interval() -> u64 {
    upd8_poller::DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_notification_title() -> String {
    "Homestuck^2 Update".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            site_url: default_site_url(),
            state_path: default_state_path(),
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
            notification_title: default_notification_title(),
            icon: None,
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Poll interval, never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn tray_config(&self) -> TrayConfig {
        TrayConfig {
            notification_title: self.notification_title.clone(),
            icon: self.icon.clone(),
            menu: MenuState::default(),
            ..TrayConfig::default()
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("upd8")
            .join("notifier.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("upd8").join("notifier.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/upd8/notifier.toml"))
    }
}
