//! StatusNotifierItem tray icon on Linux via ksni.
//!
//! ksni runs its own D-Bus service thread, so the calling thread only relays
//! updates from the core.

use std::sync::mpsc;
use std::thread::JoinHandle;

use upd8_tray::{MenuAction, MenuState, TrayConfig, TrayEvent, TrayUpdate};

use crate::backend;

/// Themed icon used when the configuration names none.
const DEFAULT_ICON: &str = "mail-unread";

struct NativeTray {
    tooltip: String,
    icon: String,
    menu: MenuState,
    events: mpsc::Sender<TrayEvent>,
}

impl NativeTray {
    fn dispatch(&self, action: &MenuAction) {
        if self.events.send(action.event()).is_err() {
            tracing::debug!("tray event dropped, core is gone");
        }
    }
}

impl ksni::Tray for NativeTray {
    fn id(&self) -> String {
        "upd8".into()
    }

    fn title(&self) -> String {
        self.tooltip.clone()
    }

    fn icon_name(&self) -> String {
        self.icon.clone()
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        self.menu
            .build_menu()
            .into_iter()
            .map(|item| {
                let action = item.action;
                ksni::menu::StandardItem {
                    label: item.label,
                    enabled: item.enabled,
                    activate: Box::new(move |tray: &mut Self| {
                        if let Some(action) = &action {
                            tray.dispatch(action);
                        }
                    }),
                    ..Default::default()
                }
                .into()
            })
            .collect()
    }
}

/// Registers the tray icon, then relays core updates until shutdown.
pub fn run(
    config: TrayConfig,
    events: mpsc::Sender<TrayEvent>,
    updates: mpsc::Receiver<TrayUpdate>,
    core: JoinHandle<anyhow::Result<()>>,
) -> anyhow::Result<()> {
    let tray = NativeTray {
        tooltip: config.tooltip.clone(),
        icon: config.icon.clone().unwrap_or_else(|| DEFAULT_ICON.into()),
        menu: config.menu.clone(),
        events: events.clone(),
    };

    let service = ksni::TrayService::new(tray);
    let handle = service.handle();
    service.spawn();
    tracing::info!("native tray icon registered");

    backend::relay(&updates, |n| backend::show_notification(n, &events));

    handle.shutdown();
    backend::finish(core)
}
