//! System tray icon on Windows and macOS via tray-icon.
//!
//! The icon lives on a tao event loop that owns the main thread. Neither
//! platform reports notification activations through notify-rust, so a left
//! click on the tray icon stands in for clicking the latest notification.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use upd8_tray::{MenuAction, TrayConfig, TrayEvent, TrayUpdate};

use crate::backend;

/// How often the loop wakes to drain core updates.
const WAKE_INTERVAL: Duration = Duration::from_millis(100);
const ICON_SIZE: u32 = 32;

struct NativeTray {
    // Dropping the icon removes it from the tray.
    _icon: TrayIcon,
    actions: Vec<(MenuId, MenuAction)>,
}

impl NativeTray {
    fn build(config: &TrayConfig) -> anyhow::Result<Self> {
        let menu = Menu::new();
        let mut actions = Vec::new();
        for item in config.menu.build_menu() {
            let entry = MenuItem::new(&item.label, item.enabled, None);
            menu.append(&entry)?;
            if let Some(action) = item.action {
                actions.push((entry.id().clone(), action));
            }
        }

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(&config.tooltip)
            .with_icon(Icon::from_rgba(badge_rgba(), ICON_SIZE, ICON_SIZE)?)
            .build()?;

        Ok(Self {
            _icon: icon,
            actions,
        })
    }

    fn action(&self, id: &MenuId) -> Option<&MenuAction> {
        self.actions
            .iter()
            .find(|(item, _)| item == id)
            .map(|(_, action)| action)
    }
}

/// Runs the tray event loop on the calling thread. Never returns: the
/// process exits once the core has stopped.
pub fn run(
    config: TrayConfig,
    events: mpsc::Sender<TrayEvent>,
    updates: mpsc::Receiver<TrayUpdate>,
    core: JoinHandle<anyhow::Result<()>>,
) -> anyhow::Result<()> {
    tracing::warn!(
        "notification clicks are not reported on this platform, click the tray icon to open the latest update"
    );

    let event_loop = EventLoopBuilder::new().build();
    let mut tray: Option<NativeTray> = None;
    let mut latest: Option<u64> = None;
    let mut core = Some(core);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + WAKE_INTERVAL);

        // macOS only accepts status items once the loop is running.
        if let Event::NewEvents(StartCause::Init) = event {
            match NativeTray::build(&config) {
                Ok(built) => {
                    tracing::info!("native tray icon registered");
                    tray = Some(built);
                }
                Err(e) => tracing::error!("failed to create tray icon: {e:#}"),
            }
        }

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if let Some(action) = tray.as_ref().and_then(|t| t.action(&event.id)) {
                send(&events, action.event());
            }
        }
        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if is_left_click(&event)
                && let Some(id) = latest
            {
                send(&events, TrayEvent::NotificationClicked(id));
            }
        }

        let flow = backend::drain(&updates, |n| {
            latest = Some(n.id);
            backend::show_notification(n, &events);
        });
        if flow.is_break() {
            tray = None;
            if let Some(core) = core.take()
                && let Err(e) = backend::finish(core)
            {
                tracing::error!("{e:#}");
                std::process::exit(1);
            }
            *control_flow = ControlFlow::Exit;
        }
    })
}

fn send(events: &mpsc::Sender<TrayEvent>, event: TrayEvent) {
    if events.send(event).is_err() {
        tracing::debug!("tray event dropped, core is gone");
    }
}

fn is_left_click(event: &TrayIconEvent) -> bool {
    matches!(
        event,
        TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        }
    )
}

/// Round badge drawn when no themed icon is available.
fn badge_rgba() -> Vec<u8> {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 1.0;
    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let (dx, dy) = (x as f32 - center, y as f32 - center);
            let alpha = if dx * dx + dy * dy <= radius * radius { 0xff } else { 0 };
            rgba.extend_from_slice(&[0x2e, 0x8b, 0x57, alpha]);
        }
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_is_round() {
        let rgba = badge_rgba();
        assert_eq!(rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);

        let alpha = |x: u32, y: u32| rgba[((y * ICON_SIZE + x) * 4 + 3) as usize];
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(ICON_SIZE - 1, ICON_SIZE - 1), 0);
        assert_eq!(alpha(ICON_SIZE / 2, ICON_SIZE / 2), 0xff);
    }

    #[test]
    fn send_without_core_is_quiet() {
        let (events, rx) = mpsc::channel();
        drop(rx);
        send(&events, TrayEvent::QuitRequested);
    }
}
