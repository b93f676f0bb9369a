//! Context menu for the system tray.

use crate::tray::TrayEvent;

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the main site in the browser.
    OpenSite,
    /// User requested to quit the application.
    Quit,
}

impl MenuAction {
    /// Event the tray backend reports when this action is activated.
    pub fn event(&self) -> TrayEvent {
        match self {
            Self::OpenSite => TrayEvent::OpenSiteRequested,
            Self::Quit => TrayEvent::QuitRequested,
        }
    }
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

/// State used to build the context menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Label of the "open site" entry.
    pub site_label: String,
    /// Label of the exit entry.
    pub quit_label: String,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            site_label: "Open Homestuck^2".into(),
            quit_label: "Exit".into(),
        }
    }
}

impl MenuState {
    /// Builds the menu items: open site, then exit.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                label: self.site_label.clone(),
                enabled: true,
                action: Some(MenuAction::OpenSite),
            },
            MenuItem {
                label: self.quit_label.clone(),
                enabled: true,
                action: Some(MenuAction::Quit),
            },
        ]
    }
}
