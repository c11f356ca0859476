//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic. Nothing
//! here mutates the store; every frame is drawn from a `&Store`.

mod layout;
mod widgets;

pub use layout::Layout;

use crate::state::{Store, View};
use ratatui::Frame;
use widgets::{
    HelpPanel, InputLine, LookupView, MarketView, SettingsView, StatusBar, TabBar,
};

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area(), store.app.is_editing());

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);

        match store.app.current_view {
            View::Market => MarketView::render(frame, layout.main_area, store),
            View::Players => LookupView::render(frame, layout.main_area, "Player", &store.players),
            View::Factions => {
                LookupView::render(frame, layout.main_area, "Faction", &store.factions)
            }
            View::Status => LookupView::render(frame, layout.main_area, "Server status", &store.status),
            View::Settings => SettingsView::render(frame, layout.main_area, store),
        }

        if let Some(input_area) = layout.input_area {
            InputLine::render(frame, input_area, store);
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }

        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        }
    }
}
