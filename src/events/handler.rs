//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, InputTarget, LookupKind, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Snapshot of the store for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Clone)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    has_popup: bool,
    has_error: bool,
    show_help: bool,
    player_query: String,
    faction_query: String,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Create a new event handler with the default bindings.
    pub fn new() -> Self {
        Self::with_keybindings(KeyBindings::default())
    }

    /// Create a new event handler with custom bindings.
    pub fn with_keybindings(keybindings: KeyBindings) -> Self {
        Self {
            keybindings,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            has_popup: store.app.error.is_some() || store.app.notification.is_some(),
            has_error: store.app.error.is_some(),
            show_help: store.app.show_help,
            player_query: store.players.query.clone(),
            faction_query: store.factions.query.clone(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Editing => self.handle_editing_mode(key),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let input = InputEvent::from(key);

        // Popups swallow confirm/back
        if snapshot.has_popup
            && (input.matches(&self.keybindings.back) || input.matches(&self.keybindings.select))
        {
            return Some(if snapshot.has_error {
                Action::ClearError
            } else {
                Action::DismissNotification
            });
        }

        if snapshot.show_help && input.matches(&self.keybindings.back) {
            return Some(Action::ToggleHelp);
        }

        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }

        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }

        // View switching
        if input.matches(&self.keybindings.market) {
            return Some(Action::SetView(View::Market));
        }
        if input.matches(&self.keybindings.players) {
            return Some(Action::SetView(View::Players));
        }
        if input.matches(&self.keybindings.factions) {
            return Some(Action::SetView(View::Factions));
        }
        if input.matches(&self.keybindings.status) {
            return Some(Action::SetView(View::Status));
        }
        if input.matches(&self.keybindings.settings) {
            return Some(Action::SetView(View::Settings));
        }
        if key.code == KeyCode::Tab {
            return Some(Action::NextView);
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }

        // Page navigation
        match key.code {
            KeyCode::PageUp => return Some(Action::PageUp),
            KeyCode::PageDown => return Some(Action::PageDown),
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // View-specific actions
        match snapshot.current_view {
            View::Market => self.handle_market_view(key),
            View::Players => self.handle_lookup_view(
                key,
                LookupKind::Player,
                InputTarget::PlayerQuery,
                &snapshot.player_query,
            ),
            View::Factions => self.handle_lookup_view(
                key,
                LookupKind::Faction,
                InputTarget::FactionQuery,
                &snapshot.faction_query,
            ),
            View::Status => self.handle_status_view(key),
            View::Settings => self.handle_settings_view(key),
        }
    }

    fn handle_market_view(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RefreshMarket);
        }
        if input.matches(&self.keybindings.search) {
            return Some(Action::BeginInput(InputTarget::MarketSearch));
        }
        if input.matches(&self.keybindings.min_price) {
            return Some(Action::BeginInput(InputTarget::MinPrice));
        }
        if input.matches(&self.keybindings.max_price) {
            return Some(Action::BeginInput(InputTarget::MaxPrice));
        }
        if input.matches(&self.keybindings.sort) {
            return Some(Action::CycleSort);
        }
        if input.matches(&self.keybindings.export) {
            return Some(Action::BeginInput(InputTarget::ExportPath));
        }
        if input.matches(&self.keybindings.left) || key.code == KeyCode::Left {
            return Some(Action::PrevPage);
        }
        if input.matches(&self.keybindings.right) || key.code == KeyCode::Right {
            return Some(Action::NextPage);
        }

        None
    }

    fn handle_lookup_view(
        &self,
        key: KeyEvent,
        kind: LookupKind,
        target: InputTarget,
        last_query: &str,
    ) -> Option<Action> {
        let input = InputEvent::from(key);

        if input.matches(&self.keybindings.search) || input.matches(&self.keybindings.select) {
            return Some(Action::BeginInput(target));
        }
        if input.matches(&self.keybindings.refresh) && !last_query.is_empty() {
            return Some(Action::Lookup(kind, last_query.to_string()));
        }

        None
    }

    fn handle_status_view(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        if input.matches(&self.keybindings.refresh) || input.matches(&self.keybindings.select) {
            return Some(Action::Lookup(LookupKind::Status, String::new()));
        }

        None
    }

    fn handle_settings_view(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        if input.matches(&self.keybindings.save) {
            return Some(Action::SaveSettings);
        }
        if input.matches(&self.keybindings.select) {
            return Some(Action::EditSelectedSetting);
        }

        None
    }

    fn handle_editing_mode(&self, key: KeyEvent) -> Option<Action> {
        let input = InputEvent::from(key);

        match key.code {
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Enter => Some(Action::SubmitInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Left => Some(Action::InputCursorLeft),
            KeyCode::Right => Some(Action::InputCursorRight),
            KeyCode::Char(c) if !input.has_command_modifier() => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new();
        handler.update_store_snapshot(store);
        handler
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(&Config::default(), tx)
    }

    fn press(handler: &EventHandler, code: KeyCode) -> Option<Action> {
        handler.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_market_keys() {
        let handler = handler_for(&store());

        assert!(matches!(press(&handler, KeyCode::Char('r')), Some(Action::RefreshMarket)));
        assert!(matches!(press(&handler, KeyCode::Char('s')), Some(Action::CycleSort)));
        assert!(matches!(press(&handler, KeyCode::Right), Some(Action::NextPage)));
        assert!(matches!(
            press(&handler, KeyCode::Char('/')),
            Some(Action::BeginInput(InputTarget::MarketSearch))
        ));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT)),
            Some(Action::BeginInput(InputTarget::MaxPrice))
        ));
    }

    #[test]
    fn test_editing_mode_captures_characters() {
        let mut store = store();
        store.reduce(Action::BeginInput(InputTarget::MarketSearch));
        let handler = handler_for(&store);

        assert!(matches!(press(&handler, KeyCode::Char('q')), Some(Action::InputChar('q'))));
        assert!(matches!(press(&handler, KeyCode::Enter), Some(Action::SubmitInput)));
        assert!(matches!(press(&handler, KeyCode::Esc), Some(Action::CancelInput)));
    }

    #[test]
    fn test_popup_is_dismissed_first() {
        let mut store = store();
        store.reduce(Action::SetError("boom".to_string()));
        let handler = handler_for(&store);

        assert!(matches!(press(&handler, KeyCode::Enter), Some(Action::ClearError)));
    }

    #[test]
    fn test_status_refresh() {
        let mut store = store();
        store.reduce(Action::SetView(View::Status));
        let handler = handler_for(&store);

        assert!(matches!(
            press(&handler, KeyCode::Char('r')),
            Some(Action::Lookup(LookupKind::Status, _))
        ));
    }

    #[test]
    fn test_lookup_refresh_needs_previous_query() {
        let mut store = store();
        store.reduce(Action::SetView(View::Players));
        let handler = handler_for(&store);
        assert!(press(&handler, KeyCode::Char('r')).is_none());

        store.reduce(Action::Lookup(LookupKind::Player, "Notch".to_string()));
        let handler = handler_for(&store);
        assert!(matches!(
            press(&handler, KeyCode::Char('r')),
            Some(Action::Lookup(LookupKind::Player, q)) if q == "Notch"
        ));
    }

    #[test]
    fn test_settings_save_shortcut() {
        let mut store = store();
        store.reduce(Action::SetView(View::Settings));
        let handler = handler_for(&store);

        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::SaveSettings)
        ));
    }

    #[test]
    fn test_no_snapshot_no_action() {
        let handler = EventHandler::new();
        assert!(press(&handler, KeyCode::Char('q')).is_none());
    }
}
