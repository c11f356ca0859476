//! State management for Paladium.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Background fetches
//! never touch the store directly: they send an [`Action`] back to the UI
//! loop, which is the only place `reduce` runs.

mod app_state;
mod lookup_state;
mod market_state;
mod settings_state;

pub use app_state::{AppState, InputMode, InputState, InputTarget, SettingField, View};
pub use lookup_state::{LookupKind, LookupState};
pub use market_state::MarketState;
pub use settings_state::SettingsForm;

use crate::config::Config;
use crate::error::Result;
use crate::market::MarketRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Default file name offered for CSV export.
pub const DEFAULT_EXPORT_PATH: &str = "market.csv";

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    NextView,

    // Text input
    BeginInput(InputTarget),
    InputChar(char),
    InputBackspace,
    InputCursorLeft,
    InputCursorRight,
    SubmitInput,
    CancelInput,

    // Market actions
    RefreshMarket,
    NextPage,
    PrevPage,
    CycleSort,
    MarketPageLoaded {
        page: u32,
        records: Vec<MarketRecord>,
    },
    MarketFetchFailed {
        page: u32,
        error: String,
    },
    SetSearch(String),
    SetPriceBounds {
        min: String,
        max: String,
    },
    ExportCsv(PathBuf),

    // Lookups
    Lookup(LookupKind, String),
    LookupFinished(LookupKind, String),

    // Settings
    EditSelectedSetting,
    SaveSettings,
    ConfigApplied(Config),

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Error handling
    SetError(String),
    ClearError,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub shown_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            shown_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Error, 10)
    }

    /// Whether the notification has been visible for its full duration.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.shown_at).num_seconds() >= self.duration_secs as i64
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Market tab state.
    pub market: MarketState,
    /// Player lookup.
    pub players: LookupState,
    /// Faction lookup.
    pub factions: LookupState,
    /// Server status.
    pub status: LookupState,
    /// Settings form.
    pub settings: SettingsForm,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store for the given configuration.
    pub fn new(config: &Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            market: MarketState::new(config.page_size),
            players: LookupState::default(),
            factions: LookupState::default(),
            status: LookupState::default(),
            settings: SettingsForm::from_config(config),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// The lookup pane for `kind`.
    pub fn lookup(&self, kind: LookupKind) -> &LookupState {
        match kind {
            LookupKind::Player => &self.players,
            LookupKind::Faction => &self.factions,
            LookupKind::Status => &self.status,
        }
    }

    fn lookup_mut(&mut self, kind: LookupKind) -> &mut LookupState {
        match kind {
            LookupKind::Player => &mut self.players,
            LookupKind::Faction => &mut self.factions,
            LookupKind::Status => &mut self.status,
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.app.current_view = view,
            Action::NextView => self.app.current_view = self.app.current_view.next(),

            // Text input
            Action::BeginInput(target) => {
                let initial = self.input_initial_text(target);
                self.app.input.begin(target, initial);
                self.app.input_mode = InputMode::Editing;
            }
            Action::InputChar(c) => {
                self.app.input.push_char(c);
                self.sync_live_input();
            }
            Action::InputBackspace => {
                self.app.input.pop_char();
                self.sync_live_input();
            }
            Action::InputCursorLeft => self.app.input.cursor_left(),
            Action::InputCursorRight => self.app.input.cursor_right(),
            Action::SubmitInput => {
                self.app.input_mode = InputMode::Normal;
                if let Some((target, text)) = self.app.input.finish() {
                    self.submit_input(target, text);
                }
            }
            Action::CancelInput => {
                self.app.input_mode = InputMode::Normal;
                if let Some((target, original)) = self.app.input.cancel()
                    && target.is_live()
                {
                    self.apply_live_input(target, &original);
                }
            }

            // Market actions
            Action::RefreshMarket => self.market.loading = true,
            Action::NextPage => {
                self.market.next_page();
                self.market.loading = true;
            }
            Action::PrevPage => {
                if self.market.prev_page() {
                    self.market.loading = true;
                }
            }
            Action::CycleSort => {
                self.market.sort = self.market.sort.next();
                self.market.loading = true;
            }
            Action::MarketPageLoaded { page, records } => {
                tracing::debug!(page, count = records.len(), "market page loaded");
                self.market.replace_records(records);
            }
            Action::MarketFetchFailed { page, error } => {
                tracing::warn!(page, %error, "market fetch failed");
                self.market.loading = false;
                self.app.error = Some(error);
            }
            Action::SetSearch(term) => self.market.set_search(&term),
            Action::SetPriceBounds { min, max } => {
                if let Err(e) = self.market.set_price_bounds(&min, &max) {
                    self.app.error = Some(e.to_string());
                }
            }
            Action::ExportCsv(_) => {}

            // Lookups
            Action::Lookup(kind, query) => self.lookup_mut(kind).start(query.trim()),
            Action::LookupFinished(kind, output) => self.lookup_mut(kind).finish(output),

            // Settings
            Action::EditSelectedSetting => match self.settings.selected_field() {
                SettingField::AuthScheme => self.settings.cycle_auth_scheme(),
                field => self.reduce(Action::BeginInput(InputTarget::Setting(field))),
            },
            Action::SaveSettings => {}
            Action::ConfigApplied(config) => {
                let selected = self.settings.selected;
                self.settings = SettingsForm::from_config(&config);
                self.settings.selected = selected;
                self.market.page_size = config.page_size;
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
            }
            Action::ClearError => {
                self.app.error = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Drop the notification once it has been shown long enough.
    pub fn expire_notification(&mut self, now: DateTime<Utc>) {
        if self
            .app
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.app.notification = None;
        }
    }

    fn input_initial_text(&self, target: InputTarget) -> String {
        match target {
            InputTarget::MarketSearch => self.market.search.clone(),
            InputTarget::MinPrice => self.market.min_price.clone(),
            InputTarget::MaxPrice => self.market.max_price.clone(),
            InputTarget::PlayerQuery => self.players.query.clone(),
            InputTarget::FactionQuery => self.factions.query.clone(),
            InputTarget::ExportPath => DEFAULT_EXPORT_PATH.to_string(),
            InputTarget::Setting(field) => self.settings.value(field),
        }
    }

    /// Apply the buffer of a live input on every keystroke.
    fn sync_live_input(&mut self) {
        let Some(target) = self.app.input.target.filter(|t| t.is_live()) else {
            return;
        };
        let text = self.app.input.buffer.clone();
        self.apply_live_input(target, &text);
    }

    /// Invalid bound text is kept in `filter_error` and shown inline.
    fn apply_live_input(&mut self, target: InputTarget, text: &str) {
        match target {
            InputTarget::MarketSearch => self.market.set_search(text),
            InputTarget::MinPrice => {
                let max = self.market.max_price.clone();
                let _ = self.market.set_price_bounds(text, &max);
            }
            InputTarget::MaxPrice => {
                let min = self.market.min_price.clone();
                let _ = self.market.set_price_bounds(&min, text);
            }
            _ => {}
        }
    }

    fn submit_input(&mut self, target: InputTarget, text: String) {
        let follow_up = match target {
            InputTarget::MarketSearch => {
                self.market.set_search(&text);
                Some(Action::RefreshMarket)
            }
            InputTarget::MinPrice => Some(Action::SetPriceBounds {
                min: text,
                max: self.market.max_price.clone(),
            }),
            InputTarget::MaxPrice => Some(Action::SetPriceBounds {
                min: self.market.min_price.clone(),
                max: text,
            }),
            InputTarget::PlayerQuery if !text.trim().is_empty() => {
                Some(Action::Lookup(LookupKind::Player, text))
            }
            InputTarget::FactionQuery if !text.trim().is_empty() => {
                Some(Action::Lookup(LookupKind::Faction, text))
            }
            InputTarget::PlayerQuery | InputTarget::FactionQuery => None,
            InputTarget::ExportPath if !text.trim().is_empty() => {
                Some(Action::ExportCsv(PathBuf::from(text.trim())))
            }
            InputTarget::ExportPath => None,
            InputTarget::Setting(field) => {
                self.settings.set_value(field, text);
                None
            }
        };

        if let Some(action) = follow_up
            && let Err(e) = self.dispatch(action)
        {
            tracing::warn!("failed to dispatch input submission: {}", e);
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Market => {
                let count = self.market.visible_rows().len();
                if count == 0 {
                    self.market.selected_index = None;
                    return;
                }
                let current = self.market.selected_index.unwrap_or(0) as i64;
                let new_index = (current + delta as i64).clamp(0, count as i64 - 1);
                self.market.selected_index = Some(new_index as usize);
            }
            View::Players => self.players.scroll_by(delta),
            View::Factions => self.factions.scroll_by(delta),
            View::Status => self.status.scroll_by(delta),
            View::Settings => self.settings.move_selection(delta),
        }
    }
}
