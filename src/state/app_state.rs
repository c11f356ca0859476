//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Market,
    Players,
    Factions,
    Status,
    Settings,
}

impl View {
    /// All views, in tab order.
    pub const ALL: [View; 5] = [
        View::Market,
        View::Players,
        View::Factions,
        View::Status,
        View::Settings,
    ];

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Players => "Players",
            Self::Factions => "Factions",
            Self::Status => "Status",
            Self::Settings => "Settings",
        }
    }

    /// The next tab, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// A settings form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    ApiBase,
    ApiKey,
    AuthScheme,
    AuthHeader,
    Timeout,
    PageSize,
}

impl SettingField {
    /// All fields, in form order.
    pub const ALL: [SettingField; 6] = [
        SettingField::ApiBase,
        SettingField::ApiKey,
        SettingField::AuthScheme,
        SettingField::AuthHeader,
        SettingField::Timeout,
        SettingField::PageSize,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ApiBase => "API base",
            Self::ApiKey => "API key",
            Self::AuthScheme => "Auth scheme",
            Self::AuthHeader => "Auth header",
            Self::Timeout => "Timeout (s)",
            Self::PageSize => "Page size",
        }
    }
}

/// What the text input is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    MarketSearch,
    MinPrice,
    MaxPrice,
    PlayerQuery,
    FactionQuery,
    ExportPath,
    Setting(SettingField),
}

impl InputTarget {
    /// Prompt shown next to the input.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::MarketSearch => "Search",
            Self::MinPrice => "Min price",
            Self::MaxPrice => "Max price",
            Self::PlayerQuery => "Player name or UUID",
            Self::FactionQuery => "Faction ID",
            Self::ExportPath => "Export CSV to",
            Self::Setting(field) => field.label(),
        }
    }

    /// Whether every keystroke is applied immediately.
    pub fn is_live(self) -> bool {
        matches!(self, Self::MarketSearch | Self::MinPrice | Self::MaxPrice)
    }
}

/// Line editor state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// What is being edited, if anything.
    pub target: Option<InputTarget>,
    /// Current text.
    pub buffer: String,
    /// Cursor position, in characters.
    pub cursor: usize,
    /// Text the input started with.
    pub original: String,
}

impl InputState {
    /// Start editing `target` with `initial` text, cursor at the end.
    pub fn begin(&mut self, target: InputTarget, initial: impl Into<String>) {
        self.target = Some(target);
        self.buffer = initial.into();
        self.original = self.buffer.clone();
        self.cursor = self.buffer.chars().count();
    }

    /// Stop editing and return the target and text.
    pub fn finish(&mut self) -> Option<(InputTarget, String)> {
        let target = self.target.take()?;
        self.cursor = 0;
        self.original.clear();
        Some((target, std::mem::take(&mut self.buffer)))
    }

    /// Stop editing and return the target with the text it started with.
    pub fn cancel(&mut self) -> Option<(InputTarget, String)> {
        let target = self.target.take()?;
        self.cursor = 0;
        self.buffer.clear();
        Some((target, std::mem::take(&mut self.original)))
    }

    /// Insert a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Text input.
    pub input: InputState,
}

impl AppState {
    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_editing_handles_multibyte_text() {
        let mut input = InputState::default();
        input.begin(InputTarget::MarketSearch, "épée");
        assert_eq!(input.cursor, 4);

        input.cursor_left();
        input.push_char('!');
        assert_eq!(input.buffer, "épé!e");

        input.pop_char();
        input.pop_char();
        assert_eq!(input.buffer, "épe");

        let (target, text) = input.finish().unwrap();
        assert_eq!(target, InputTarget::MarketSearch);
        assert_eq!(text, "épe");
        assert!(input.target.is_none());
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_cancel_returns_initial_text() {
        let mut input = InputState::default();
        input.begin(InputTarget::MinPrice, "10");
        input.push_char('0');

        assert_eq!(input.cancel(), Some((InputTarget::MinPrice, "10".to_string())));
        assert!(input.target.is_none());
        assert!(input.buffer.is_empty());
        assert_eq!(input.cancel(), None);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Market.next(), View::Players);
        assert_eq!(View::Settings.next(), View::Market);
    }
}
