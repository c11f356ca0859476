//! Key bindings.

/// Key bindings used by the event handler.
///
/// Bindings are strings understood by [`crate::events::InputEvent::matches`],
/// e.g. `"q"`, `"Ctrl+r"` or `"Enter"`.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Previous page / previous field.
    pub left: String,
    /// Next page / next field.
    pub right: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh data.
    pub refresh: String,
    /// Switch to market view.
    pub market: String,
    /// Switch to players view.
    pub players: String,
    /// Switch to factions view.
    pub factions: String,
    /// Switch to server status view.
    pub status: String,
    /// Switch to settings view.
    pub settings: String,
    /// Edit the market search term.
    pub search: String,
    /// Edit the minimum price bound.
    pub min_price: String,
    /// Edit the maximum price bound.
    pub max_price: String,
    /// Cycle the server-side sort key.
    pub sort: String,
    /// Export visible rows to CSV.
    pub export: String,
    /// Save settings.
    pub save: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            left: "h".to_string(),
            right: "l".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            market: "1".to_string(),
            players: "2".to_string(),
            factions: "3".to_string(),
            status: "4".to_string(),
            settings: "5".to_string(),
            search: "/".to_string(),
            min_price: "m".to_string(),
            max_price: "M".to_string(),
            sort: "s".to_string(),
            export: "e".to_string(),
            save: "Ctrl+s".to_string(),
        }
    }
}
