//! TUI widgets.

mod charts;
mod help;
mod input_line;
mod lookup_view;
mod market_table;
mod market_view;
mod notifications;
mod settings_view;
mod status_bar;
mod tab_bar;

pub use help::HelpPanel;
pub use input_line::InputLine;
pub use lookup_view::LookupView;
pub use market_view::MarketView;
pub use notifications::{render_error, render_notification};
pub use settings_view::SettingsView;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

/// Keep at most `max` characters of `s`.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_is_char_aware() {
        assert_eq!(truncate_chars("Épée en paladium renforcée", 16), "Épée en paladium");
        assert_eq!(truncate_chars("stone", 16), "stone");
    }
}
