//! Status bar widget.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let (loading, last_updated) = match store.app.current_view {
            View::Market => (store.market.loading, store.market.last_updated),
            View::Players => (store.players.loading, store.players.last_updated),
            View::Factions => (store.factions.loading, store.factions.last_updated),
            View::Status => (store.status.loading, store.status.last_updated),
            View::Settings => (false, None),
        };

        let loading = if loading {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let updated = Span::styled(
            format_updated(last_updated),
            Style::default().fg(Color::Gray),
        );

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::DarkGray));

        let left_content = vec![
            Span::styled(
                " Paladium ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{} ", store.settings.auth_scheme),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("| "),
            updated,
            loading,
        ];

        // Right-align the help hint
        let left_len: usize = left_content.iter().map(|s| s.content.chars().count()).sum();
        let right_len = help_hint.content.chars().count();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut full_line = left_content;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}

fn format_updated(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => format!("updated {}", at.with_timezone(&Local).format("%H:%M:%S")),
        None => "never updated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_updated() {
        assert_eq!(format_updated(None), "never updated");
        assert!(format_updated(Some(Utc::now())).starts_with("updated "));
    }
}
