//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("PgUp/PgDn", "Page up/down"),
            ("Home/End", "Go to top/bottom"),
            ("Tab", "Next tab"),
            ("1-5", "Market, Players, Factions, Status, Settings"),
        ],
    ),
    (
        "Market",
        &[
            ("r", "Reload page"),
            ("/", "Search"),
            ("m / M", "Min / max price"),
            ("s", "Cycle sort"),
            ("h/l", "Previous / next page"),
            ("e", "Export visible rows to CSV"),
        ],
    ),
    (
        "Lookups",
        &[
            ("/ or Enter", "Enter a player or faction"),
            ("r", "Repeat the last lookup"),
        ],
    ),
    (
        "Settings",
        &[("Enter", "Edit field"), ("Ctrl+s", "Save and apply")],
    ),
    ("General", &[("?", "Toggle help"), ("Esc", "Dismiss / cancel"), ("q", "Quit")]),
];

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let heading = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let key = Style::default().fg(Color::Cyan);

        let mut help_text = Vec::new();
        for (title, bindings) in SECTIONS {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(*title, heading)));
            for (keys, description) in *bindings {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {:<12}", keys), key),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
