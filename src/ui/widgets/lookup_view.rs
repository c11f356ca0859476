//! Player, faction and status panes.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::LookupState;

/// A query line above a scrollable response.
pub struct LookupView;

impl LookupView {
    /// Render one lookup pane.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, lookup: &LookupState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let query = if lookup.query.is_empty() {
            Span::styled("press / to search", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(lookup.query.as_str())
        };
        let query_line = Paragraph::new(Line::from(vec![
            Span::styled("Query: ", Style::default().fg(Color::Yellow)),
            query,
        ]))
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(query_line, chunks[0]);

        let output_style = if lookup.output.starts_with("Error:") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };

        let output = Paragraph::new(lookup.output.as_str())
            .style(output_style)
            .wrap(Wrap { trim: false })
            .scroll((lookup.scroll, 0))
            .block(
                Block::default()
                    .title(" Response ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(output, chunks[1]);
    }
}
