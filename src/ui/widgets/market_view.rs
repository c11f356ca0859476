//! Market tab: filter controls, listing table and charts.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{charts, market_table::MarketTable};
use crate::state::{MarketState, Store};

/// Market tab.
pub struct MarketView;

impl MarketView {
    /// Render the market tab.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let market = &store.market;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Controls
                Constraint::Percentage(55), // Table
                Constraint::Min(8),         // Charts
            ])
            .split(area);

        render_controls(frame, rows[0], market);
        MarketTable::render(frame, rows[1], market);

        let charts_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(rows[2]);

        charts::render_top_quantities(frame, charts_area[0], &market.aggregates);
        charts::render_price_stats(frame, charts_area[1], &market.aggregates);
        charts::render_scatter(frame, charts_area[2], &market.aggregates);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, market: &MarketState) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("[/] Search: ", label),
        Span::styled(display_or(&market.search, "—"), value),
        Span::raw("  "),
        Span::styled("[m] Min: ", label),
        Span::styled(display_or(&market.min_price, "—"), value),
        Span::raw("  "),
        Span::styled("[M] Max: ", label),
        Span::styled(display_or(&market.max_price, "—"), value),
        Span::raw("  "),
        Span::styled("[s] Sort: ", label),
        Span::styled(market.sort.to_string(), value),
        Span::raw("  "),
        Span::styled("[h/l] Page ", label),
        Span::styled(market.page.to_string(), value),
        Span::raw("  "),
        Span::styled("[e] Export", label),
    ];

    if let Some(error) = &market.filter_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, area);
}

fn display_or<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() { placeholder } else { text }
}
