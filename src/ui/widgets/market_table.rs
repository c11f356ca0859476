//! Market listing table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::market::COLUMNS;
use crate::state::MarketState;

/// Table of the visible market rows.
pub struct MarketTable;

impl MarketTable {
    /// Render the table.
    pub fn render(frame: &mut Frame, area: Rect, market: &MarketState) {
        let rows = market.visible_rows();

        let header_cells = COLUMNS.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let body = rows.iter().map(|record| {
            let [item, category, price, quantity, seller, timestamp] = record.cells();
            let price_style = if record.price.as_f64().is_some() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            Row::new(vec![
                Cell::from(item),
                Cell::from(category),
                Cell::from(price).style(price_style),
                Cell::from(quantity),
                Cell::from(seller),
                Cell::from(timestamp),
            ])
            .height(1)
        });

        let table = Table::new(
            body,
            [
                Constraint::Percentage(26),
                Constraint::Percentage(14),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Percentage(16),
                Constraint::Min(12),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(Self::title(market, rows.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(market.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }

    fn title(market: &MarketState, visible: usize) -> String {
        if market.loading {
            format!(" Loading… (page {}) ", market.page)
        } else {
            format!(
                " Page {} ({} of {} listings) ",
                market.page,
                visible,
                market.records.len()
            )
        }
    }
}
