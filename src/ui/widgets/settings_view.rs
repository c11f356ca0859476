//! Settings form.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::state::{SettingField, Store};

/// Settings tab.
pub struct SettingsView;

impl SettingsView {
    /// Render the settings form.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let form = &store.settings;

        let rows = SettingField::ALL.iter().map(|&field| {
            let value = match field {
                SettingField::ApiKey => mask(&form.api_key),
                SettingField::AuthScheme => format!("{} (Enter to cycle)", form.auth_scheme),
                other => form.value(other),
            };
            Row::new(vec![
                Cell::from(field.label()).style(Style::default().fg(Color::Yellow)),
                Cell::from(value),
            ])
        });

        let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
            .block(
                Block::default()
                    .title(" Settings ")
                    .title_bottom(" Enter edit · Ctrl+s save ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(form.selected));

        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Hide all but the last four characters of a secret.
fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    if len == 0 {
        return "(not set)".to_string();
    }
    let shown = len.saturating_sub(4);
    secret
        .chars()
        .enumerate()
        .map(|(i, c)| if i < shown { '•' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("abc"), "abc");
        assert_eq!(mask("secret-key"), "••••••-key");
    }
}
