//! Single-line text input.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Store;

/// Prompt and buffer for the active text input.
pub struct InputLine;

impl InputLine {
    /// Render the input line and place the cursor.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let input = &store.app.input;
        let Some(target) = input.target else {
            return;
        };

        let block = Block::default()
            .title(format!(" {} ", target.prompt()))
            .title_bottom(" Enter confirm · Esc cancel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);

        frame.render_widget(Paragraph::new(input.buffer.as_str()).block(block), area);

        if inner.width > 0 && inner.height > 0 {
            let offset = (input.cursor as u16).min(inner.width - 1);
            frame.set_cursor_position((inner.x + offset, inner.y));
        }
    }
}
