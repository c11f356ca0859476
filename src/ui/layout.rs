//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Text input line, present while editing.
    pub input_area: Option<Rect>,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, editing: bool) -> Self {
        let input_height = if editing { 3 } else { 0 };
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // Status bar
                Constraint::Length(1),            // Tab bar
                Constraint::Min(0),               // Main content
                Constraint::Length(input_height), // Input line
            ])
            .split(area);

        // Notification area is centered in the main area
        let notification_area = Rect {
            x: area.x + area.width / 4,
            y: area.y + (area.height / 2).saturating_sub(2),
            width: area.width / 2,
            height: 4.min(area.height),
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area: chunks[2],
            input_area: editing.then_some(chunks[3]),
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_area_only_while_editing() {
        let area = Rect::new(0, 0, 80, 24);
        assert!(Layout::new(area, false).input_area.is_none());

        let layout = Layout::new(area, true);
        assert_eq!(layout.input_area.map(|r| r.height), Some(3));
        assert_eq!(layout.main_area.height, 24 - 2 - 3);
    }

    #[test]
    fn test_notification_area_fits_small_terminal() {
        let layout = Layout::new(Rect::new(0, 0, 20, 2), false);
        assert!(layout.notification_area.bottom() <= 2);
    }
}
