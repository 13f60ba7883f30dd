//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub list: Rect,
    pub panel: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    // Main vertical layout: content + status line + help bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Horizontal split: dictionary list (25%) and panel (75%)
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(main_chunks[0]);

    MainLayout {
        list: horizontal_chunks[0],
        panel: horizontal_chunks[1],
        status: main_chunks[1],
        help: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));

        let tiny = centered_popup(Rect::new(0, 0, 20, 5), 50, 10);
        assert_eq!(tiny.width, 20);
        assert_eq!(tiny.height, 5);
    }

    #[test]
    fn test_main_layout_reserves_bars() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.help.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.list.height, 28);
        assert_eq!(layout.list.width + layout.panel.width, 100);
    }
}
