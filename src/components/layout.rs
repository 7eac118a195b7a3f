//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of one grid card including its border
pub const CARD_WIDTH: u16 = 30;

/// Height of one grid card including its border
pub const CARD_HEIGHT: u16 = 6;

/// Main screen layout areas
pub struct MainLayout {
    pub featured: Option<Rect>,
    pub controls: Rect,
    pub categories: Rect,
    pub summary: Rect,
    pub results: Rect,
    pub footer: Rect,
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
pub fn calculate_main_layout(area: Rect, show_featured: bool) -> MainLayout {
    let mut constraints = Vec::with_capacity(8);
    if show_featured {
        constraints.push(Constraint::Length(4));
    }
    constraints.extend([
        Constraint::Length(3), // search / sort / view
        Constraint::Length(1), // categories
        Constraint::Length(1), // results summary
        Constraint::Min(0),    // grid or list
        Constraint::Length(1), // load more / back to top
        Constraint::Length(1), // status
        Constraint::Length(1), // help bar
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (featured, rest) = if show_featured {
        (Some(chunks[0]), &chunks[1..])
    } else {
        (None, &chunks[..])
    };

    MainLayout {
        featured,
        controls: rest[0],
        categories: rest[1],
        summary: rest[2],
        results: rest[3],
        footer: rest[4],
        status: rest[5],
        help: rest[6],
    }
}

/// Number of card columns that fit in `width`
pub fn grid_columns(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// Number of card rows that fit in `height`
pub fn grid_rows(height: u16) -> usize {
    (height / CARD_HEIGHT).max(1) as usize
}

/// Cut `text` to at most `width` display columns, ending with `…` when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("Gothic", 10), "Gothic");
        assert_eq!(truncate("Gothic", 6), "Gothic");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        assert_eq!(truncate("Midnight Cathedral", 9), "Midnight…");
        // Wide characters take two columns each
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_grid_geometry_never_zero() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(CARD_WIDTH * 3 + 5), 3);
        assert_eq!(grid_rows(2), 1);
        assert_eq!(grid_rows(CARD_HEIGHT * 4), 4);
    }

    #[test]
    fn test_main_layout_with_and_without_featured() {
        let area = Rect::new(0, 0, 100, 40);

        let layout = calculate_main_layout(area, true);
        assert_eq!(layout.featured.map(|r| r.height), Some(4));
        assert_eq!(layout.controls.y, 4);
        assert_eq!(layout.help.y, 39);

        let layout = calculate_main_layout(area, false);
        assert!(layout.featured.is_none());
        assert_eq!(layout.controls.y, 0);
        assert_eq!(layout.results.height, 40 - 3 - 1 - 1 - 3);
    }

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let popup = centered_popup(Rect::new(0, 0, 20, 10), 40, 7);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.y, 1);
    }
}
