use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub page: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    UiLayout {
        header: chunks[0],
        page: chunks[1],
        status: chunks[2],
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Bottom-right corner box, where the toast sits.
pub(crate) fn corner_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_rect, corner_rect, split_layout};

    #[test]
    fn split_layout_reserves_header_and_status_rows() {
        let layout = split_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.page.height, 38);
        assert_eq!(layout.page.y, 1);
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        assert_eq!(centered_rect(area, 99, 99), area);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(15, 7, 10, 4));
    }

    #[test]
    fn corner_rect_hugs_the_bottom_right() {
        let area = Rect::new(0, 1, 80, 22);
        assert_eq!(corner_rect(area, 30, 3), Rect::new(50, 20, 30, 3));
    }
}
