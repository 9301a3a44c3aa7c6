use ratatui::layout::{Constraint, Layout, Rect};

pub const HEADER_HEIGHT: u16 = 2;
pub const CAROUSEL_HEIGHT: u16 = 12;
pub const CAROUSEL_MAX_WIDTH: u16 = 96;
pub const NAV_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;

/// Regions of the single page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAreas {
    pub header: Rect,
    pub carousel: Rect,
    pub nav: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn page(area: Rect) -> PageAreas {
    let rects = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(CAROUSEL_HEIGHT),
        Constraint::Length(NAV_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .split(area);

    PageAreas {
        header: rects[0],
        carousel: centered_width(rects[1], CAROUSEL_MAX_WIDTH),
        nav: rects[2],
        body: rects[3],
        status: rects[4],
    }
}

/// Caps the width of `area`, keeping it horizontally centred.
pub fn centered_width(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
