use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::overlay::OverlayKind;
use crate::page::{ElementId, PageSurface, ids};
use crate::site::Site;

use super::layout::{centered_rect, corner_rect};
use super::page::{outline, outline_line};

const MODAL_MAX_WIDTH: u16 = 72;
const TOAST_WIDTH: u16 = 40;

fn tone_color(site: &Site, kind: OverlayKind) -> Color {
    let page = site.page();
    let root = kind.root_id();
    if page.has_class(&root, "tone-error") {
        Color::Red
    } else if page.has_class(&root, "tone-success") {
        Color::Green
    } else {
        Color::DarkGray
    }
}

fn title(site: &Site, kind: OverlayKind) -> String {
    site.page()
        .text(&kind.part_id("title"))
        .unwrap_or_else(|| kind.slug().replace('-', " "))
}

/// Draws the open drawer, then open overlays in opening order so the
/// topmost ends up on top.
pub fn draw_overlays(frame: &mut Frame<'_>, area: Rect, site: &Site) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    if site.drawer_open() {
        draw_drawer(frame, area, site);
    }
    let page = site.page();
    for kind in site.overlays().open_kinds() {
        let root = kind.root_id();
        if !page.exists(&root) {
            continue;
        }
        let lines: Vec<Line<'static>> = outline(page, &root)
            .iter()
            .filter(|line| line.id != kind.part_id("title"))
            .map(outline_line)
            .collect();
        let width = if kind.is_modal() {
            area.width.min(MODAL_MAX_WIDTH)
        } else {
            area.width.min(TOAST_WIDTH)
        };
        let inner_width = usize::from(width.saturating_sub(2));
        let rows: usize = lines
            .iter()
            .map(|line| wrapped_rows(&line_text(line), inner_width))
            .sum();
        let height = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let popup = if kind.is_modal() {
            centered_rect(area, width, height)
        } else {
            corner_rect(area, width, height)
        };
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", title(site, kind)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tone_color(site, kind)));
        let body = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(body, popup);
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Rows `text` takes when word-wrapped at `width` columns. Words wider than
/// the row are split across rows.
pub(crate) fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let indent = text.len() - text.trim_start_matches(' ').len();
    let mut rows = 1;
    let mut used = indent.min(width);
    let mut at_start = true;
    for word in text[indent..].split(' ') {
        let word_width = word.width();
        let needed = if at_start {
            used + word_width
        } else {
            used + 1 + word_width
        };
        at_start = false;
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        rows += word_width.saturating_sub(1) / width;
        used = match word_width % width {
            0 if word_width > 0 => width,
            rest => rest,
        };
    }
    rows
}

/// The mobile navigation drawer slides over the right half of the page.
fn draw_drawer(frame: &mut Frame<'_>, area: Rect, site: &Site) {
    let page = site.page();
    let nav = ElementId::new(ids::MAIN_NAV);
    let lines: Vec<Line<'static>> = outline(page, &nav).iter().map(outline_line).collect();
    let width = (area.width / 2).max(1);
    let drawer = Rect::new(area.x + area.width - width, area.y, width, area.height);
    frame.render_widget(Clear, drawer);
    let block = Block::default().title(" Menu ").borders(Borders::LEFT);
    frame.render_widget(Paragraph::new(lines).block(block), drawer);
}
