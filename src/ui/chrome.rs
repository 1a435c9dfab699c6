use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::page::{ElementId, PageSurface, ids};
use crate::scene::ModelState;
use crate::site::Site;

/// Site header: logo, top-level links and the scroll-driven header state.
pub fn draw_header(frame: &mut Frame<'_>, area: Rect, site: &Site) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let page = site.page();
    let focused = page.focused();
    let mut spans = vec![Span::styled(
        "Marsias",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    let toggle = if site.drawer_open() { " [x]" } else { " [=]" };
    spans.push(Span::raw(toggle));

    for link in page.query_class(ids::NAV_LINK_CLASS) {
        // Dropdown entries show up once their parent is expanded.
        let top_level = page
            .parent(&link)
            .and_then(|item| page.parent(&item))
            .is_some_and(|list| list.as_str() == "main-nav-list");
        let expanded = page
            .closest_with_class(&link, ids::DROPDOWN_PARENT_CLASS)
            .is_some_and(|parent| page.has_class(&parent, ids::ACTIVE_CLASS));
        if !top_level && !expanded {
            continue;
        }
        let label = page.text(&link).unwrap_or_default();
        let mut style = Style::default();
        if focused.as_ref() == Some(&link) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if page.has_class(&link, ids::HIGHLIGHT_CLASS) {
            style = style.fg(Color::Yellow);
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }

    let state = site.scroll_state().header_class();
    spans.push(Span::styled(
        format!("  {state}"),
        Style::default().fg(Color::DarkGray),
    ));
    if !page.has_class(&ElementId::new(ids::BACK_TO_TOP), ids::HIDDEN_CLASS) {
        spans.push(Span::raw("  [^ top]"));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub(crate) fn status_text(site: &Site, message: &str, editing: Option<&ElementId>) -> String {
    let status = site.status();
    let scene = match &status.scene.model {
        ModelState::Loading { .. } => match status.scene.model.progress_percent() {
            Some(percent) => format!("model {percent:.0}%"),
            None => "model loading".to_string(),
        },
        ModelState::Loaded => format!("scene {} frames", status.scene.frames),
        ModelState::Placeholder { .. } => "scene placeholder".to_string(),
    };
    let carousel = status.carousel.map_or_else(
        || "-".to_string(),
        |state| format!("{}/{}", state.active_dot() + 1, state.dot_count()),
    );
    let lock = if status.scroll_locked { " | locked" } else { "" };
    let editing = editing.map_or_else(String::new, |id| format!(" | editing {id}"));
    format!(
        "{:>6}ms | y={:.0} | slides {carousel} | {scene}{lock}{editing} | {message}",
        status.now_ms, status.scroll_y
    )
}

/// Cuts `text` to `width` terminal columns, marking the cut with `~`.
pub(crate) fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    if width > 0 {
        out.push('~');
    }
    out
}

pub fn draw_status(
    frame: &mut Frame<'_>,
    area: Rect,
    site: &Site,
    message: &str,
    editing: Option<&ElementId>,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text = fit_width(&status_text(site, message, editing), usize::from(area.width));
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray).bg(Color::Rgb(30, 30, 35)));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{fit_width, status_text};
    use crate::config::Config;
    use crate::event::PageEvent;
    use crate::page::{ElementId, Viewport, blueprint};
    use crate::site::Site;

    #[test]
    fn status_line_reports_clock_scene_and_editing_field() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
        let mut site = Site::attach(
            blueprint::build(Viewport::new(1280.0, 800.0)),
            &Config::default(),
            today,
        );
        site.handle(PageEvent::AssetProgress {
            loaded: 25,
            total: 100,
        });
        site.advance(250);

        let name = ElementId::new("name");
        let text = status_text(&site, "hello", Some(&name));
        assert!(text.contains("250ms"));
        assert!(text.contains("model 25%"));
        assert!(text.contains("slides 1/"));
        assert!(text.contains("editing name"));
        assert!(text.ends_with("hello"));
    }

    #[test]
    fn long_status_is_cut_to_the_terminal_width() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("scrolling is locked", 8), "scrolli~");
        assert_eq!(fit_width("日本語", 4), "日~");
        assert_eq!(fit_width("abc", 0), "");
    }
}
