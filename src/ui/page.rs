use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::page::{ElementId, PageSurface, ids};
use crate::site::Site;

/// Classes worth showing next to an element; layout classes are noise.
const STATE_CLASSES: [&str; 8] = [
    ids::ACTIVE_CLASS,
    ids::HIGHLIGHT_CLASS,
    "loaded",
    "fading",
    "hover",
    "clicked",
    "disabled",
    "empty",
];

/// One rendered line of the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub depth: usize,
    pub id: ElementId,
    pub label: String,
    pub marks: Vec<&'static str>,
    pub focused: bool,
}

/// Readable label for an element, or `None` for pure containers.
pub(crate) fn element_label(page: &dyn PageSurface, id: &ElementId) -> Option<String> {
    let tag = page.tag(id)?;
    match tag.as_str() {
        "input" | "textarea" => {
            let value = page.value(id).unwrap_or_default();
            if page.attr(id, "type").as_deref() == Some("checkbox") {
                let checked = if page.attr(id, "checked").is_some() { 'x' } else { ' ' };
                let text = page.text(id).unwrap_or_default();
                return Some(format!("[{checked}] {text}"));
            }
            let placeholder = page.attr(id, "placeholder").unwrap_or_default();
            Some(format!("{placeholder}: {value}_"))
        }
        "img" => page
            .attr(id, "src")
            .or_else(|| page.attr(id, ids::DATA_SRC).map(|src| format!("({src})")))
            .map(|src| format!("image {src}")),
        _ => page
            .text(id)
            .filter(|text| !text.is_empty())
            .or_else(|| page.attr(id, ids::ARIA_LABEL))
            .map(|text| match tag.as_str() {
                "button" => format!("[{text}]"),
                "a" => format!("<{text}>"),
                _ => text,
            }),
    }
}

/// Labelled elements of `scope`'s subtree, skipping hidden parts.
pub fn outline(page: &dyn PageSurface, scope: &ElementId) -> Vec<OutlineLine> {
    let focused = page.focused();
    let mut lines = Vec::new();
    let mut hidden_below: Option<usize> = None;
    for (depth, id) in page.descendants(scope) {
        if hidden_below.is_some_and(|limit| depth > limit) {
            continue;
        }
        hidden_below = None;
        if page.has_class(&id, ids::HIDDEN_CLASS) {
            hidden_below = Some(depth);
            continue;
        }
        let Some(label) = element_label(page, &id) else {
            continue;
        };
        let marks = STATE_CLASSES
            .into_iter()
            .filter(|class| page.has_class(&id, class))
            .collect();
        lines.push(OutlineLine {
            depth,
            focused: focused.as_ref() == Some(&id),
            id,
            label,
            marks,
        });
    }
    lines
}

/// The sections inside the viewport window, starting at the scroll offset.
pub(crate) fn visible_outline(site: &Site) -> Vec<OutlineLine> {
    let page = site.page();
    let top = page.scroll_y();
    let bottom = top + page.viewport().height;
    let mut lines = Vec::new();
    for section in page.query_class("section") {
        let Some(rect) = page.rect(&section) else {
            continue;
        };
        if rect.bottom() <= top || rect.top >= bottom {
            continue;
        }
        let mut section_lines = outline(page, &section);
        if rect.top < top && rect.height > 0.0 {
            let hidden_share = (top - rect.top) / rect.height;
            let skip = (hidden_share * section_lines.len() as f64).floor() as usize;
            section_lines.drain(..skip.min(section_lines.len()));
        }
        lines.extend(section_lines);
    }
    lines
}

pub(crate) fn outline_line(line: &OutlineLine) -> Line<'static> {
    let mut spans = vec![Span::raw("  ".repeat(line.depth.saturating_sub(1)))];
    let label_style = if line.focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    spans.push(Span::styled(line.label.clone(), label_style));
    if !line.marks.is_empty() {
        spans.push(Span::styled(
            format!("  ({})", line.marks.join(", ")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

pub fn draw_page(frame: &mut Frame<'_>, area: Rect, site: &Site) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let lines: Vec<Line<'static>> = visible_outline(site).iter().map(outline_line).collect();
    frame.render_widget(Paragraph::new(lines), area);
}
