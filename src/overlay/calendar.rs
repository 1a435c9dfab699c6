//! Event calendar overlay: loading placeholder, Monday-first month grid,
//! month navigation and event-type filters.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::context::PageCx;
use crate::page::{ElementId, NodeSpec, ids};
use crate::timer::{TimerId, TimerTask};

use super::descriptor::OverlayDescriptor;
use super::kind::OverlayKind;
use super::manager::OverlayManager;

pub const LOADING_TEXT: &str = "Loading calendar...";
/// Base class of every rendered event entry.
pub const EVENT_CLASS: &str = "calendar-event";
const KIND_ATTR: &str = "data-kind";
const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarEventKind {
    Meeting,
    Workshop,
    Event,
}

impl CalendarEventKind {
    pub const ALL: [Self; 3] = [Self::Meeting, Self::Workshop, Self::Event];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Workshop => "workshop",
            Self::Event => "event",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Meeting => "Meetings",
            Self::Workshop => "Workshops",
            Self::Event => "Events",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub time: String,
    pub title: String,
    pub kind: CalendarEventKind,
}

/// Where calendar entries come from.
pub trait EventSource: Send {
    fn events_in_month(&self, year: i32, month: u32) -> Vec<CalendarEvent>;
}

/// No published events yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn events_in_month(&self, _year: i32, _month: u32) -> Vec<CalendarEvent> {
        Vec::new()
    }
}

#[derive(Debug, Default, Clone)]
pub struct StaticEvents(pub Vec<CalendarEvent>);

impl EventSource for StaticEvents {
    fn events_in_month(&self, year: i32, month: u32) -> Vec<CalendarEvent> {
        self.0
            .iter()
            .filter(|event| event.date.year() == year && event.date.month() == month)
            .cloned()
            .collect()
    }
}

pub struct CalendarController {
    source: Box<dyn EventSource>,
    today: NaiveDate,
    loading_ms: u64,
    loading_timer: Option<TimerId>,
    /// First day of the displayed month; `None` while loading or closed.
    shown: Option<NaiveDate>,
    hidden_kinds: BTreeSet<CalendarEventKind>,
}

impl std::fmt::Debug for CalendarController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarController")
            .field("today", &self.today)
            .field("shown", &self.shown)
            .field("hidden_kinds", &self.hidden_kinds)
            .finish_non_exhaustive()
    }
}

impl CalendarController {
    pub fn new(source: Box<dyn EventSource>, today: NaiveDate, loading_ms: u64) -> Self {
        Self {
            source,
            today,
            loading_ms,
            loading_timer: None,
            shown: None,
            hidden_kinds: BTreeSet::new(),
        }
    }

    pub fn shown_month(&self) -> Option<NaiveDate> {
        self.shown
    }

    pub fn open(&mut self, cx: &mut PageCx<'_>, overlays: &mut OverlayManager) {
        self.cancel_loading(cx);
        self.shown = None;
        self.hidden_kinds.clear();
        if overlays
            .open(cx, OverlayDescriptor::calendar(LOADING_TEXT))
            .is_none()
        {
            return;
        }
        self.loading_timer = Some(cx.timers.schedule(
            self.loading_ms,
            TimerTask::CalendarReady {
                overlay: OverlayKind::Calendar,
            },
        ));
    }

    /// The loading delay elapsed: replace the placeholder with the grid.
    pub fn ready(&mut self, cx: &mut PageCx<'_>, overlays: &OverlayManager) {
        self.loading_timer = None;
        if !overlays.is_open(OverlayKind::Calendar) {
            return;
        }
        self.shown = Some(first_of_month(self.today));
        self.render(cx);
    }

    pub fn closed(&mut self, cx: &mut PageCx<'_>) {
        self.cancel_loading(cx);
        self.shown = None;
    }

    /// Handles a click inside the calendar content. Returns true when consumed.
    pub fn handle_click(&mut self, cx: &mut PageCx<'_>, target: &ElementId) -> bool {
        let Some(shown) = self.shown else {
            return false;
        };
        if target == &OverlayKind::Calendar.part_id("prev-month") {
            self.shown = Some(shift_month(shown, -1));
            self.render(cx);
            return true;
        }
        if target == &OverlayKind::Calendar.part_id("next-month") {
            self.shown = Some(shift_month(shown, 1));
            self.render(cx);
            return true;
        }
        for kind in CalendarEventKind::ALL {
            if target == &filter_id(kind) {
                if !self.hidden_kinds.remove(&kind) {
                    self.hidden_kinds.insert(kind);
                }
                self.apply_filters(cx);
                return true;
            }
        }
        false
    }

    fn cancel_loading(&mut self, cx: &mut PageCx<'_>) {
        if let Some(timer) = self.loading_timer.take() {
            cx.timers.cancel(timer);
        }
    }

    fn render(&self, cx: &mut PageCx<'_>) {
        let Some(shown) = self.shown else {
            return;
        };
        let body = OverlayKind::Calendar.part_id("body");
        if !cx.page.exists(&body) {
            return;
        }
        cx.page.remove_children(&body);
        cx.page.set_text(&body, "");

        let part = |name: &str| OverlayKind::Calendar.part_id(name).as_str().to_string();
        let nav = NodeSpec::new("div", part("nav"))
            .class("calendar-nav")
            .child(
                NodeSpec::new("button", part("prev-month"))
                    .attr(ids::ARIA_LABEL, "Previous month")
                    .text("«"),
            )
            .child(
                NodeSpec::new("h3", part("month"))
                    .class("current-month")
                    .text(shown.format("%B %Y").to_string()),
            )
            .child(
                NodeSpec::new("button", part("next-month"))
                    .attr(ids::ARIA_LABEL, "Next month")
                    .text("»"),
            );
        let filters = NodeSpec::new("div", part("filters"))
            .class("calendar-filters")
            .children(CalendarEventKind::ALL.into_iter().map(|kind| {
                let mut input = NodeSpec::new("input", filter_id(kind).as_str())
                    .attr("type", "checkbox")
                    .attr("value", kind.slug())
                    .text(kind.label());
                if !self.hidden_kinds.contains(&kind) {
                    input = input.attr("checked", "");
                }
                input
            }));

        cx.page.insert(&body, nav);
        cx.page.insert(&body, filters);
        cx.page.insert(&body, self.grid(shown));
    }

    fn grid(&self, shown: NaiveDate) -> NodeSpec {
        let mut grid = NodeSpec::new("div", OverlayKind::Calendar.part_id("grid").as_str())
            .class("calendar-grid");
        for (idx, name) in DAY_NAMES.iter().enumerate() {
            grid = grid.child(
                NodeSpec::new("div", format!("calendar-head-{idx}"))
                    .class("day-header")
                    .text(*name),
            );
        }
        for idx in 0..shown.weekday().num_days_from_monday() {
            grid = grid.child(
                NodeSpec::new("div", format!("calendar-blank-{idx}"))
                    .class("calendar-day")
                    .class("empty"),
            );
        }

        let events = self.source.events_in_month(shown.year(), shown.month());
        for day in 1..=days_in_month(shown) {
            let mut cell = NodeSpec::new("div", format!("calendar-day-{day}"))
                .class("calendar-day")
                .child(
                    NodeSpec::new("div", format!("calendar-day-{day}-number"))
                        .class("day-number")
                        .text(day.to_string()),
                );
            if shown.year() == self.today.year()
                && shown.month() == self.today.month()
                && day == self.today.day()
            {
                cell = cell.class("today");
            }
            let todays: Vec<_> = events.iter().filter(|event| event.date.day() == day).collect();
            if !todays.is_empty() {
                cell = cell.class("has-events");
                for (idx, event) in todays.into_iter().enumerate() {
                    let mut node = NodeSpec::new("div", format!("calendar-event-{day}-{idx}"))
                        .class(EVENT_CLASS)
                        .class(event.kind.slug())
                        .attr(KIND_ATTR, event.kind.slug())
                        .text(format!("{} {}", event.time, event.title));
                    if self.hidden_kinds.contains(&event.kind) {
                        node = node.class(ids::HIDDEN_CLASS);
                    }
                    cell = cell.child(node);
                }
            }
            grid = grid.child(cell);
        }
        grid
    }

    fn apply_filters(&self, cx: &mut PageCx<'_>) {
        for kind in CalendarEventKind::ALL {
            let filter = filter_id(kind);
            if self.hidden_kinds.contains(&kind) {
                cx.page.remove_attr(&filter, "checked");
            } else {
                cx.page.set_attr(&filter, "checked", "");
            }
        }
        for event in cx.page.query_class(EVENT_CLASS) {
            let Some(kind) = cx
                .page
                .attr(&event, KIND_ATTR)
                .and_then(|slug| CalendarEventKind::from_slug(&slug))
            else {
                continue;
            };
            let hidden = self.hidden_kinds.contains(&kind);
            cx.page.toggle_class(&event, ids::HIDDEN_CLASS, hidden);
        }
    }
}

fn filter_id(kind: CalendarEventKind) -> ElementId {
    OverlayKind::Calendar.part_id(&format!("filter-{}", kind.slug()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves by whole months, wrapping the year.
pub fn shift_month(first: NaiveDate, delta: i32) -> NaiveDate {
    let index = first.year() * 12 + first.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    let next = shift_month(first_of_month(first), 1);
    next.signed_duration_since(first_of_month(first)).num_days() as u32
}
