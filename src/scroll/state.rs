use serde::Serialize;

use crate::config::ScrollConfig;
use crate::page::{ElementId, PageSurface, ids};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollState {
    #[default]
    AtTop,
    ScrolledUp,
    ScrolledDown,
}

impl ScrollState {
    pub const ALL: [Self; 3] = [Self::AtTop, Self::ScrolledUp, Self::ScrolledDown];

    pub fn header_class(self) -> &'static str {
        match self {
            Self::AtTop => "at-top",
            Self::ScrolledUp => "scrolled-up",
            Self::ScrolledDown => "scrolled-down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThresholds {
    pub top: f64,
    pub delta: f64,
    pub hide_after: f64,
}

impl From<&ScrollConfig> for ScrollThresholds {
    fn from(config: &ScrollConfig) -> Self {
        Self {
            top: config.top_threshold_px,
            delta: config.delta_threshold_px,
            hide_after: config.hide_after_px,
        }
    }
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self::from(&ScrollConfig::default())
    }
}

/// Next header state for offset `offset` given the last seen offset.
pub fn next_state(
    current: ScrollState,
    offset: f64,
    last: f64,
    thresholds: ScrollThresholds,
) -> ScrollState {
    if offset <= thresholds.top {
        ScrollState::AtTop
    } else if offset > last && offset > thresholds.hide_after {
        ScrollState::ScrolledDown
    } else if offset < last - thresholds.delta {
        ScrollState::ScrolledUp
    } else {
        current
    }
}

/// Header scroll-state machine plus the back-to-top affordance.
#[derive(Debug)]
pub struct ScrollTracker {
    header: Option<ElementId>,
    back_to_top: Option<ElementId>,
    thresholds: ScrollThresholds,
    back_to_top_after: f64,
    state: ScrollState,
    last: f64,
    applied: bool,
}

impl ScrollTracker {
    /// Missing elements are skipped; the state machine still runs.
    pub fn attach(page: &dyn PageSurface, config: &ScrollConfig) -> Self {
        let probe = |id: &str| {
            let id = ElementId::new(id);
            page.exists(&id).then_some(id)
        };
        Self {
            header: probe(ids::HEADER),
            back_to_top: probe(ids::BACK_TO_TOP),
            thresholds: ScrollThresholds::from(config),
            back_to_top_after: config.back_to_top_after_px,
            state: ScrollState::AtTop,
            last: 0.0,
            applied: false,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn last_offset(&self) -> f64 {
        self.last
    }

    /// Re-evaluates the header state at the page's current offset.
    pub fn evaluate(&mut self, page: &mut dyn PageSurface) -> ScrollState {
        let offset = page.scroll_y();
        let next = next_state(self.state, offset, self.last, self.thresholds);
        self.last = offset.max(0.0);

        if next != self.state || !self.applied {
            self.state = next;
            self.applied = true;
            if let Some(header) = &self.header {
                for state in ScrollState::ALL {
                    page.toggle_class(header, state.header_class(), state == next);
                }
            }
        }
        if let Some(button) = &self.back_to_top {
            page.toggle_class(button, ids::HIDDEN_CLASS, offset <= self.back_to_top_after);
        }
        next
    }
}
