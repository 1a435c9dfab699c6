use std::collections::HashMap;

use crate::context::PageCx;
use crate::page::{ElementId, ids};
use crate::timer::{TimerId, TimerTask};

/// Smooth in-page scrolling with a transient highlight on the target.
#[derive(Debug)]
pub struct AnchorScroller {
    highlight_ms: u64,
    timers: HashMap<ElementId, TimerId>,
}

impl AnchorScroller {
    pub fn new(highlight_ms: u64) -> Self {
        Self {
            highlight_ms,
            timers: HashMap::new(),
        }
    }

    /// Scrolls to `#target`, or to the top of the document when it is missing.
    /// Returns true when the target existed.
    pub fn scroll_to_hash(&mut self, cx: &mut PageCx<'_>, hash: &str) -> bool {
        let target = ElementId::new(hash.trim_start_matches('#'));
        let Some(rect) = cx.page.rect(&target) else {
            tracing::debug!(anchor = %target, "anchor target missing, scrolling to top");
            cx.page.scroll_to(0.0, true);
            return false;
        };
        cx.page.scroll_to(rect.top, true);
        cx.page.add_class(&target, ids::HIGHLIGHT_CLASS);
        if let Some(previous) = self.timers.remove(&target) {
            cx.timers.cancel(previous);
        }
        let timer = cx.timers.schedule(
            self.highlight_ms,
            TimerTask::ClearHighlight {
                target: target.clone(),
            },
        );
        self.timers.insert(target, timer);
        true
    }

    pub fn clear(&mut self, cx: &mut PageCx<'_>, target: &ElementId) {
        self.timers.remove(target);
        cx.page.remove_class(target, ids::HIGHLIGHT_CLASS);
    }

    pub fn is_highlighting(&self, target: &ElementId) -> bool {
        self.timers.contains_key(target)
    }
}

/// Scrolls without highlighting; a missing element scrolls to the top.
pub fn scroll_to_element(cx: &mut PageCx<'_>, id: &ElementId) {
    let top = cx.page.rect(id).map_or(0.0, |rect| rect.top);
    cx.page.scroll_to(top, true);
}
