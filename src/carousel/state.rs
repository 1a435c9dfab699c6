use serde::Serialize;

/// Index math for a strip of slides showing `visible` at a time.
///
/// `current` always stays within `0..=max_index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    current: usize,
    visible: usize,
    total: usize,
}

impl CarouselState {
    pub fn new(total: usize, visible: usize) -> Self {
        Self {
            current: 0,
            visible: visible.max(1),
            total,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn max_index(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }

    pub fn seek(&mut self, index: isize) -> usize {
        let max = self.max_index() as isize;
        self.current = index.clamp(0, max) as usize;
        self.current
    }

    /// Returns false when already at the last position.
    pub fn next(&mut self) -> bool {
        if self.current >= self.max_index() {
            return false;
        }
        self.seek((self.current + self.visible) as isize);
        true
    }

    /// Returns false when already at the first position.
    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.seek(self.current as isize - self.visible as isize);
        true
    }

    pub fn dot_count(&self) -> usize {
        self.total.div_ceil(self.visible)
    }

    pub fn active_dot(&self) -> usize {
        self.current / self.visible
    }

    pub fn at_start(&self) -> bool {
        self.current == 0
    }

    pub fn at_end(&self) -> bool {
        self.current >= self.max_index()
    }
}

/// Slides that fit the container, capped at `max_visible` and never below one.
/// `None` when the slide width is unusable.
pub fn visible_count(container_width: f64, slide_width: f64, max_visible: usize) -> Option<usize> {
    if !(slide_width.is_finite() && slide_width > 0.0) {
        return None;
    }
    let fit = (container_width / slide_width).floor();
    let fit = if fit.is_finite() && fit > 0.0 { fit as usize } else { 0 };
    Some(fit.min(max_visible).max(1))
}
