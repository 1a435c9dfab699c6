use crate::config::ScrollConfig;
use crate::context::PageCx;
use crate::page::{ElementId, PageSurface, ids, visible_fraction};
use crate::timer::{TimerId, TimerTask};

use super::ROTATOR_IMAGES;

const FRAMES_PER_SECOND: u64 = 60;

fn is_visible(page: &dyn PageSurface, id: &ElementId, threshold: f64) -> bool {
    page.rect(id)
        .is_some_and(|rect| visible_fraction(rect, page.scroll_y(), page.viewport()) >= threshold)
}

/// Images carrying `data-src` load once, the first time they are visible enough.
#[derive(Debug)]
pub struct LazyImages {
    pending: Vec<ElementId>,
    threshold: f64,
}

impl LazyImages {
    pub fn attach(page: &dyn PageSurface, config: &ScrollConfig) -> Self {
        Self {
            pending: page.query_attr(ids::DATA_SRC),
            threshold: config.lazy_image_visibility,
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns how many images were loaded by this check.
    pub fn check(&mut self, page: &mut dyn PageSurface) -> usize {
        let threshold = self.threshold;
        let mut loaded = 0;
        self.pending.retain(|image| {
            if !page.exists(image) {
                return false;
            }
            if !is_visible(&*page, image, threshold) {
                return true;
            }
            if let Some(src) = page.attr(image, ids::DATA_SRC) {
                page.set_attr(image, "src", &src);
                page.remove_attr(image, ids::DATA_SRC);
                page.add_class(image, "loaded");
                loaded += 1;
            }
            false
        });
        loaded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterPhase {
    Observing,
    Running { started_at: u64 },
    Done,
}

/// Counts every `.counter` in the about section from 0 up to its `data-target`
/// once the section is visible; the section is observed only until then.
#[derive(Debug)]
pub struct CounterAnimation {
    section: Option<ElementId>,
    counters: Vec<(ElementId, u64)>,
    threshold: f64,
    total_frames: u64,
    phase: CounterPhase,
}

impl CounterAnimation {
    pub fn attach(page: &dyn PageSurface, config: &ScrollConfig) -> Self {
        let section = ElementId::new(ids::ABOUT_SECTION);
        let counters: Vec<_> = page
            .query_class(ids::COUNTER_CLASS)
            .into_iter()
            .map(|id| {
                let target = page
                    .attr(&id, ids::DATA_TARGET)
                    .and_then(|raw| raw.trim().parse::<u64>().ok())
                    .unwrap_or(0);
                (id, target)
            })
            .collect();
        let attached = page.exists(&section) && !counters.is_empty();
        Self {
            section: attached.then_some(section),
            counters,
            threshold: config.counter_visibility,
            total_frames: config
                .counter_duration_ms
                .saturating_mul(FRAMES_PER_SECOND)
                .div_ceil(1000)
                .max(1),
            phase: CounterPhase::Observing,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, CounterPhase::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, CounterPhase::Done)
    }

    pub fn check(&mut self, page: &dyn PageSurface, now_ms: u64) {
        let Some(section) = &self.section else {
            return;
        };
        if self.phase == CounterPhase::Observing && is_visible(page, section, self.threshold) {
            self.phase = CounterPhase::Running { started_at: now_ms };
        }
    }

    /// Writes the counter values for the animation frame reached at `now_ms`.
    pub fn advance(&mut self, page: &mut dyn PageSurface, now_ms: u64) {
        let CounterPhase::Running { started_at } = self.phase else {
            return;
        };
        let elapsed = now_ms.saturating_sub(started_at);
        let frame = (elapsed.saturating_mul(FRAMES_PER_SECOND) / 1000).min(self.total_frames);
        for (id, target) in &self.counters {
            let value = counter_value(*target, frame, self.total_frames);
            page.set_text(id, &value.to_string());
        }
        if frame >= self.total_frames {
            self.phase = CounterPhase::Done;
        }
    }
}

/// Value shown at `frame`; the last frame lands exactly on `target`.
pub fn counter_value(target: u64, frame: u64, total_frames: u64) -> u64 {
    if frame >= total_frames {
        return target;
    }
    let increment = target as f64 / total_frames as f64;
    ((increment * frame as f64).ceil() as u64).min(target)
}

/// Cycles the team image while it is on screen: fade out, swap, fade in.
#[derive(Debug)]
pub struct HeroRotator {
    image: Option<ElementId>,
    threshold: f64,
    interval_ms: u64,
    fade_ms: u64,
    index: usize,
    interval: Option<TimerId>,
    swap: Option<TimerId>,
}

impl HeroRotator {
    pub fn attach(page: &dyn PageSurface, config: &ScrollConfig) -> Self {
        let image = ElementId::new(ids::TEAM_IMAGE);
        Self {
            image: page.exists(&image).then_some(image),
            threshold: config.rotator_visibility,
            interval_ms: config.rotator_interval_ms,
            fade_ms: config.rotator_fade_ms,
            index: 0,
            interval: None,
            swap: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn check(&mut self, cx: &mut PageCx<'_>) {
        let Some(image) = &self.image else {
            return;
        };
        let visible = is_visible(&*cx.page, image, self.threshold);
        match (visible, self.interval) {
            (true, None) => {
                self.interval = Some(cx.timers.schedule(self.interval_ms, TimerTask::RotatorAdvance));
            }
            (false, Some(timer)) => {
                cx.timers.cancel(timer);
                self.interval = None;
            }
            _ => {}
        }
    }

    /// Interval tick: start the fade and re-arm the interval.
    pub fn advance(&mut self, cx: &mut PageCx<'_>) {
        let Some(image) = &self.image else {
            return;
        };
        if self.interval.is_none() {
            return;
        }
        cx.page.add_class(image, "fading");
        if self.swap.is_none() {
            self.swap = Some(cx.timers.schedule(self.fade_ms, TimerTask::RotatorSwap));
        }
        self.interval = Some(cx.timers.schedule(self.interval_ms, TimerTask::RotatorAdvance));
    }

    pub fn swap(&mut self, cx: &mut PageCx<'_>) {
        self.swap = None;
        let Some(image) = &self.image else {
            return;
        };
        self.index = (self.index + 1) % ROTATOR_IMAGES.len();
        cx.page.set_attr(image, "src", ROTATOR_IMAGES[self.index]);
        cx.page.remove_class(image, "fading");
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterAnimation, HeroRotator, LazyImages, counter_value};
    use crate::config::ScrollConfig;
    use crate::context::PageCx;
    use crate::page::{ElementId, PageSurface, ScrollLock, Viewport, blueprint, ids};
    use crate::scroll::ROTATOR_IMAGES;
    use crate::timer::{TimerQueue, TimerTask};

    #[test]
    fn counter_value_rounds_up_and_ends_on_target() {
        assert_eq!(counter_value(120, 0, 120), 0);
        assert_eq!(counter_value(120, 1, 120), 1);
        assert_eq!(counter_value(36, 1, 120), 1);
        assert_eq!(counter_value(36, 119, 120), 36);
        assert_eq!(counter_value(36, 500, 120), 36);
    }

    #[test]
    fn lazy_images_load_once_when_visible() {
        let mut page = blueprint::build(Viewport::new(1280.0, 800.0));
        let mut lazy = LazyImages::attach(&page, &ScrollConfig::default());
        assert_eq!(lazy.pending_len(), 3);
        assert_eq!(lazy.check(&mut page), 0);

        let features = page
            .rect(&ElementId::new(ids::FEATURES_SECTION))
            .expect("features has a box");
        page.scroll_to(features.top, false);
        assert_eq!(lazy.check(&mut page), 3);
        let image = ElementId::new("feature-0-img");
        assert_eq!(page.attr(&image, "src").as_deref(), Some("images/feature-0.webp"));
        assert_eq!(page.attr(&image, ids::DATA_SRC), None);
        assert!(page.has_class(&image, "loaded"));
        assert_eq!(lazy.check(&mut page), 0);
    }

    #[test]
    fn counters_animate_to_target_and_stop_observing() {
        let mut page = blueprint::build(Viewport::new(1280.0, 800.0));
        let mut counters = CounterAnimation::attach(&page, &ScrollConfig::default());
        counters.check(&page, 0);
        assert!(!counters.is_running());

        page.scroll_to(700.0, false);
        counters.check(&page, 1_000);
        assert!(counters.is_running());
        counters.advance(&mut page, 2_000);
        let members = ElementId::new("counter-members");
        let midway: u64 = page
            .text(&members)
            .and_then(|text| text.parse().ok())
            .expect("counter text is numeric");
        assert!(midway > 0 && midway < 120);

        counters.advance(&mut page, 3_000);
        assert_eq!(page.text(&members).as_deref(), Some("120"));
        assert!(counters.is_done());
        page.scroll_to(0.0, false);
        counters.check(&page, 4_000);
        assert!(counters.is_done());
    }

    #[test]
    fn huge_counter_duration_saturates_instead_of_overflowing() {
        let mut page = blueprint::build(Viewport::new(1280.0, 800.0));
        let config = ScrollConfig {
            counter_duration_ms: u64::MAX,
            ..ScrollConfig::default()
        };
        let mut counters = CounterAnimation::attach(&page, &config);
        page.scroll_to(700.0, false);
        counters.check(&page, 0);
        assert!(counters.is_running());
        counters.advance(&mut page, u64::MAX);
        assert!(counters.is_running());
        let members: u64 = page
            .text(&ElementId::new("counter-members"))
            .and_then(|text| text.parse().ok())
            .expect("counter text is numeric");
        assert!(members <= 120);
    }

    #[test]
    fn rotator_fades_swaps_and_stops_off_screen() {
        let mut page = blueprint::build(Viewport::new(1280.0, 800.0));
        let mut lock = ScrollLock::new(page.root().clone());
        let mut timers = TimerQueue::new();
        let mut rotator = HeroRotator::attach(&page, &ScrollConfig::default());
        let image = ElementId::new(ids::TEAM_IMAGE);
        page.scroll_to(700.0, false);
        let mut cx = PageCx::new(&mut page, &mut lock, &mut timers);

        rotator.check(&mut cx);
        assert!(rotator.is_running());
        let fired = cx.timers.drain_due(5_000);
        assert_eq!(fired[0].1, TimerTask::RotatorAdvance);
        rotator.advance(&mut cx);
        assert!(cx.page.has_class(&image, "fading"));

        let fired = cx.timers.drain_due(5_500);
        assert_eq!(fired[0].1, TimerTask::RotatorSwap);
        rotator.swap(&mut cx);
        assert!(!cx.page.has_class(&image, "fading"));
        assert_eq!(cx.page.attr(&image, "src").as_deref(), Some(ROTATOR_IMAGES[1]));

        cx.page.scroll_to(3_000.0, false);
        rotator.check(&mut cx);
        assert!(!rotator.is_running());
        assert_eq!(cx.timers.pending_len(), 0);
    }
}
