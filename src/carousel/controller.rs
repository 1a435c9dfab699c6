use crate::config::CarouselConfig;
use crate::context::PageCx;
use crate::event::Key;
use crate::page::{ElementId, NodeSpec, PageSurface, ids};
use crate::timer::{TimerId, TimerTask};

use super::state::{CarouselState, visible_count};

const DISABLED_CLASS: &str = "disabled";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    slide_width: f64,
    visible: usize,
}

/// Gallery carousel bound to the page's track, dots and arrow buttons.
#[derive(Debug)]
pub struct Carousel {
    container: ElementId,
    track: ElementId,
    dots: ElementId,
    prev: ElementId,
    next: ElementId,
    slides: Vec<ElementId>,
    max_visible: usize,
    swipe_threshold: f64,
    debounce_ms: u64,
    layout: Layout,
    state: CarouselState,
    debounce: Option<TimerId>,
    touch_start: Option<f64>,
}

impl Carousel {
    /// Returns `None` when the carousel markup is missing or slides have no width.
    pub fn attach(cx: &mut PageCx<'_>, config: &CarouselConfig) -> Option<Self> {
        let container = ElementId::new(ids::CAROUSEL);
        let track = ElementId::new(ids::CAROUSEL_TRACK);
        if !cx.page.exists(&container) || !cx.page.exists(&track) {
            return None;
        }
        let slides = cx
            .page
            .query_class(ids::SLIDE_CLASS)
            .into_iter()
            .filter(|id| cx.page.is_within(id, &track))
            .collect::<Vec<_>>();
        let layout = measure(&*cx.page, &container, &slides, config.max_visible)?;

        let mut carousel = Self {
            container,
            track,
            dots: ElementId::new(ids::CAROUSEL_DOTS),
            prev: ElementId::new(ids::CAROUSEL_PREV),
            next: ElementId::new(ids::CAROUSEL_NEXT),
            state: CarouselState::new(slides.len(), layout.visible),
            slides,
            max_visible: config.max_visible,
            swipe_threshold: config.swipe_threshold_px,
            debounce_ms: config.resize_debounce_ms,
            layout,
            debounce: None,
            touch_start: None,
        };
        carousel.rebuild(cx, layout);
        Some(carousel)
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn slide_width(&self) -> f64 {
        self.layout.slide_width
    }

    pub fn has_pending_resize(&self) -> bool {
        self.debounce.is_some()
    }

    pub fn seek(&mut self, cx: &mut PageCx<'_>, index: isize) {
        self.state.seek(index);
        self.render(cx);
    }

    pub fn next(&mut self, cx: &mut PageCx<'_>) -> bool {
        let moved = self.state.next();
        if moved {
            self.render(cx);
        }
        moved
    }

    pub fn prev(&mut self, cx: &mut PageCx<'_>) -> bool {
        let moved = self.state.prev();
        if moved {
            self.render(cx);
        }
        moved
    }

    /// Restarts the resize debounce window.
    pub fn handle_resize(&mut self, cx: &mut PageCx<'_>) {
        if let Some(pending) = self.debounce.take() {
            cx.timers.cancel(pending);
        }
        self.debounce = Some(
            cx.timers
                .schedule(self.debounce_ms, TimerTask::CarouselResizeSettled),
        );
    }

    /// The debounce window closed: re-measure, rebuilding only on a layout change.
    pub fn resize_settled(&mut self, cx: &mut PageCx<'_>) {
        self.debounce = None;
        let Some(layout) = measure(&*cx.page, &self.container, &self.slides, self.max_visible)
        else {
            return;
        };
        if layout != self.layout {
            self.rebuild(cx, layout);
        }
    }

    pub fn handle_click(&mut self, cx: &mut PageCx<'_>, target: &ElementId) -> bool {
        if target == &self.prev {
            self.prev(cx);
            return true;
        }
        if target == &self.next {
            self.next(cx);
            return true;
        }
        if cx.page.has_class(target, ids::DOT_CLASS)
            && let Some(dot) = target
                .as_str()
                .strip_prefix("carousel-dot-")
                .and_then(|raw| raw.parse::<usize>().ok())
        {
            self.seek(cx, (dot * self.state.visible()) as isize);
            return true;
        }
        false
    }

    pub fn handle_key(&mut self, cx: &mut PageCx<'_>, key: Key) -> bool {
        match key {
            Key::ArrowLeft => self.prev(cx),
            Key::ArrowRight => self.next(cx),
            _ => false,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start = Some(x);
    }

    /// A rightward drag shows earlier slides, a leftward drag later ones.
    pub fn touch_end(&mut self, cx: &mut PageCx<'_>, x: f64) -> bool {
        let Some(start) = self.touch_start.take() else {
            return false;
        };
        let dx = x - start;
        if dx > self.swipe_threshold {
            self.prev(cx)
        } else if dx < -self.swipe_threshold {
            self.next(cx)
        } else {
            false
        }
    }

    fn rebuild(&mut self, cx: &mut PageCx<'_>, layout: Layout) {
        if let Some(pending) = self.debounce.take() {
            cx.timers.cancel(pending);
        }
        self.layout = layout;
        self.state = CarouselState::new(self.slides.len(), layout.visible);

        if cx.page.exists(&self.dots) {
            cx.page.remove_children(&self.dots);
            for dot in 0..self.state.dot_count() {
                cx.page.insert(
                    &self.dots,
                    NodeSpec::new("button", format!("carousel-dot-{dot}"))
                        .class(ids::DOT_CLASS)
                        .attr(ids::ARIA_LABEL, format!("Go to slide group {}", dot + 1)),
                );
            }
        }
        tracing::info!(
            visible = layout.visible,
            slide_width = layout.slide_width,
            "carousel rebuilt"
        );
        self.render(cx);
    }

    fn render(&self, cx: &mut PageCx<'_>) {
        let offset = self.state.current() as f64 * self.layout.slide_width;
        cx.page
            .set_attr(&self.track, "style", &format!("transform: translateX(-{offset}px)"));

        let active = self.state.active_dot();
        for (idx, dot) in cx.page.children(&self.dots).into_iter().enumerate() {
            cx.page.toggle_class(&dot, ids::ACTIVE_CLASS, idx == active);
        }
        set_disabled(cx.page, &self.prev, self.state.at_start());
        set_disabled(cx.page, &self.next, self.state.at_end());
    }
}

fn set_disabled(page: &mut dyn PageSurface, id: &ElementId, disabled: bool) {
    page.toggle_class(id, DISABLED_CLASS, disabled);
    if disabled {
        page.set_attr(id, "disabled", "");
    } else {
        page.remove_attr(id, "disabled");
    }
}

fn measure(
    page: &dyn PageSurface,
    container: &ElementId,
    slides: &[ElementId],
    max_visible: usize,
) -> Option<Layout> {
    let first = slides.first()?;
    let slide_width = page.rect(first)?.width;
    let container_width = page.rect(container)?.width;
    let visible = visible_count(container_width, slide_width, max_visible)?;
    Some(Layout {
        slide_width,
        visible,
    })
}

#[cfg(test)]
mod tests {
    use super::Carousel;
    use crate::config::CarouselConfig;
    use crate::context::PageCx;
    use crate::event::Key;
    use crate::page::{ElementId, MemoryPage, PageSurface, ScrollLock, Viewport, blueprint, ids};
    use crate::timer::{TimerQueue, TimerTask};

    struct Fixture {
        page: MemoryPage,
        lock: ScrollLock,
        timers: TimerQueue,
    }

    impl Fixture {
        fn new(width: f64) -> Self {
            let page = blueprint::build(Viewport::new(width, 800.0));
            let lock = ScrollLock::new(page.root().clone());
            Self {
                page,
                lock,
                timers: TimerQueue::new(),
            }
        }

        fn cx(&mut self) -> PageCx<'_> {
            PageCx::new(&mut self.page, &mut self.lock, &mut self.timers)
        }
    }

    #[test]
    fn attach_builds_dots_and_disables_prev() {
        let mut fx = Fixture::new(1280.0);
        let mut cx = fx.cx();
        let carousel = Carousel::attach(&mut cx, &CarouselConfig::default()).expect("carousel");
        assert_eq!(carousel.state().visible(), 3);
        let dots = cx.page.children(&ElementId::new(ids::CAROUSEL_DOTS));
        assert_eq!(dots.len(), 2);
        assert!(cx.page.has_class(&dots[0], ids::ACTIVE_CLASS));
        let prev = ElementId::new(ids::CAROUSEL_PREV);
        assert!(cx.page.has_class(&prev, "disabled"));
    }

    #[test]
    fn seek_translates_track_and_marks_dot() {
        let mut fx = Fixture::new(1280.0);
        let mut cx = fx.cx();
        let mut carousel = Carousel::attach(&mut cx, &CarouselConfig::default()).expect("carousel");
        carousel.seek(&mut cx, 100);
        assert_eq!(carousel.state().current(), 3);
        let track = ElementId::new(ids::CAROUSEL_TRACK);
        assert_eq!(
            cx.page.attr(&track, "style").as_deref(),
            Some("transform: translateX(-900px)")
        );
        assert!(cx.page.has_class(&ElementId::new("carousel-dot-1"), ids::ACTIVE_CLASS));
        assert!(!cx.page.has_class(&ElementId::new("carousel-dot-0"), ids::ACTIVE_CLASS));
        assert!(cx.page.has_class(&ElementId::new(ids::CAROUSEL_NEXT), "disabled"));
        carousel.seek(&mut cx, -5);
        assert_eq!(carousel.state().current(), 0);
    }

    #[test]
    fn dots_arrows_keys_and_swipes_move_the_strip() {
        let mut fx = Fixture::new(1280.0);
        let mut cx = fx.cx();
        let mut carousel = Carousel::attach(&mut cx, &CarouselConfig::default()).expect("carousel");

        assert!(carousel.handle_click(&mut cx, &ElementId::new("carousel-dot-1")));
        assert_eq!(carousel.state().current(), 3);
        assert!(carousel.handle_key(&mut cx, Key::ArrowLeft));
        assert_eq!(carousel.state().current(), 0);
        assert!(!carousel.handle_key(&mut cx, Key::ArrowLeft));

        carousel.touch_start(400.0);
        assert!(carousel.touch_end(&mut cx, 250.0));
        assert_eq!(carousel.state().current(), 3);
        carousel.touch_start(400.0);
        assert!(!carousel.touch_end(&mut cx, 460.0));
        assert_eq!(carousel.state().current(), 3);
        carousel.touch_start(100.0);
        assert!(carousel.touch_end(&mut cx, 300.0));
        assert_eq!(carousel.state().current(), 0);
    }

    #[test]
    fn resize_is_debounced_and_rebuild_resets_position() {
        let mut fx = Fixture::new(1280.0);
        let mut carousel = {
            let mut cx = fx.cx();
            let mut carousel =
                Carousel::attach(&mut cx, &CarouselConfig::default()).expect("carousel");
            carousel.next(&mut cx);
            carousel
        };
        blueprint::resize(&mut fx.page, Viewport::new(375.0, 700.0));
        let mut cx = fx.cx();

        carousel.handle_resize(&mut cx);
        cx.timers.drain_due(200);
        carousel.handle_resize(&mut cx);
        assert_eq!(cx.timers.pending_len(), 1);
        assert!(cx.timers.drain_due(400).is_empty());

        let fired = cx.timers.drain_due(500);
        assert_eq!(fired[0].1, TimerTask::CarouselResizeSettled);
        carousel.resize_settled(&mut cx);
        assert_eq!(carousel.state().visible(), 1);
        assert_eq!(carousel.state().current(), 0);
        assert_eq!(carousel.slide_width(), 335.0);
        assert_eq!(cx.page.children(&ElementId::new(ids::CAROUSEL_DOTS)).len(), 6);
        assert!(!carousel.has_pending_resize());
    }

    #[test]
    fn unchanged_layout_keeps_position() {
        let mut fx = Fixture::new(1280.0);
        let mut cx = fx.cx();
        let mut carousel = Carousel::attach(&mut cx, &CarouselConfig::default()).expect("carousel");
        carousel.next(&mut cx);
        carousel.handle_resize(&mut cx);
        cx.timers.drain_due(300);
        carousel.resize_settled(&mut cx);
        assert_eq!(carousel.state().current(), 3);
    }

    #[test]
    fn missing_markup_leaves_carousel_detached() {
        let mut page = MemoryPage::new(Viewport::new(1280.0, 800.0));
        let mut lock = ScrollLock::new(page.root().clone());
        let mut timers = TimerQueue::new();
        let mut cx = PageCx::new(&mut page, &mut lock, &mut timers);
        assert!(Carousel::attach(&mut cx, &CarouselConfig::default()).is_none());
    }
}
