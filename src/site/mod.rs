//! Page-load entry point: builds every component once and routes host events,
//! fired timers and store continuations to them.
//!
//! The site owns the page, the shared scroll lock and the timer queue. Each
//! handler borrows them through a [`PageCx`] for the duration of one dispatch.

mod clock;
mod dispatch;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::Serialize;

use crate::carousel::{Carousel, CarouselState};
use crate::config::Config;
use crate::context::PageCx;
use crate::cta::CtaButtons;
use crate::effect::Effect;
use crate::error::AppResult;
use crate::form::{self, FormAdapter, Submission, SubmitOutcome};
use crate::nav::NavDrawer;
use crate::overlay::{
    CalendarController, EventSource, NoEvents, OverlayKind, OverlayManager, ToastController,
};
use crate::page::{MemoryPage, PageSnapshot, PageSurface, ScrollLock, Viewport};
use crate::scene::{HeadlessRenderer, SceneDriver, SceneRenderer, SceneStatus};
use crate::scroll::{CounterAnimation, HeroRotator, LazyImages, ScrollState, ScrollTracker};
use crate::store::RecordStore;
use crate::timer::{TimerQueue, TimerTask};

/// Observable summary of the orchestration state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStatus {
    pub now_ms: u64,
    pub scroll_y: f64,
    pub scroll_state: ScrollState,
    pub scroll_locked: bool,
    pub drawer_open: bool,
    pub overlays: Vec<OverlayKind>,
    pub carousel: Option<CarouselState>,
    pub pending_submissions: usize,
    pub scene: SceneStatus,
}

pub struct Site {
    page: MemoryPage,
    lock: ScrollLock,
    timers: TimerQueue,
    config: Config,
    today: NaiveDate,
    tracker: ScrollTracker,
    lazy: LazyImages,
    counters: CounterAnimation,
    rotator: HeroRotator,
    drawer: Option<NavDrawer>,
    carousel: Option<Carousel>,
    overlays: OverlayManager,
    toast: ToastController,
    calendar: CalendarController,
    cta: CtaButtons,
    form: Option<FormAdapter>,
    scene: SceneDriver,
    effects: Vec<Effect>,
    submissions: VecDeque<Submission>,
    in_flight: usize,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("now_ms", &self.timers.now_ms())
            .field("scroll_state", &self.tracker.state())
            .field("overlays", &self.overlays.open_kinds())
            .finish_non_exhaustive()
    }
}

impl Site {
    /// Wires every component against `page`. Components whose markup is
    /// missing stay detached and never fire.
    pub fn attach(mut page: MemoryPage, config: &Config, today: NaiveDate) -> Self {
        let mut lock = ScrollLock::new(page.root().clone());
        let mut timers = TimerQueue::new();
        let root = page.root().clone();
        let viewport = page.viewport();

        let tracker = ScrollTracker::attach(&page, &config.scroll);
        let lazy = LazyImages::attach(&page, &config.scroll);
        let counters = CounterAnimation::attach(&page, &config.scroll);
        let rotator = HeroRotator::attach(&page, &config.scroll);
        let drawer = NavDrawer::attach(&page, root, &config.nav);
        let form = FormAdapter::attach(&page, config.store.collection.clone());
        let carousel = {
            let mut cx = PageCx::new(&mut page, &mut lock, &mut timers);
            Carousel::attach(&mut cx, &config.carousel)
        };
        timers.schedule(
            config.scroll.initial_check_delay_ms,
            TimerTask::InitialScrollCheck,
        );

        let scene = SceneDriver::new(
            &config.scene,
            viewport.width,
            viewport.height,
            Box::new(HeadlessRenderer::default()),
        );

        tracing::info!(
            drawer = drawer.is_some(),
            carousel = carousel.is_some(),
            form = form.is_some(),
            "site attached"
        );

        Self {
            page,
            lock,
            timers,
            config: config.clone(),
            today,
            tracker,
            lazy,
            counters,
            rotator,
            drawer,
            carousel,
            overlays: OverlayManager::new(),
            toast: ToastController::new(config.overlay.toast_ms),
            calendar: CalendarController::new(
                Box::new(NoEvents),
                today,
                config.overlay.calendar_loading_ms,
            ),
            cta: CtaButtons::new(config.overlay.cta_feedback_ms),
            form,
            scene,
            effects: Vec::new(),
            submissions: VecDeque::new(),
            in_flight: 0,
        }
    }

    pub fn with_event_source(mut self, source: Box<dyn EventSource>) -> Self {
        self.calendar =
            CalendarController::new(source, self.today, self.config.overlay.calendar_loading_ms);
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn SceneRenderer>) -> Self {
        let viewport = self.page.viewport();
        self.scene = SceneDriver::new(&self.config.scene, viewport.width, viewport.height, renderer);
        self
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.page.snapshot()
    }

    pub fn viewport(&self) -> Viewport {
        self.page.viewport()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due_ms()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.lock
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer.as_ref().is_some_and(NavDrawer::is_open)
    }

    pub fn carousel_state(&self) -> Option<CarouselState> {
        self.carousel.as_ref().map(Carousel::state)
    }

    pub fn overlays(&self) -> &OverlayManager {
        &self.overlays
    }

    pub fn calendar_month(&self) -> Option<NaiveDate> {
        self.calendar.shown_month()
    }

    pub fn scene(&self) -> &SceneDriver {
        &self.scene
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_len()
    }

    pub fn status(&self) -> SiteStatus {
        SiteStatus {
            now_ms: self.timers.now_ms(),
            scroll_y: self.page.scroll_y(),
            scroll_state: self.tracker.state(),
            scroll_locked: self.lock.is_locked(),
            drawer_open: self.drawer_open(),
            overlays: self.overlays.open_kinds(),
            carousel: self.carousel_state(),
            pending_submissions: self.submissions.len() + self.in_flight,
            scene: self.scene.status(),
        }
    }

    /// Effects produced since the last call, in the order they happened.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Hands queued submissions to the host, which must report each result
    /// through [`Site::finish_submission`].
    pub fn take_submissions(&mut self) -> Vec<Submission> {
        let taken: Vec<_> = self.submissions.drain(..).collect();
        self.in_flight += taken.len();
        taken
    }

    /// Continuation of one store write.
    pub fn finish_submission(&mut self, result: AppResult<String>) -> Option<SubmitOutcome> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let adapter = self.form.as_ref()?;
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        let outcome = adapter.finish(&mut cx, &mut self.overlays, &mut self.toast, result);
        self.sync_scroll();
        Some(outcome)
    }

    /// Writes every queued submission to `store`, one attempt each.
    pub async fn submit_pending(&mut self, store: &dyn RecordStore) -> Vec<SubmitOutcome> {
        let mut outcomes = Vec::new();
        for submission in self.take_submissions() {
            let result = form::deliver(store, &submission).await;
            if let Some(outcome) = self.finish_submission(result) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Runs the scroll observers when the offset moved since they last ran,
    /// e.g. after a programmatic smooth scroll.
    fn sync_scroll(&mut self) {
        if self.page.scroll_y() != self.tracker.last_offset() {
            self.run_scroll_observers();
        }
    }

    fn run_scroll_observers(&mut self) {
        self.tracker.evaluate(&mut self.page);
        self.lazy.check(&mut self.page);
        self.counters.check(&self.page, self.timers.now_ms());
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        self.rotator.check(&mut cx);
    }

    fn overlay_closed(&mut self, kind: OverlayKind) {
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        match kind {
            OverlayKind::Toast => self.toast.dismissed(&mut cx),
            OverlayKind::Calendar => self.calendar.closed(&mut cx),
            OverlayKind::BlogDetail | OverlayKind::LinkShare | OverlayKind::Alert => {}
        }
    }
}
