use crate::context::PageCx;
use crate::page::ids;
use crate::timer::TimerTask;

use super::Site;

impl Site {
    /// Moves the virtual clock to `now_ms`: fires due timers in order, steps
    /// the counter animation and renders one scene frame.
    pub fn advance(&mut self, now_ms: u64) {
        let previous = self.timers.now_ms();
        while let Some((_, task)) = self.timers.pop_due(now_ms) {
            self.fire(task);
        }
        self.timers.advance_to(now_ms);
        let now = self.timers.now_ms();
        self.counters.advance(&mut self.page, now);
        self.scene
            .tick(now.saturating_sub(previous) as f64 / 1000.0);
        self.sync_scroll();
    }

    /// Advances by `delta_ms` from the current clock.
    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance(self.timers.now_ms().saturating_add(delta_ms));
    }

    fn fire(&mut self, task: TimerTask) {
        if task == TimerTask::InitialScrollCheck {
            self.run_scroll_observers();
            return;
        }
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        match task {
            TimerTask::InitialScrollCheck => {}
            TimerTask::ClearHighlight { target } => match &mut self.drawer {
                Some(drawer) => drawer.anchors_mut().clear(&mut cx, &target),
                None => cx.page.remove_class(&target, ids::HIGHLIGHT_CLASS),
            },
            TimerTask::ToastExpire { generation } => {
                self.toast.expire(&mut cx, &mut self.overlays, generation);
            }
            TimerTask::CarouselResizeSettled => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.resize_settled(&mut cx);
                }
            }
            TimerTask::RotatorAdvance => self.rotator.advance(&mut cx),
            TimerTask::RotatorSwap => self.rotator.swap(&mut cx),
            TimerTask::ClearCtaFeedback { button } => self.cta.release(&mut cx, &button),
            TimerTask::CalendarReady { .. } => self.calendar.ready(&mut cx, &self.overlays),
        }
    }
}
