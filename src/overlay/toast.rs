use crate::context::PageCx;
use crate::timer::{TimerId, TimerTask};

use super::descriptor::{OverlayDescriptor, Tone};
use super::kind::OverlayKind;
use super::manager::OverlayManager;

/// Auto-dismissing toast. A new toast supersedes the visible one and
/// cancels its expiry timer.
#[derive(Debug)]
pub struct ToastController {
    duration_ms: u64,
    generation: u64,
    timer: Option<TimerId>,
}

impl ToastController {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            generation: 0,
            timer: None,
        }
    }

    pub fn show(
        &mut self,
        cx: &mut PageCx<'_>,
        overlays: &mut OverlayManager,
        message: &str,
        tone: Tone,
    ) {
        self.cancel_timer(cx);
        if overlays
            .open(cx, OverlayDescriptor::toast(message, tone))
            .is_none()
        {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.timer = Some(cx.timers.schedule(
            self.duration_ms,
            TimerTask::ToastExpire {
                generation: self.generation,
            },
        ));
    }

    /// Handles a fired expiry; stale generations are ignored.
    pub fn expire(
        &mut self,
        cx: &mut PageCx<'_>,
        overlays: &mut OverlayManager,
        generation: u64,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.timer = None;
        overlays.close(cx, OverlayKind::Toast)
    }

    /// The toast was closed by some other path.
    pub fn dismissed(&mut self, cx: &mut PageCx<'_>) {
        self.cancel_timer(cx);
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    fn cancel_timer(&mut self, cx: &mut PageCx<'_>) {
        if let Some(timer) = self.timer.take() {
            cx.timers.cancel(timer);
        }
    }
}
