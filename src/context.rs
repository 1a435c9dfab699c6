use crate::page::{PageSurface, ScrollLock};
use crate::timer::TimerQueue;

/// Mutable page state handed to component handlers for one dispatch.
pub struct PageCx<'a> {
    pub page: &'a mut dyn PageSurface,
    pub lock: &'a mut ScrollLock,
    pub timers: &'a mut TimerQueue,
}

impl<'a> PageCx<'a> {
    pub fn new(
        page: &'a mut dyn PageSurface,
        lock: &'a mut ScrollLock,
        timers: &'a mut TimerQueue,
    ) -> Self {
        Self { page, lock, timers }
    }
}
