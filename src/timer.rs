//! Virtual-clock timer queue.
//!
//! All deferred work on the page (toast expiry, resize debounce, highlight
//! removal, rotator steps) is scheduled here as a [`TimerTask`] and fired by
//! [`TimerQueue::drain_due`] on the single UI thread. Handles are cancelable;
//! a cancelled timer never fires.

use std::collections::BTreeMap;

use crate::overlay::OverlayKind;
use crate::page::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    InitialScrollCheck,
    ClearHighlight { target: ElementId },
    ToastExpire { generation: u64 },
    CarouselResizeSettled,
    RotatorAdvance,
    RotatorSwap,
    ClearCtaFeedback { button: ElementId },
    CalendarReady { overlay: OverlayKind },
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    // Keyed by (due time, insertion sequence) so equal deadlines fire in
    // scheduling order.
    pending: BTreeMap<(u64, u64), TimerTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, task: TimerTask) -> TimerId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, seq), task);
        TimerId(seq)
    }

    /// Returns true when the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self
            .pending
            .keys()
            .find(|(_, seq)| *seq == id.0)
            .copied();
        match key {
            Some(key) => {
                self.pending.remove(&key);
                tracing::debug!(timer = id.0, "timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|(_, seq)| *seq == id.0)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest task due at or before `now_ms`, advancing the clock
    /// to that task's deadline. Callers loop until `None` so that tasks
    /// scheduled while handling an earlier one are observed in order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, TimerTask)> {
        let Some((&(due, seq), _)) = self.pending.iter().next() else {
            self.advance_to(now_ms);
            return None;
        };
        if due > now_ms {
            self.advance_to(now_ms);
            return None;
        }
        let task = self.pending.remove(&(due, seq))?;
        self.now_ms = self.now_ms.max(due);
        Some((TimerId(seq), task))
    }

    /// Drains everything due by `now_ms` and advances the clock to it.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<(TimerId, TimerTask)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(now_ms) {
            fired.push(entry);
        }
        self.advance_to(now_ms);
        fired
    }

    /// Moves the clock forward to `now_ms` without firing anything. The clock
    /// never goes backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
