//! Fake timers for deterministic tests.
//!
//! A virtual clock plus a queue of scheduled callbacks. Time only moves
//! when the test advances it, and due callbacks run in due order, each
//! seeing the clock set to its own due time.
//!
//! The clock saturates at `u64::MAX` milliseconds. A timer whose due time
//! would lie past that point stays scheduled but never fires.

use crate::autoplay::{TimerCallback, TimerHost, TimerId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

struct Scheduled {
    id: TimerId,
    /// `None` when the due time overflows the clock
    due_ms: Option<u64>,
    callback: TimerCallback,
}

#[derive(Default)]
struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    scheduled: Vec<Scheduled>,
    fired: Vec<TimerId>,
    cleared: Vec<TimerId>,
}

impl TimerQueue {
    /// Remove and return the earliest timer due at or before `limit_ms`
    fn pop_due(&mut self, limit_ms: u64) -> Option<Scheduled> {
        let position = self
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms.is_some_and(|due| due <= limit_ms))
            .min_by_key(|(_, s)| (s.due_ms, s.id))
            .map(|(i, _)| i)?;
        Some(self.scheduled.remove(position))
    }
}

/// Shared fake timer host
#[derive(Clone, Default)]
pub struct FakeTimers {
    inner: Rc<RefCell<TimerQueue>>,
}

impl fmt::Debug for FakeTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FakeTimers")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.scheduled.len())
            .field("fired", &inner.fired.len())
            .finish()
    }
}

impl FakeTimers {
    /// Create timers at virtual time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of scheduled, unfired timers
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().scheduled.len()
    }

    /// Whether `id` is still scheduled
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().scheduled.iter().any(|s| s.id == id)
    }

    /// Due time of the earliest scheduled timer
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.inner
            .borrow()
            .scheduled
            .iter()
            .filter_map(|s| s.due_ms)
            .min()
    }

    /// Timers fired so far, in firing order
    #[must_use]
    pub fn fired(&self) -> Vec<TimerId> {
        self.inner.borrow().fired.clone()
    }

    /// Timers cleared so far
    #[must_use]
    pub fn cleared(&self) -> Vec<TimerId> {
        self.inner.borrow().cleared.clone()
    }

    /// Move time forward, firing every timer that comes due.
    ///
    /// Timers scheduled by a callback also fire if they come due within the
    /// same window. Returns how many timers fired.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.now_ms().saturating_add(millis(duration));
        let mut fired = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let next = inner.pop_due(target);
                if let Some(scheduled) = &next {
                    inner.now_ms = scheduled.due_ms.unwrap_or(target);
                    inner.fired.push(scheduled.id);
                }
                next
            };
            let Some(scheduled) = next else {
                break;
            };
            (scheduled.callback)();
            fired += 1;
        }
        self.inner.borrow_mut().now_ms = target;
        fired
    }

    /// Move time forward by milliseconds
    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }

    /// Jump to the earliest scheduled timer and fire it
    pub fn fire_next(&self) -> Option<TimerId> {
        let due = self.next_due_ms()?;
        let before = self.fired().len();
        self.advance_ms(due.saturating_sub(self.now_ms()));
        self.inner.borrow().fired.get(before).copied()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl TimerHost for FakeTimers {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let due_ms = inner.now_ms.checked_add(millis(delay));
        inner.scheduled.push(Scheduled {
            id,
            due_ms,
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.scheduled.len();
        inner.scheduled.retain(|s| s.id != id);
        if inner.scheduled.len() != before {
            inner.cleared.push(id);
        }
    }
}
