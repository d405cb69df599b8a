//! Autoplay Timer
//!
//! Image slides advance after a fixed dwell. At most one advance is pending
//! at a time; scheduling a new one cancels the old. Each scheduled advance
//! carries a generation number so a firing the host failed to cancel is
//! recognized as stale and dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::trace;

/// Host timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Callback run once when a timer fires
pub type TimerCallback = Box<dyn FnOnce()>;

/// Host timer capability (`setTimeout` / `clearTimeout`)
pub trait TimerHost {
    /// Run `callback` once after `delay`
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAdvance {
    id: TimerId,
    generation: u64,
}

/// Single pending auto-advance
#[derive(Debug)]
pub struct AutoplayTimer {
    dwell: Duration,
    generation: u64,
    pending: Option<PendingAdvance>,
}

impl AutoplayTimer {
    /// Create an idle timer with the given dwell
    #[must_use]
    pub const fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            generation: 0,
            pending: None,
        }
    }

    /// Dwell before an image slide advances
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Whether an advance is scheduled
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Host id of the scheduled advance
    #[must_use]
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.map(|p| p.id)
    }

    /// Cancel the scheduled advance, if any. Returns whether one was pending.
    pub fn cancel(&mut self, host: &dyn TimerHost) -> bool {
        match self.pending.take() {
            Some(pending) => {
                trace!(timer = %pending.id, "autoplay cancelled");
                host.clear_timeout(pending.id);
                true
            }
            None => false,
        }
    }

    /// Replace any pending advance with a new one.
    ///
    /// `on_elapsed` receives the generation to hand back to [`Self::claim`].
    pub fn schedule(
        &mut self,
        host: &dyn TimerHost,
        on_elapsed: impl FnOnce(u64) + 'static,
    ) -> TimerId {
        self.cancel(host);
        self.generation += 1;
        let generation = self.generation;
        let id = host.set_timeout(self.dwell, Box::new(move || on_elapsed(generation)));
        self.pending = Some(PendingAdvance { id, generation });
        id
    }

    /// Consume a firing. True only for the currently pending generation.
    pub fn claim(&mut self, generation: u64) -> bool {
        match self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
