//! Viewport Controller
//!
//! The scroll-snap strip that holds every slide. The carousel only needs
//! the small capability set in [`Viewport`]; [`SnapStrip`] implements it
//! headlessly for native hosts and tests.

use crate::result::{CarouselError, CarouselResult};
use crate::subscription::{self, ListenerRegistry, SelectListener, SharedListeners, Subscription};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

/// Capabilities the carousel expects from its slide strip.
///
/// Methods take `&self`: a strip is a shared host widget, and listeners may
/// observe it while the carousel is scrolling it.
pub trait Viewport {
    /// Number of snap points
    fn slide_count(&self) -> usize;

    /// Index of the centered slide
    fn selected_index(&self) -> usize;

    /// Center the slide at `index`
    fn scroll_to(&self, index: usize) -> CarouselResult<()>;

    /// Move one slide forward, wrapping when looped
    fn scroll_next(&self);

    /// Move one slide back, wrapping when looped
    fn scroll_prev(&self);

    /// Register a selection-changed listener
    fn on_select(&self, listener: SelectListener) -> Subscription;

    /// Whether `scroll_next`/`scroll_prev` wrap at the ends, when the host
    /// can tell
    fn wraps(&self) -> Option<bool> {
        None
    }
}

/// Headless scroll-snap strip
#[derive(Debug, Clone)]
pub struct SnapStrip {
    len: usize,
    looped: bool,
    selected: Rc<Cell<usize>>,
    listeners: SharedListeners,
}

impl SnapStrip {
    /// Create a looped strip of `len` slides, centered on the first
    ///
    /// # Errors
    ///
    /// Returns `EmptyCatalog` if `len` is zero
    pub fn new(len: usize) -> CarouselResult<Self> {
        if len == 0 {
            return Err(CarouselError::EmptyCatalog);
        }
        Ok(Self {
            len,
            looped: true,
            selected: Rc::new(Cell::new(0)),
            listeners: ListenerRegistry::shared(),
        })
    }

    /// Set whether the strip wraps at its ends
    #[must_use]
    pub fn with_loop(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Whether the strip wraps at its ends
    #[must_use]
    pub const fn is_looped(&self) -> bool {
        self.looped
    }

    /// Number of live selection listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Simulate the user dragging `index` into the center
    pub fn drag_to(&self, index: usize) -> CarouselResult<()> {
        trace!(index, "drag");
        self.scroll_to(index)
    }

    fn select(&self, index: usize) {
        if self.selected.replace(index) != index {
            subscription::emit(&self.listeners, index);
        }
    }

    fn step(&self, forward: bool) -> usize {
        let current = self.selected.get();
        let last = self.len - 1;
        match (forward, self.looped) {
            (true, true) => (current + 1) % self.len,
            (false, true) => current.checked_sub(1).unwrap_or(last),
            (true, false) => (current + 1).min(last),
            (false, false) => current.saturating_sub(1),
        }
    }
}

impl Viewport for SnapStrip {
    fn slide_count(&self) -> usize {
        self.len
    }

    fn selected_index(&self) -> usize {
        self.selected.get()
    }

    fn scroll_to(&self, index: usize) -> CarouselResult<()> {
        CarouselError::check_index(index, self.len)?;
        self.select(index);
        Ok(())
    }

    fn scroll_next(&self) {
        self.select(self.step(true));
    }

    fn scroll_prev(&self) {
        self.select(self.step(false));
    }

    fn on_select(&self, listener: SelectListener) -> Subscription {
        subscription::subscribe(&self.listeners, listener)
    }

    fn wraps(&self) -> Option<bool> {
        Some(self.looped)
    }
}
