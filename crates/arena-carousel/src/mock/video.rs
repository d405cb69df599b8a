//! Recording video element.
//!
//! Clones share state, so a test keeps one handle while the carousel owns
//! the boxed other.

use crate::playback::{PlaybackError, VideoElement};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of a [`MockVideo`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MockVideoState {
    /// Current source URI
    pub source: Option<String>,
    /// Whether the element is playing
    pub playing: bool,
    /// Playhead position in milliseconds
    pub position_ms: u64,
    /// Calls to `play`
    pub play_calls: u32,
    /// Calls to `pause`
    pub pause_calls: u32,
    /// Calls to `seek_to_start`
    pub rewinds: u32,
    /// Calls to `set_source`
    pub source_changes: u32,
    /// Whether `play` is refused
    pub autoplay_blocked: bool,
}

/// Shared mock video handle
#[derive(Debug, Clone, Default)]
pub struct MockVideo {
    state: Rc<RefCell<MockVideoState>>,
}

impl MockVideo {
    /// Create a stopped, source-less video
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every `play` call, like a browser autoplay policy
    #[must_use]
    pub fn blocking_autoplay(self) -> Self {
        self.state.borrow_mut().autoplay_blocked = true;
        self
    }

    /// Snapshot of the recorded state
    #[must_use]
    pub fn snapshot(&self) -> MockVideoState {
        self.state.borrow().clone()
    }

    /// Whether the element is playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    /// Playhead position
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        self.state.borrow().position_ms
    }

    /// Current source
    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }

    /// Calls to `play`
    #[must_use]
    pub fn play_count(&self) -> u32 {
        self.state.borrow().play_calls
    }

    /// Calls to `seek_to_start`
    #[must_use]
    pub fn rewind_count(&self) -> u32 {
        self.state.borrow().rewinds
    }

    /// Calls to `set_source`
    #[must_use]
    pub fn source_changes(&self) -> u32 {
        self.state.borrow().source_changes
    }

    /// Move the playhead forward
    pub fn advance_position_ms(&self, ms: u64) {
        self.state.borrow_mut().position_ms += ms;
    }
}

impl VideoElement for MockVideo {
    fn set_source(&mut self, uri: &str) {
        let mut state = self.state.borrow_mut();
        state.source = Some(uri.to_string());
        state.source_changes += 1;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.state.borrow_mut();
        state.play_calls += 1;
        if state.autoplay_blocked {
            return Err(PlaybackError::AutoplayBlocked);
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn seek_to_start(&mut self) {
        let mut state = self.state.borrow_mut();
        state.rewinds += 1;
        state.position_ms = 0;
    }
}
