//! Playback Coordination
//!
//! Keeps at most one video running: the one on the selected slide. Every
//! other attached video is paused and rewound so it restarts from the top
//! when it next comes into view.

use crate::catalog::MediaCatalog;
use crate::result::{CarouselError, CarouselResult};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Why a video could not start. Never surfaced past the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Host policy refused playback without a user gesture
    #[error("autoplay blocked by host policy")]
    AutoplayBlocked,
    /// Media could not be loaded or decoded
    #[error("media unavailable: {0}")]
    Unavailable(String),
}

/// Host video element handle
pub trait VideoElement {
    /// Point the element at a media URI
    fn set_source(&mut self, uri: &str);

    /// Start or resume playback
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback
    fn pause(&mut self);

    /// Reset the playback position to the start
    fn seek_to_start(&mut self);
}

/// Result of trying to play the selected slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayAttempt {
    /// Selected slide is an image
    NotAVideo,
    /// Selected slide is a video without an attached element
    Detached,
    /// Playback started
    Started,
    /// Playback failed and was ignored
    Suppressed(PlaybackError),
}

/// Per-instance video handles, indexed by catalog position
pub struct VideoSlots {
    slots: Vec<Option<Box<dyn VideoElement>>>,
}

impl fmt::Debug for VideoSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoSlots")
            .field("len", &self.slots.len())
            .field("attached", &self.attached_indices())
            .finish()
    }
}

impl VideoSlots {
    /// Create `len` empty slots
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Attach `element` to the video slide at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` past the catalog, `NotAVideo` for image slides
    pub fn attach(
        &mut self,
        catalog: &MediaCatalog,
        index: usize,
        element: Box<dyn VideoElement>,
    ) -> CarouselResult<()> {
        if !catalog.get(index)?.is_video() {
            return Err(CarouselError::NotAVideo { index });
        }
        CarouselError::check_index(index, self.slots.len())?;
        self.slots[index] = Some(element);
        Ok(())
    }

    /// Whether a handle is attached at `index`
    #[must_use]
    pub fn is_attached(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    /// Indices with an attached handle
    #[must_use]
    pub fn attached_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
            .collect()
    }

    /// Assign every attached handle its source for the session
    pub fn load_sources(&mut self, mut source_for: impl FnMut(usize) -> Option<String>) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let (Some(video), Some(uri)) = (slot.as_mut(), source_for(index)) {
                video.set_source(&uri);
            }
        }
    }

    /// Play the video at `selected`, pause and rewind all others
    pub fn coordinate(&mut self, catalog: &MediaCatalog, selected: usize) -> PlayAttempt {
        let mut attempt = if catalog.is_video(selected) {
            PlayAttempt::Detached
        } else {
            PlayAttempt::NotAVideo
        };

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(video) = slot.as_mut() else {
                continue;
            };
            if index == selected && catalog.is_video(index) {
                attempt = match video.play() {
                    Ok(()) => PlayAttempt::Started,
                    Err(err) => {
                        debug!(index, error = %err, "video playback suppressed");
                        PlayAttempt::Suppressed(err)
                    }
                };
            } else {
                video.pause();
                video.seek_to_start();
            }
        }
        attempt
    }

    /// Pause every attached video
    pub fn pause_all(&mut self) {
        for video in self.slots.iter_mut().flatten() {
            video.pause();
        }
    }
}
