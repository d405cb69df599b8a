//! Carousel input events.
//!
//! Every host callback is turned into one of these and queued. The queue
//! is drained one event at a time, so the handler for one event always
//! finishes before the next starts, even when the handler itself scrolls
//! the viewport and triggers another selection change.

use serde::{Deserialize, Serialize};

/// Input delivered to a mounted carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// Viewport centered a new slide
    Selected {
        /// Newly centered slide
        index: usize,
    },
    /// Autoplay dwell elapsed
    AutoplayElapsed {
        /// Generation of the advance that fired
        generation: u64,
    },
    /// A video reached its end
    VideoEnded {
        /// Slide whose video ended
        index: usize,
    },
    /// User clicked a slide
    SlideClicked {
        /// Clicked slide
        index: usize,
    },
    /// Overlay dismissed (close button, escape, backdrop)
    ZoomClosed,
}

impl CarouselEvent {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Selected { .. } => "selected",
            Self::AutoplayElapsed { .. } => "autoplay_elapsed",
            Self::VideoEnded { .. } => "video_ended",
            Self::SlideClicked { .. } => "slide_clicked",
            Self::ZoomClosed => "zoom_closed",
        }
    }
}
