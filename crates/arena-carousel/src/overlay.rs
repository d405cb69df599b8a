//! Zoom Overlay
//!
//! A modal showing one slide at full resolution. Clicking a slide only
//! zooms it once it is centered; the first click on an off-center slide
//! centers it.

use crate::catalog::{MediaCatalog, MediaKind};
use crate::result::CarouselResult;
use serde::{Deserialize, Serialize};

/// What the overlay renders while open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomView {
    /// Catalog index
    pub index: usize,
    /// Media kind
    pub kind: MediaKind,
    /// Full-resolution URI
    pub source: String,
    /// Poster frame for videos
    pub poster: Option<String>,
}

/// Open/closed state of the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoomOverlay {
    zoomed: Option<usize>,
}

impl ZoomOverlay {
    /// Create a closed overlay
    #[must_use]
    pub const fn new() -> Self {
        Self { zoomed: None }
    }

    /// Open on `index`, replacing any open slide
    pub fn open(&mut self, index: usize) {
        self.zoomed = Some(index);
    }

    /// Close, returning the slide that was open
    pub fn close(&mut self) -> Option<usize> {
        self.zoomed.take()
    }

    /// Slide currently zoomed
    #[must_use]
    pub const fn zoomed_index(&self) -> Option<usize> {
        self.zoomed
    }

    /// Whether the overlay is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.zoomed.is_some()
    }

    /// Render model for the open slide
    pub fn view(&self, catalog: &MediaCatalog) -> CarouselResult<Option<ZoomView>> {
        let Some(index) = self.zoomed else {
            return Ok(None);
        };
        let item = catalog.get(index)?;
        Ok(Some(ZoomView {
            index,
            kind: item.kind(),
            source: item.full_resolution_source().to_string(),
            poster: item.poster().map(str::to_string),
        }))
    }
}

/// Phase of the click gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Interaction {
    /// Nothing in progress
    Idle,
    /// Waiting for the viewport to center `target`
    Centering {
        /// Slide being centered
        target: usize,
    },
    /// Overlay open on `index`
    Zoomed {
        /// Zoomed slide
        index: usize,
    },
}

/// What a slide click did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Slide was off-center and has been scrolled into the center
    Centered {
        /// Clicked slide
        index: usize,
    },
    /// Slide was centered and the overlay opened on it
    Zoomed {
        /// Clicked slide
        index: usize,
    },
    /// Click arrived while the carousel was dispatching another event and
    /// waits behind it; read [`Interaction`] once the dispatch returns
    Queued {
        /// Clicked slide
        index: usize,
    },
}
