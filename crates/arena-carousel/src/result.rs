//! Result and error types for the carousel.

use thiserror::Error;

/// Result type for carousel operations
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Errors that can occur while building or driving a carousel
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Catalog holds no media items
    #[error("Catalog is empty: a carousel needs at least one media item")]
    EmptyCatalog,

    /// Slide index outside the catalog bounds
    #[error("Slide index {index} out of range for catalog of {len} items")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Catalog length
        len: usize,
    },

    /// Video handle attached to a slide that is not a video
    #[error("Slide {index} is not a video")]
    NotAVideo {
        /// Offending index
        index: usize,
    },

    /// Viewport strip and catalog disagree on slide count
    #[error("Viewport has {viewport} slides but catalog has {catalog}")]
    ViewportMismatch {
        /// Slides reported by the viewport
        viewport: usize,
        /// Items in the catalog
        catalog: usize,
    },

    /// Required collaborator was not supplied at mount
    #[error("Missing collaborator: {name}")]
    MissingCollaborator {
        /// Collaborator name
        name: &'static str,
    },

    /// Operation on a carousel that was already unmounted
    #[error("Carousel is unmounted")]
    Unmounted,

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CarouselError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check an index against a length
    pub fn check_index(index: usize, len: usize) -> CarouselResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}
