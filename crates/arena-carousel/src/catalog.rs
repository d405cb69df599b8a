//! Media Catalog
//!
//! The fixed, ordered list of slides shown by a carousel. Catalog order is
//! carousel order, and indices stay valid for the lifetime of a mount.

use crate::quality::VideoQuality;
use crate::result::{CarouselError, CarouselResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media on a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaItem {
    /// Still image
    Image {
        /// Image URI
        source: String,
    },
    /// Video clip with two bitrate variants
    Video {
        /// Low-bitrate URI
        low_bitrate_source: String,
        /// High-bitrate URI
        high_bitrate_source: String,
        /// Poster frame URI
        poster: String,
    },
}

impl MediaItem {
    /// Create an image item
    #[must_use]
    pub fn image(source: impl Into<String>) -> Self {
        Self::Image {
            source: source.into(),
        }
    }

    /// Create a video item
    #[must_use]
    pub fn video(
        low_bitrate_source: impl Into<String>,
        high_bitrate_source: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self::Video {
            low_bitrate_source: low_bitrate_source.into(),
            high_bitrate_source: high_bitrate_source.into(),
            poster: poster.into(),
        }
    }

    /// Kind of this item
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Image { .. } => MediaKind::Image,
            Self::Video { .. } => MediaKind::Video,
        }
    }

    /// Whether this item is a video
    #[must_use]
    pub const fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }

    /// Whether this item is an image
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// URI shown in the strip for the session quality
    #[must_use]
    pub fn session_source(&self, quality: VideoQuality) -> &str {
        match self {
            Self::Image { source } => source,
            Self::Video {
                low_bitrate_source,
                high_bitrate_source,
                ..
            } => match quality {
                VideoQuality::Low => low_bitrate_source,
                VideoQuality::High => high_bitrate_source,
            },
        }
    }

    /// Full-resolution URI, independent of the session quality
    #[must_use]
    pub fn full_resolution_source(&self) -> &str {
        match self {
            Self::Image { source } => source,
            Self::Video {
                high_bitrate_source,
                ..
            } => high_bitrate_source,
        }
    }

    /// Poster frame, for videos
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        match self {
            Self::Image { .. } => None,
            Self::Video { poster, .. } => Some(poster),
        }
    }
}

/// Non-empty, ordered list of media items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MediaItem>", into = "Vec<MediaItem>")]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
}

impl MediaCatalog {
    /// Create a catalog
    ///
    /// # Errors
    ///
    /// Returns `EmptyCatalog` if `items` is empty
    pub fn new(items: Vec<MediaItem>) -> CarouselResult<Self> {
        if items.is_empty() {
            return Err(CarouselError::EmptyCatalog);
        }
        Ok(Self { items })
    }

    /// The café's compiled-in gallery reel: two videos, then seven stills.
    ///
    /// Sources are the site's bundled asset paths. The site ships no poster
    /// files, so each reel's poster is named `reelN_poster.webp` beside it.
    #[must_use]
    pub fn arena_reel() -> Self {
        let mut items: Vec<MediaItem> = (1..=2)
            .map(|n| {
                MediaItem::video(
                    format!("/src/assets/reels/reel{n}_low.mp4"),
                    format!("/src/assets/reels/reel{n}_high.mp4"),
                    format!("/src/assets/reels/reel{n}_poster.webp"),
                )
            })
            .collect();
        items.extend((1..=7).map(|n| MediaItem::image(format!("/src/assets/gallery-images/img{n}.webp"))));
        Self { items }
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> CarouselResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog from YAML
    pub fn from_yaml(yaml: &str) -> CarouselResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> CarouselResult<&MediaItem> {
        self.items.get(index).ok_or(CarouselError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Whether the item at `index` is a video (false when out of range)
    #[must_use]
    pub fn is_video(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(MediaItem::is_video)
    }

    /// All items in order
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Iterate items in order
    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }

    /// Indices of video items
    #[must_use]
    pub fn video_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_video())
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for MediaCatalog {
    fn default() -> Self {
        Self::arena_reel()
    }
}

impl TryFrom<Vec<MediaItem>> for MediaCatalog {
    type Error = CarouselError;

    fn try_from(items: Vec<MediaItem>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<MediaCatalog> for Vec<MediaItem> {
    fn from(catalog: MediaCatalog) -> Self {
        catalog.items
    }
}

impl<'a> IntoIterator for &'a MediaCatalog {
    type Item = &'a MediaItem;
    type IntoIter = std::slice::Iter<'a, MediaItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
