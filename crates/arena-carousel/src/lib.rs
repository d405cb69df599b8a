//! Arena Carousel: headless media gallery component
//!
//! The gallery on the Arena café site is a looped, center-aligned strip of
//! reels and stills. This crate holds its behavior, independent of any UI
//! toolkit: which slide is centered, which video plays, when an image
//! auto-advances, which bitrate the session uses, and when the zoom overlay
//! opens. Browser pieces (scroll-snap strip, `<video>`, `setTimeout`,
//! `navigator.connection`) are traits supplied by the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         MediaCarousel                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Viewport   │    │ Event      │    │ VideoSlots │            │
//! │   │ (strip)    │───►│ queue      │───►│ AutoplayT. │            │
//! │   │            │    │            │    │ ZoomOvl.   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         ▲                 ▲                  │                  │
//! │         └─────────────────┴──── scroll_next ─┘                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use arena_carousel::mock::{FakeTimers, MockVideo};
//! use arena_carousel::{ClickOutcome, MediaCarousel, MediaCatalog};
//!
//! let timers = FakeTimers::new();
//! let reel = MockVideo::new();
//! let carousel = MediaCarousel::builder(MediaCatalog::arena_reel())
//!     .timers(timers.clone())
//!     .video(0, reel.clone())
//!     .mount()
//!     .unwrap();
//!
//! assert!(reel.is_playing());
//! carousel.video_ended(0).unwrap();
//! assert_eq!(carousel.selected_index(), 1);
//!
//! assert_eq!(carousel.click(1).unwrap(), ClickOutcome::Zoomed { index: 1 });
//! ```

#![warn(missing_docs)]

mod autoplay;
mod carousel;
mod catalog;
mod config;
mod event;
mod overlay;
mod playback;
mod quality;
mod result;
mod subscription;
mod viewport;

/// Headless collaborators and a scripted test harness
pub mod mock;

pub use autoplay::{AutoplayTimer, TimerCallback, TimerHost, TimerId};
pub use carousel::{CarouselBuilder, CarouselState, MediaCarousel, SlideView};
pub use catalog::{MediaCatalog, MediaItem, MediaKind};
pub use config::{CarouselConfig, GalleryConfig, DEFAULT_DWELL_MS};
pub use event::CarouselEvent;
pub use overlay::{ClickOutcome, Interaction, ZoomOverlay, ZoomView};
pub use playback::{PlayAttempt, PlaybackError, VideoElement, VideoSlots};
pub use quality::{
    select_quality, ConnectionInfo, EffectiveConnectionType, NavigatorConnection,
    NetworkInformation, NoNetworkInformation, VideoQuality,
};
pub use result::{CarouselError, CarouselResult};
pub use subscription::{ListenerRegistry, SelectListener, SharedListeners, Subscription};
pub use viewport::{SnapStrip, Viewport};

/// Public helpers for implementing [`Viewport`] on a host strip
pub mod listeners {
    pub use crate::subscription::{emit, subscribe};
}
