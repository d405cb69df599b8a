//! Headless Collaborators for Testing
//!
//! Stand-ins for the browser pieces a carousel talks to: timers, video
//! elements and the network-information API. They record every call so
//! tests can assert on the component's side effects instead of a model.
//!
//! ## Example
//!
//! ```rust
//! use arena_carousel::mock::{CarouselHarness, HarnessStep};
//! use arena_carousel::MediaCatalog;
//!
//! let mut harness = CarouselHarness::mount(MediaCatalog::arena_reel()).unwrap();
//! harness.assert_playing_only(Some(0));
//!
//! harness.apply(&HarnessStep::EndVideo { index: 0 }).unwrap();
//! harness.assert_selected(1);
//! ```

pub mod harness;
pub mod network;
pub mod timers;
pub mod video;

pub use harness::{CarouselHarness, HarnessStep, SessionTrace, TraceEntry};
pub use network::MockNetwork;
pub use timers::FakeTimers;
pub use video::{MockVideo, MockVideoState};
