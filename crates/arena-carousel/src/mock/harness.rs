//! Carousel Test Harness
//!
//! Mounts a [`MediaCarousel`] against headless collaborators (a
//! [`SnapStrip`], [`FakeTimers`], a [`MockVideo`] on every video slide and a
//! [`MockNetwork`]) and replays scripted steps, recording the visible state
//! after each one.

use super::network::MockNetwork;
use super::timers::FakeTimers;
use super::video::MockVideo;
use crate::carousel::MediaCarousel;
use crate::catalog::MediaCatalog;
use crate::config::CarouselConfig;
use crate::overlay::{ClickOutcome, Interaction};
use crate::quality::VideoQuality;
use crate::result::{CarouselError, CarouselResult};
use crate::viewport::SnapStrip;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scripted user or host action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum HarnessStep {
    /// Advance the fake clock
    Advance {
        /// Milliseconds to advance
        ms: u64,
    },
    /// Fire the ended signal of a video slide
    EndVideo {
        /// Slide index
        index: usize,
    },
    /// Click a slide
    Click {
        /// Slide index
        index: usize,
    },
    /// Drag a slide into the center
    Drag {
        /// Slide index
        index: usize,
    },
    /// Scroll forward one slide
    Next,
    /// Scroll back one slide
    Prev,
    /// Dismiss the zoom overlay
    CloseZoom,
    /// Change the network hint after mount
    Hint {
        /// New effective connection type
        effective_type: String,
    },
}

impl HarnessStep {
    /// Parse the compact form: `advance:MS`, `end:I`, `click:I`, `drag:I`,
    /// `next`, `prev`, `close`, `hint:TYPE`
    pub fn parse(input: &str) -> CarouselResult<Self> {
        let input = input.trim();
        let (verb, arg) = match input.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (input, None),
        };
        let number = |arg: Option<&str>| -> CarouselResult<u64> {
            arg.and_then(|a| a.parse().ok())
                .ok_or_else(|| CarouselError::config(format!("step {input:?} needs a numeric argument")))
        };
        let step = match verb {
            "advance" => Self::Advance { ms: number(arg)? },
            "end" => Self::EndVideo {
                index: number(arg)? as usize,
            },
            "click" => Self::Click {
                index: number(arg)? as usize,
            },
            "drag" => Self::Drag {
                index: number(arg)? as usize,
            },
            "next" => Self::Next,
            "prev" => Self::Prev,
            "close" => Self::CloseZoom,
            "hint" => Self::Hint {
                effective_type: arg
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| CarouselError::config(format!("step {input:?} needs a connection type")))?
                    .to_string(),
            },
            _ => return Err(CarouselError::config(format!("unknown step {input:?}"))),
        };
        Ok(step)
    }
}

impl fmt::Display for HarnessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advance { ms } => write!(f, "advance:{ms}"),
            Self::EndVideo { index } => write!(f, "end:{index}"),
            Self::Click { index } => write!(f, "click:{index}"),
            Self::Drag { index } => write!(f, "drag:{index}"),
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
            Self::CloseZoom => write!(f, "close"),
            Self::Hint { effective_type } => write!(f, "hint:{effective_type}"),
        }
    }
}

/// Visible state after a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Step that produced this state; `None` for the mount
    pub step: Option<String>,
    /// Virtual time
    pub at_ms: u64,
    /// Centered slide
    pub selected_index: usize,
    /// Zoomed slide
    pub zoomed_index: Option<usize>,
    /// Click gesture phase
    pub interaction: Interaction,
    /// Slides whose video is playing
    pub playing: Vec<usize>,
    /// Virtual time of the pending auto-advance
    pub advance_due_ms: Option<u64>,
    /// Result of a click step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ClickOutcome>,
}

/// Full record of a scripted session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTrace {
    /// Quality chosen at mount
    pub quality: VideoQuality,
    /// Catalog length
    pub slides: usize,
    /// Mount state followed by one entry per step
    pub entries: Vec<TraceEntry>,
}

/// Carousel wired to headless collaborators
#[derive(Debug)]
pub struct CarouselHarness {
    /// Component under test
    pub carousel: MediaCarousel,
    /// Slide strip (shared with the carousel)
    pub strip: SnapStrip,
    /// Timer host (shared with the carousel)
    pub timers: FakeTimers,
    /// Network hint (read once at mount)
    pub network: MockNetwork,
    videos: Vec<Option<MockVideo>>,
}

impl CarouselHarness {
    /// Mount with default options and no network hint
    pub fn mount(catalog: MediaCatalog) -> CarouselResult<Self> {
        Self::mount_with(catalog, CarouselConfig::default(), MockNetwork::unavailable())
    }

    /// Mount with explicit options and hint
    pub fn mount_with(
        catalog: MediaCatalog,
        config: CarouselConfig,
        network: MockNetwork,
    ) -> CarouselResult<Self> {
        let strip = SnapStrip::new(catalog.len())?.with_loop(config.looped);
        let timers = FakeTimers::new();
        let videos: Vec<Option<MockVideo>> = catalog
            .iter()
            .map(|item| item.is_video().then(MockVideo::new))
            .collect();

        let mut builder = MediaCarousel::builder(catalog)
            .config(config)
            .viewport(strip.clone())
            .timers(timers.clone())
            .network(network.clone());
        for (index, video) in videos.iter().enumerate() {
            if let Some(video) = video {
                builder = builder.video(index, video.clone());
            }
        }
        let carousel = builder.mount()?;

        Ok(Self {
            carousel,
            strip,
            timers,
            network,
            videos,
        })
    }

    /// Mock element on slide `index`, if it is a video
    #[must_use]
    pub fn video(&self, index: usize) -> Option<&MockVideo> {
        self.videos.get(index).and_then(Option::as_ref)
    }

    /// Slides whose video is playing
    #[must_use]
    pub fn playing_indices(&self) -> Vec<usize> {
        self.videos
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_ref().is_some_and(MockVideo::is_playing))
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply one step
    pub fn apply(&mut self, step: &HarnessStep) -> CarouselResult<Option<ClickOutcome>> {
        match step {
            HarnessStep::Advance { ms } => {
                self.timers.advance_ms(*ms);
            }
            HarnessStep::EndVideo { index } => self.carousel.video_ended(*index)?,
            HarnessStep::Click { index } => return self.carousel.click(*index).map(Some),
            HarnessStep::Drag { index } => self.strip.drag_to(*index)?,
            HarnessStep::Next => self.carousel.scroll_next()?,
            HarnessStep::Prev => self.carousel.scroll_prev()?,
            HarnessStep::CloseZoom => self.carousel.close_zoom()?,
            HarnessStep::Hint { effective_type } => self.network.set_effective_type(effective_type),
        }
        Ok(None)
    }

    /// Record the visible state
    #[must_use]
    pub fn snapshot(&self, step: Option<&HarnessStep>, outcome: Option<ClickOutcome>) -> TraceEntry {
        let state = self.carousel.state();
        TraceEntry {
            step: step.map(ToString::to_string),
            at_ms: self.timers.now_ms(),
            selected_index: state.selected_index(),
            zoomed_index: state.zoomed_index(),
            interaction: state.interaction(),
            playing: self.playing_indices(),
            advance_due_ms: self
                .carousel
                .pending_advance()
                .and(self.timers.next_due_ms()),
            outcome,
        }
    }

    /// Replay `steps`, recording the mount state and the state after each step
    pub fn run(&mut self, steps: &[HarnessStep]) -> CarouselResult<SessionTrace> {
        let mut entries = Vec::with_capacity(steps.len() + 1);
        entries.push(self.snapshot(None, None));
        for step in steps {
            let outcome = self.apply(step)?;
            entries.push(self.snapshot(Some(step), outcome));
        }
        Ok(SessionTrace {
            quality: self.carousel.quality(),
            slides: self.carousel.catalog().len(),
            entries,
        })
    }

    /// Assert the centered slide
    pub fn assert_selected(&self, expected: usize) {
        assert_eq!(
            self.carousel.selected_index(),
            expected,
            "expected slide {expected} to be centered"
        );
    }

    /// Assert which video, if any, is playing
    pub fn assert_playing_only(&self, expected: Option<usize>) {
        let expected: Vec<usize> = expected.into_iter().collect();
        assert_eq!(self.playing_indices(), expected, "unexpected playing set");
    }

    /// Unmount the carousel
    pub fn unmount(&mut self) {
        self.carousel.unmount();
    }
}
