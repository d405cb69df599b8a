//! MediaCarousel
//!
//! Wires the viewport, playback coordinator, autoplay timer, quality
//! decision and zoom overlay into one mounted component.
//!
//! ```text
//!  viewport ──select──┐
//!  timer ────elapsed──┤
//!  video ────ended────┼──► event queue ──► handle() ──► pause/play videos
//!  host ─────click────┤                            ├──► reset/schedule autoplay
//!  overlay ──dismiss──┘                            └──► scroll / open / close zoom
//! ```
//!
//! Callbacks handed to the viewport and the timer host hold only weak
//! references to the component, so nothing keeps it alive after the owner
//! drops it, and late firings become no-ops.

use crate::autoplay::{AutoplayTimer, TimerHost, TimerId};
use crate::catalog::{MediaCatalog, MediaKind};
use crate::config::CarouselConfig;
use crate::event::CarouselEvent;
use crate::overlay::{ClickOutcome, Interaction, ZoomOverlay, ZoomView};
use crate::playback::{VideoElement, VideoSlots};
use crate::quality::{select_quality, NetworkInformation, NoNetworkInformation, VideoQuality};
use crate::result::{CarouselError, CarouselResult};
use crate::subscription::Subscription;
use crate::viewport::{SnapStrip, Viewport};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info, trace, warn};

/// Runtime state of a mounted carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    selected_index: usize,
    overlay: ZoomOverlay,
    quality: VideoQuality,
    centering: Option<usize>,
}

impl CarouselState {
    /// Centered slide
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Slide shown in the overlay, if open
    #[must_use]
    pub const fn zoomed_index(&self) -> Option<usize> {
        self.overlay.zoomed_index()
    }

    /// Session video quality
    #[must_use]
    pub const fn quality(&self) -> VideoQuality {
        self.quality
    }

    /// Whether high-bitrate sources were chosen at mount
    #[must_use]
    pub const fn prefer_high_quality(&self) -> bool {
        self.quality.is_high()
    }

    /// Phase of the click gesture
    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        if let Some(index) = self.overlay.zoomed_index() {
            Interaction::Zoomed { index }
        } else if let Some(target) = self.centering {
            Interaction::Centering { target }
        } else {
            Interaction::Idle
        }
    }
}

/// Render model for one slide of the strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    /// Catalog index
    pub index: usize,
    /// Media kind
    pub kind: MediaKind,
    /// URI for the session quality
    pub source: String,
    /// Poster frame for videos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    /// Whether this is the centered slide (others render dimmed)
    pub selected: bool,
}

type ClickSlot = Rc<Cell<Option<ClickOutcome>>>;

struct CarouselCore {
    catalog: MediaCatalog,
    viewport: Rc<dyn Viewport>,
    timers: Rc<dyn TimerHost>,
    state: RefCell<CarouselState>,
    videos: RefCell<VideoSlots>,
    autoplay: RefCell<AutoplayTimer>,
    queue: RefCell<VecDeque<CarouselEvent>>,
    /// One slot per queued `SlideClicked`, filled by its handler
    click_slots: RefCell<VecDeque<ClickSlot>>,
    dispatching: Cell<bool>,
    unmounted: Cell<bool>,
    processed: Cell<u64>,
    this: Weak<CarouselCore>,
}

impl fmt::Debug for CarouselCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselCore")
            .field("slides", &self.catalog.len())
            .field("state", &self.state.borrow())
            .field("videos", &self.videos.borrow())
            .field("autoplay", &self.autoplay.borrow())
            .field("queued", &self.queue.borrow().len())
            .field("unmounted", &self.unmounted.get())
            .finish()
    }
}

impl CarouselCore {
    fn enqueue(&self, event: CarouselEvent) {
        self.queue.borrow_mut().push_back(event);
        self.pump();
    }

    /// Drain the queue unless a drain is already running further up the stack.
    fn pump(&self) {
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            self.handle(event);
        }
        self.dispatching.set(false);
    }

    fn handle(&self, event: CarouselEvent) {
        if self.unmounted.get() {
            trace!(event = event.name(), "event dropped after unmount");
            return;
        }
        self.processed.set(self.processed.get() + 1);
        match event {
            CarouselEvent::Selected { index } => self.on_selected(index),
            CarouselEvent::AutoplayElapsed { generation } => self.on_autoplay_elapsed(generation),
            CarouselEvent::VideoEnded { index } => self.on_video_ended(index),
            CarouselEvent::SlideClicked { index } => self.on_slide_clicked(index),
            CarouselEvent::ZoomClosed => self.on_zoom_closed(),
        }
    }

    fn on_selected(&self, index: usize) {
        if index >= self.catalog.len() {
            warn!(index, slides = self.catalog.len(), "viewport selected unknown slide");
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            state.selected_index = index;
            state.centering = None;
        }

        let attempt = self.videos.borrow_mut().coordinate(&self.catalog, index);

        let mut autoplay = self.autoplay.borrow_mut();
        autoplay.cancel(self.timers.as_ref());
        if self.catalog.is_video(index) {
            debug!(index, ?attempt, "video slide selected");
            return;
        }
        let this = self.this.clone();
        let timer = autoplay.schedule(self.timers.as_ref(), move |generation| {
            if let Some(core) = this.upgrade() {
                core.enqueue(CarouselEvent::AutoplayElapsed { generation });
            }
        });
        debug!(
            index,
            %timer,
            dwell_ms = autoplay.dwell().as_millis() as u64,
            "image slide selected, advance scheduled"
        );
    }

    fn on_autoplay_elapsed(&self, generation: u64) {
        let claimed = self.autoplay.borrow_mut().claim(generation);
        if claimed {
            debug!(generation, "autoplay advancing");
            self.viewport.scroll_next();
        } else {
            trace!(generation, "stale autoplay firing ignored");
        }
    }

    fn on_video_ended(&self, index: usize) {
        let selected = self.state.borrow().selected_index;
        if index == selected && self.catalog.is_video(index) {
            debug!(index, "video ended, advancing");
            self.viewport.scroll_next();
        } else {
            trace!(index, selected, "ended signal from unselected slide ignored");
        }
    }

    fn on_slide_clicked(&self, index: usize) {
        let slot = self.click_slots.borrow_mut().pop_front();
        let selected = self.state.borrow().selected_index;
        if index == selected {
            self.state.borrow_mut().overlay.open(index);
            if let Some(slot) = slot {
                slot.set(Some(ClickOutcome::Zoomed { index }));
            }
            debug!(index, "zoom opened");
            return;
        }
        if let Some(slot) = slot {
            slot.set(Some(ClickOutcome::Centered { index }));
        }
        self.state.borrow_mut().centering = Some(index);
        debug!(index, selected, "centering clicked slide");
        if let Err(err) = self.viewport.scroll_to(index) {
            warn!(index, error = %err, "viewport refused to center slide");
            self.state.borrow_mut().centering = None;
        }
    }

    fn on_zoom_closed(&self) {
        if let Some(index) = self.state.borrow_mut().overlay.close() {
            debug!(index, "zoom closed");
        }
    }
}

/// Builder for mounting a [`MediaCarousel`]
pub struct CarouselBuilder {
    catalog: MediaCatalog,
    config: CarouselConfig,
    viewport: Option<Rc<dyn Viewport>>,
    timers: Option<Rc<dyn TimerHost>>,
    network: Box<dyn NetworkInformation>,
    videos: Vec<(usize, Box<dyn VideoElement>)>,
}

impl fmt::Debug for CarouselBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselBuilder")
            .field("slides", &self.catalog.len())
            .field("config", &self.config)
            .field("has_viewport", &self.viewport.is_some())
            .field("has_timers", &self.timers.is_some())
            .field("videos", &self.videos.iter().map(|(i, _)| *i).collect::<Vec<_>>())
            .finish()
    }
}

impl CarouselBuilder {
    /// Start a builder for `catalog`
    #[must_use]
    pub fn new(catalog: MediaCatalog) -> Self {
        Self {
            catalog,
            config: CarouselConfig::default(),
            viewport: None,
            timers: None,
            network: Box::new(NoNetworkInformation),
            videos: Vec::new(),
        }
    }

    /// Timing and looping options
    #[must_use]
    pub fn config(mut self, config: CarouselConfig) -> Self {
        self.config = config;
        self
    }

    /// Host slide strip. Defaults to a [`SnapStrip`] sized to the catalog.
    ///
    /// A host strip owns its own wrapping: [`CarouselConfig::looped`] only
    /// shapes the default strip, and mount logs a warning when a host strip
    /// reports a different setting through [`Viewport::wraps`].
    #[must_use]
    pub fn viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Some(Rc::new(viewport));
        self
    }

    /// Host timers (required)
    #[must_use]
    pub fn timers(mut self, timers: impl TimerHost + 'static) -> Self {
        self.timers = Some(Rc::new(timers));
        self
    }

    /// Network hint, read once at mount
    #[must_use]
    pub fn network(mut self, network: impl NetworkInformation + 'static) -> Self {
        self.network = Box::new(network);
        self
    }

    /// Video element for the video slide at `index`
    #[must_use]
    pub fn video(mut self, index: usize, element: impl VideoElement + 'static) -> Self {
        self.videos.push((index, Box::new(element)));
        self
    }

    /// Mount the carousel and process the initial selection
    pub fn mount(self) -> CarouselResult<MediaCarousel> {
        let Self {
            catalog,
            config,
            viewport,
            timers,
            network,
            videos,
        } = self;

        config.validate()?;
        let timers = timers.ok_or(CarouselError::MissingCollaborator { name: "timers" })?;
        let viewport = match viewport {
            Some(viewport) => {
                if let Some(wraps) = viewport.wraps().filter(|w| *w != config.looped) {
                    warn!(
                        strip_wraps = wraps,
                        config_looped = config.looped,
                        "host viewport ignores the looped setting"
                    );
                }
                viewport
            }
            None => {
                let strip = SnapStrip::new(catalog.len())?.with_loop(config.looped);
                Rc::new(strip) as Rc<dyn Viewport>
            }
        };
        if viewport.slide_count() != catalog.len() {
            return Err(CarouselError::ViewportMismatch {
                viewport: viewport.slide_count(),
                catalog: catalog.len(),
            });
        }
        let selected = viewport.selected_index();
        CarouselError::check_index(selected, catalog.len())?;

        // The hint is consulted here and nowhere else.
        let quality = select_quality(network.as_ref());
        drop(network);

        let mut slots = VideoSlots::new(catalog.len());
        for (index, element) in videos {
            slots.attach(&catalog, index, element)?;
        }
        slots.load_sources(|index| {
            catalog
                .get(index)
                .ok()
                .filter(|item| item.is_video())
                .map(|item| item.session_source(quality).to_string())
        });

        let core = Rc::new_cyclic(|this| CarouselCore {
            catalog,
            viewport,
            timers,
            state: RefCell::new(CarouselState {
                selected_index: selected,
                overlay: ZoomOverlay::new(),
                quality,
                centering: None,
            }),
            videos: RefCell::new(slots),
            autoplay: RefCell::new(AutoplayTimer::new(config.dwell())),
            queue: RefCell::new(VecDeque::new()),
            click_slots: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            unmounted: Cell::new(false),
            processed: Cell::new(0),
            this: this.clone(),
        });

        let listener_core = Rc::downgrade(&core);
        let subscription = core.viewport.on_select(Box::new(move |index| {
            if let Some(core) = listener_core.upgrade() {
                core.enqueue(CarouselEvent::Selected { index });
            }
        }));

        info!(
            slides = core.catalog.len(),
            videos = core.videos.borrow().attached_indices().len(),
            %quality,
            "carousel mounted"
        );
        core.enqueue(CarouselEvent::Selected { index: selected });

        Ok(MediaCarousel {
            core,
            subscription: Some(subscription),
        })
    }
}

/// A mounted media carousel
#[derive(Debug)]
pub struct MediaCarousel {
    core: Rc<CarouselCore>,
    subscription: Option<Subscription>,
}

impl MediaCarousel {
    /// Start building a carousel for `catalog`
    #[must_use]
    pub fn builder(catalog: MediaCatalog) -> CarouselBuilder {
        CarouselBuilder::new(catalog)
    }

    /// The catalog being shown
    #[must_use]
    pub fn catalog(&self) -> &MediaCatalog {
        &self.core.catalog
    }

    /// Snapshot of the runtime state
    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.core.state.borrow().clone()
    }

    /// Centered slide
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.core.state.borrow().selected_index
    }

    /// Slide in the overlay, if open
    #[must_use]
    pub fn zoomed_index(&self) -> Option<usize> {
        self.core.state.borrow().zoomed_index()
    }

    /// Session video quality
    #[must_use]
    pub fn quality(&self) -> VideoQuality {
        self.core.state.borrow().quality
    }

    /// Whether high-bitrate sources were chosen at mount
    #[must_use]
    pub fn prefer_high_quality(&self) -> bool {
        self.quality().is_high()
    }

    /// Phase of the click gesture
    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.core.state.borrow().interaction()
    }

    /// Host id of the scheduled auto-advance
    #[must_use]
    pub fn pending_advance(&self) -> Option<TimerId> {
        self.core.autoplay.borrow().pending_id()
    }

    /// Number of events handled since mount
    #[must_use]
    pub fn events_processed(&self) -> u64 {
        self.core.processed.get()
    }

    /// Whether the carousel is still mounted
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.core.unmounted.get()
    }

    /// Render model for the strip
    #[must_use]
    pub fn slides(&self) -> Vec<SlideView> {
        let state = self.core.state.borrow();
        self.core
            .catalog
            .iter()
            .enumerate()
            .map(|(index, item)| SlideView {
                index,
                kind: item.kind(),
                source: item.session_source(state.quality).to_string(),
                poster: item.poster().map(str::to_string),
                selected: index == state.selected_index,
            })
            .collect()
    }

    /// Render model for the overlay, if open
    #[must_use]
    pub fn zoom_view(&self) -> Option<ZoomView> {
        self.core
            .state
            .borrow()
            .overlay
            .view(&self.core.catalog)
            .ok()
            .flatten()
    }

    /// Center the slide at `index`
    pub fn scroll_to(&self, index: usize) -> CarouselResult<()> {
        self.ensure_mounted()?;
        self.core.viewport.scroll_to(index)
    }

    /// Advance one slide
    pub fn scroll_next(&self) -> CarouselResult<()> {
        self.ensure_mounted()?;
        self.core.viewport.scroll_next();
        Ok(())
    }

    /// Go back one slide
    pub fn scroll_prev(&self) -> CarouselResult<()> {
        self.ensure_mounted()?;
        self.core.viewport.scroll_prev();
        Ok(())
    }

    /// Host signal: the video on slide `index` played to its end
    pub fn video_ended(&self, index: usize) -> CarouselResult<()> {
        self.ensure_mounted()?;
        CarouselError::check_index(index, self.core.catalog.len())?;
        self.core.enqueue(CarouselEvent::VideoEnded { index });
        Ok(())
    }

    /// User clicked slide `index`: center it, or zoom it if already centered.
    ///
    /// The outcome is what the click handler did. A click made from inside a
    /// collaborator callback while an event is being dispatched is handled
    /// after that dispatch and reports [`ClickOutcome::Queued`].
    pub fn click(&self, index: usize) -> CarouselResult<ClickOutcome> {
        self.ensure_mounted()?;
        CarouselError::check_index(index, self.core.catalog.len())?;
        let slot = ClickSlot::default();
        self.core.click_slots.borrow_mut().push_back(Rc::clone(&slot));
        self.core.enqueue(CarouselEvent::SlideClicked { index });
        Ok(slot.get().unwrap_or(ClickOutcome::Queued { index }))
    }

    /// Overlay dismissed by the user
    pub fn close_zoom(&self) -> CarouselResult<()> {
        self.ensure_mounted()?;
        self.core.enqueue(CarouselEvent::ZoomClosed);
        Ok(())
    }

    /// Tear down: cancel the pending advance, release the selection
    /// subscription, pause every video and drop queued events. Idempotent;
    /// also runs on drop.
    pub fn unmount(&mut self) {
        if self.core.unmounted.replace(true) {
            return;
        }
        drop(self.subscription.take());
        self.core.autoplay.borrow_mut().cancel(self.core.timers.as_ref());
        self.core.videos.borrow_mut().pause_all();
        self.core.queue.borrow_mut().clear();
        self.core.click_slots.borrow_mut().clear();
        info!(events = self.core.processed.get(), "carousel unmounted");
    }

    fn ensure_mounted(&self) -> CarouselResult<()> {
        if self.core.unmounted.get() {
            Err(CarouselError::Unmounted)
        } else {
            Ok(())
        }
    }
}

impl Drop for MediaCarousel {
    fn drop(&mut self) {
        self.unmount();
    }
}
