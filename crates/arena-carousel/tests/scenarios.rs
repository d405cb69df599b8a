//! End-to-end carousel sessions against headless collaborators.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use arena_carousel::mock::{CarouselHarness, FakeTimers, HarnessStep, MockNetwork, MockVideo};
use arena_carousel::{
    listeners, CarouselConfig, CarouselError, CarouselResult, ClickOutcome, GalleryConfig,
    Interaction, ListenerRegistry, MediaCarousel, MediaCatalog, MediaItem, NavigatorConnection,
    PlaybackError, SelectListener, SharedListeners, SnapStrip, Subscription, VideoElement,
    VideoQuality, Viewport,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

type Log = Rc<RefCell<Vec<String>>>;

/// Video element that scrolls the strip forward from inside its first `play()`
struct ScrollingVideo {
    strip: SnapStrip,
    scrolled: bool,
    log: Log,
}

impl VideoElement for ScrollingVideo {
    fn set_source(&mut self, _uri: &str) {}

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.log.borrow_mut().push("play".to_string());
        if !self.scrolled {
            self.scrolled = true;
            self.strip.scroll_next();
            self.log.borrow_mut().push("scrolled".to_string());
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().push("pause".to_string());
    }

    fn seek_to_start(&mut self) {
        self.log.borrow_mut().push("rewind".to_string());
    }
}

/// Host strip built on the public listener helpers; notifies synchronously
struct LoggingStrip {
    len: usize,
    selected: Cell<usize>,
    registry: SharedListeners,
    log: Log,
}

impl LoggingStrip {
    fn new(len: usize, log: Log) -> Self {
        Self {
            len,
            selected: Cell::new(0),
            registry: ListenerRegistry::shared(),
            log,
        }
    }

    fn select(&self, index: usize) {
        if self.selected.replace(index) != index {
            listeners::emit(&self.registry, index);
        }
    }
}

impl Viewport for LoggingStrip {
    fn slide_count(&self) -> usize {
        self.len
    }

    fn selected_index(&self) -> usize {
        self.selected.get()
    }

    fn scroll_to(&self, index: usize) -> CarouselResult<()> {
        CarouselError::check_index(index, self.len)?;
        self.log.borrow_mut().push(format!("scroll_to:{index}"));
        self.select(index);
        self.log.borrow_mut().push(format!("scroll_to:{index} done"));
        Ok(())
    }

    fn scroll_next(&self) {
        self.select((self.selected.get() + 1) % self.len);
    }

    fn scroll_prev(&self) {
        self.select((self.selected.get() + self.len - 1) % self.len);
    }

    fn on_select(&self, listener: SelectListener) -> Subscription {
        listeners::subscribe(&self.registry, listener)
    }
}

/// Video element that only records calls
struct LoggingVideo {
    log: Log,
}

impl VideoElement for LoggingVideo {
    fn set_source(&mut self, _uri: &str) {}

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.log.borrow_mut().push("play:1".to_string());
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().push("pause:1".to_string());
    }

    fn seek_to_start(&mut self) {
        self.log.borrow_mut().push("rewind:1".to_string());
    }
}

/// Video element that, once armed, scrolls forward and clicks the next
/// slide from inside `play()`
struct ClickingVideo {
    strip: SnapStrip,
    carousel: Rc<RefCell<Weak<MediaCarousel>>>,
    outcomes: Rc<RefCell<Vec<ClickOutcome>>>,
}

impl VideoElement for ClickingVideo {
    fn set_source(&mut self, _uri: &str) {}

    fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(carousel) = self.carousel.borrow().upgrade() else {
            return Ok(());
        };
        *self.carousel.borrow_mut() = Weak::new();
        self.strip.scroll_next();
        let outcome = carousel.click(1).unwrap();
        self.outcomes.borrow_mut().push(outcome);
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek_to_start(&mut self) {}
}

fn video_image_image() -> MediaCatalog {
    MediaCatalog::new(vec![
        MediaItem::video("/r/a_low.mp4", "/r/a_high.mp4", "/r/a.webp"),
        MediaItem::image("/g/b.webp"),
        MediaItem::image("/g/c.webp"),
    ])
    .unwrap()
}

// ============================================================================
// Walkthrough
// ============================================================================

#[test]
fn test_video_then_images_walkthrough() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();
    h.assert_selected(0);
    h.assert_playing_only(Some(0));
    assert_eq!(h.video(0).unwrap().play_count(), 1);

    h.apply(&HarnessStep::EndVideo { index: 0 }).unwrap();
    h.assert_selected(1);
    h.assert_playing_only(None);
    assert_eq!(h.timers.next_due_ms(), Some(3000));

    h.timers.advance(Duration::from_millis(3000));
    h.assert_selected(2);
    assert_eq!(h.timers.next_due_ms(), Some(6000));

    let outcome = h.apply(&HarnessStep::Click { index: 2 }).unwrap();
    assert_eq!(outcome, Some(ClickOutcome::Zoomed { index: 2 }));
    assert_eq!(h.carousel.zoomed_index(), Some(2));

    h.apply(&HarnessStep::CloseZoom).unwrap();
    assert_eq!(h.carousel.zoomed_index(), None);
}

#[test]
fn test_image_wraps_back_to_video() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();
    h.apply(&HarnessStep::Drag { index: 2 }).unwrap();

    h.timers.advance_ms(3000);

    h.assert_selected(0);
    h.assert_playing_only(Some(0));
    assert_eq!(h.video(0).unwrap().play_count(), 2);
    assert_eq!(h.timers.pending_count(), 0);
}

#[test]
fn test_first_click_centers_second_click_zooms() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();

    let first = h.apply(&HarnessStep::Click { index: 1 }).unwrap();
    assert_eq!(first, Some(ClickOutcome::Centered { index: 1 }));
    assert_eq!(h.carousel.zoomed_index(), None);
    h.assert_selected(1);

    let second = h.apply(&HarnessStep::Click { index: 1 }).unwrap();
    assert_eq!(second, Some(ClickOutcome::Zoomed { index: 1 }));
    assert_eq!(h.carousel.interaction(), Interaction::Zoomed { index: 1 });
    assert_eq!(h.carousel.zoom_view().unwrap().source, "/g/b.webp");
}

#[test]
fn test_autoplay_keeps_running_under_zoom() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();
    h.apply(&HarnessStep::Drag { index: 1 }).unwrap();
    h.apply(&HarnessStep::Click { index: 1 }).unwrap();

    h.timers.advance_ms(3000);

    h.assert_selected(2);
    assert_eq!(h.carousel.zoomed_index(), Some(1));
}

#[test]
fn test_dragging_before_dwell_cancels_advance() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();
    h.apply(&HarnessStep::Drag { index: 1 }).unwrap();
    let first = h.carousel.pending_advance().unwrap();
    h.timers.advance_ms(1500);

    h.apply(&HarnessStep::Drag { index: 2 }).unwrap();
    h.timers.advance_ms(1500);

    h.assert_selected(2);
    assert!(h.timers.cleared().contains(&first));
    assert!(!h.timers.fired().contains(&first));
}

// ============================================================================
// Quality
// ============================================================================

#[test]
fn test_slow_connection_fixed_for_session() {
    let network = MockNetwork::with_effective_type("2g");
    let mut h =
        CarouselHarness::mount_with(MediaCatalog::arena_reel(), CarouselConfig::default(), network)
            .unwrap();

    h.apply(&HarnessStep::Hint {
        effective_type: "4g".to_string(),
    })
    .unwrap();
    h.apply(&HarnessStep::Next).unwrap();

    assert!(!h.carousel.prefer_high_quality());
    assert_eq!(h.network.query_count(), 1);
    assert_eq!(
        h.video(0).unwrap().source().as_deref(),
        Some("/src/assets/reels/reel1_low.mp4")
    );
    assert_eq!(h.video(0).unwrap().source_changes(), 1);
}

#[test]
fn test_vendor_prefixed_hint() {
    let nav: NavigatorConnection =
        serde_json::from_str(r#"{"mozConnection":{"effectiveType":"3g"}}"#).unwrap();
    let carousel = MediaCarousel::builder(MediaCatalog::arena_reel())
        .timers(FakeTimers::new())
        .network(nav)
        .mount()
        .unwrap();
    assert_eq!(carousel.quality(), VideoQuality::Low);
}

#[test]
fn test_no_hint_means_high_quality() {
    let h = CarouselHarness::mount(MediaCatalog::arena_reel()).unwrap();
    assert!(h.carousel.prefer_high_quality());
    assert_eq!(
        h.video(1).unwrap().source().as_deref(),
        Some("/src/assets/reels/reel2_high.mp4")
    );
}

// ============================================================================
// Playback failures and teardown
// ============================================================================

#[test]
fn test_blocked_autoplay_is_silent() {
    let timers = FakeTimers::new();
    let blocked = MockVideo::new().blocking_autoplay();
    let carousel = MediaCarousel::builder(video_image_image())
        .timers(timers.clone())
        .video(0, blocked.clone())
        .mount()
        .unwrap();

    assert_eq!(carousel.selected_index(), 0);
    assert!(!blocked.is_playing());
    assert_eq!(blocked.play_count(), 1);
    assert_eq!(timers.pending_count(), 0);
    assert_eq!(carousel.interaction(), Interaction::Idle);
}

#[test]
fn test_unmount_during_pending_timer() {
    let mut h = CarouselHarness::mount(video_image_image()).unwrap();
    h.apply(&HarnessStep::Next).unwrap();
    assert_eq!(h.timers.pending_count(), 1);

    h.unmount();

    assert_eq!(h.timers.pending_count(), 0);
    assert_eq!(h.strip.listener_count(), 0);
    h.strip.scroll_next();
    h.timers.advance_ms(60_000);
    h.assert_selected(1);
    assert!(matches!(
        h.apply(&HarnessStep::Click { index: 1 }),
        Err(CarouselError::Unmounted)
    ));
}

// ============================================================================
// Re-entrant collaborators
// ============================================================================

#[test]
fn test_selection_raised_inside_play_waits_for_handler() {
    let strip = SnapStrip::new(3).unwrap();
    let timers = FakeTimers::new();
    let log: Log = Rc::default();
    let carousel = MediaCarousel::builder(video_image_image())
        .viewport(strip.clone())
        .timers(timers.clone())
        .video(
            0,
            ScrollingVideo {
                strip: strip.clone(),
                scrolled: false,
                log: Rc::clone(&log),
            },
        )
        .mount()
        .unwrap();

    assert_eq!(carousel.selected_index(), 1);
    assert!(carousel.pending_advance().is_some());
    assert_eq!(timers.pending_count(), 1);
    assert_eq!(timers.next_due_ms(), Some(3000));
    // The deferred selection pauses the video only after play() returned.
    assert_eq!(*log.borrow(), vec!["play", "scrolled", "pause", "rewind"]);
    assert_eq!(carousel.events_processed(), 2);
}

#[test]
fn test_host_strip_emitting_inside_scroll_to() {
    let log: Log = Rc::default();
    let timers = FakeTimers::new();
    let catalog = MediaCatalog::new(vec![
        MediaItem::image("/g/a.webp"),
        MediaItem::video("/r/b_low.mp4", "/r/b_high.mp4", "/r/b.webp"),
        MediaItem::image("/g/c.webp"),
    ])
    .unwrap();
    let carousel = MediaCarousel::builder(catalog)
        .viewport(LoggingStrip::new(3, Rc::clone(&log)))
        .timers(timers.clone())
        .video(1, LoggingVideo { log: Rc::clone(&log) })
        .mount()
        .unwrap();
    let first_advance = carousel.pending_advance().unwrap();
    assert_eq!(*log.borrow(), vec!["pause:1", "rewind:1"]);
    log.borrow_mut().clear();

    let outcome = carousel.click(1).unwrap();

    assert_eq!(outcome, ClickOutcome::Centered { index: 1 });
    assert_eq!(
        *log.borrow(),
        vec!["scroll_to:1", "scroll_to:1 done", "play:1"]
    );
    assert_eq!(carousel.selected_index(), 1);
    assert_eq!(carousel.interaction(), Interaction::Idle);
    assert!(carousel.pending_advance().is_none());
    assert_eq!(timers.cleared(), vec![first_advance]);

    log.borrow_mut().clear();
    carousel.click(2).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["scroll_to:2", "scroll_to:2 done", "pause:1", "rewind:1"]
    );
    assert_eq!(timers.pending_count(), 1);
}

#[test]
fn test_click_during_dispatch_reports_queued() {
    let strip = SnapStrip::new(3).unwrap();
    let handle = Rc::new(RefCell::new(Weak::new()));
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let carousel = Rc::new(
        MediaCarousel::builder(video_image_image())
            .viewport(strip.clone())
            .timers(FakeTimers::new())
            .video(
                0,
                ClickingVideo {
                    strip: strip.clone(),
                    carousel: Rc::clone(&handle),
                    outcomes: Rc::clone(&outcomes),
                },
            )
            .mount()
            .unwrap(),
    );
    strip.drag_to(2).unwrap();
    *handle.borrow_mut() = Rc::downgrade(&carousel);

    strip.drag_to(0).unwrap();

    // The scroll queued ahead of the click centers slide 1, so the click zooms.
    assert_eq!(*outcomes.borrow(), vec![ClickOutcome::Queued { index: 1 }]);
    assert_eq!(carousel.selected_index(), 1);
    assert_eq!(carousel.interaction(), Interaction::Zoomed { index: 1 });

    assert_eq!(carousel.click(2).unwrap(), ClickOutcome::Centered { index: 2 });
    assert_eq!(carousel.click(2).unwrap(), ClickOutcome::Zoomed { index: 2 });
}

#[test]
fn test_instances_are_independent() {
    let first = CarouselHarness::mount(video_image_image()).unwrap();
    let mut second = CarouselHarness::mount(video_image_image()).unwrap();

    second.apply(&HarnessStep::Drag { index: 2 }).unwrap();

    first.assert_selected(0);
    second.assert_selected(2);
    first.assert_playing_only(Some(0));
}

#[test]
fn test_unlooped_strip_stops_at_end() {
    let catalog =
        MediaCatalog::new(vec![MediaItem::image("/g/a.webp"), MediaItem::image("/g/b.webp")])
            .unwrap();
    let h = CarouselHarness::mount_with(
        catalog,
        CarouselConfig::new().with_loop(false),
        MockNetwork::unavailable(),
    )
    .unwrap();

    h.timers.advance_ms(3000);
    h.assert_selected(1);
    h.timers.advance_ms(3000);
    h.assert_selected(1);
    assert_eq!(h.timers.pending_count(), 0);
}

#[test]
fn test_single_image_advances_nowhere() {
    let catalog = MediaCatalog::new(vec![MediaItem::image("/g/only.webp")]).unwrap();
    let h = CarouselHarness::mount(catalog).unwrap();

    h.timers.advance_ms(3000);

    h.assert_selected(0);
    assert_eq!(h.timers.pending_count(), 0);
}

#[test]
fn test_host_strip_starting_off_zero() {
    let strip = SnapStrip::new(3).unwrap();
    strip.scroll_to(2).unwrap();
    let timers = FakeTimers::new();
    let carousel = MediaCarousel::builder(video_image_image())
        .viewport(strip.clone())
        .timers(timers.clone())
        .mount()
        .unwrap();

    assert_eq!(carousel.selected_index(), 2);
    assert!(carousel.pending_advance().is_some());
}

#[test]
fn test_gallery_config_mounts() {
    let yaml = r"
carousel:
  dwell_ms: 1000
catalog:
  - kind: image
    source: /g/a.webp
  - kind: video
    low_bitrate_source: /r/b_low.mp4
    high_bitrate_source: /r/b_high.mp4
    poster: /r/b.webp
";
    let config = GalleryConfig::from_yaml(yaml).unwrap();
    let h = CarouselHarness::mount_with(config.catalog, config.carousel, MockNetwork::unavailable())
        .unwrap();

    h.timers.advance_ms(1000);

    h.assert_selected(1);
    h.assert_playing_only(Some(1));
}
