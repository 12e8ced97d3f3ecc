use std::path::Path;
use std::time::Instant;

use carousel_core::{ActivityKind, Carousel, CarouselConfig, Direction, Region, Slide, ViewSource};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::ImageLoadResult;
use crate::host::TerminalEnv;
use crate::images::{spawn_load, ImageCache};
use crate::keymap::Keymap;
use crate::track::TrackPager;
use crate::ui::{self, Regions, TerminalCarousel};
use crate::widgets::{default_components, SharedSlot};

/// Views beyond the visible ones whose images are fetched ahead of time
const PRELOAD_NEIGHBORS: usize = 1;

/// Application state
pub struct App {
    pub carousel: TerminalCarousel,
    /// Caller-side configuration, holds the controlled index
    config: CarouselConfig<Slide, SharedSlot>,
    pub images: ImageCache,
    image_tx: mpsc::UnboundedSender<ImageLoadResult>,
    pub keymap: Keymap,
    /// Regions drawn in the last frame, for mouse hit-testing
    pub regions: Regions,
    touch: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Input arrived since the last tick
    input_pending: bool,
}

impl App {
    pub fn new(
        config: CarouselConfig<Slide, SharedSlot>,
        touch: bool,
        keymap: Keymap,
        cache_dir: Option<&Path>,
        image_tx: mpsc::UnboundedSender<ImageLoadResult>,
    ) -> Self {
        let carousel = Carousel::new(
            config.clone(),
            Box::new(TrackPager::new()),
            Box::new(TerminalEnv::new(touch)),
            default_components(),
        );
        Self {
            carousel,
            config,
            images: ImageCache::new(cache_dir),
            image_tx,
            keymap,
            regions: Regions::default(),
            touch,
            should_quit: false,
            status_message: None,
            pending_key: None,
            input_pending: false,
        }
    }

    /// Attach the carousel and start loading the first images
    pub fn mount(&mut self) {
        self.carousel.mount();
        self.request_images();
    }

    pub fn teardown(&mut self) {
        self.carousel.teardown();
    }

    /// Advance the carousel one loop iteration
    pub fn tick(&mut self, now: Instant) {
        self.input_pending = false;
        self.carousel.tick(now);
        self.sync_controlled_index();
        self.request_images();
    }

    /// Whether the loop should run at animation frame rate
    pub fn needs_fast_tick(&self) -> bool {
        let settled = self.carousel.current_index() as f64;
        self.input_pending || (self.carousel.pager().position() - settled).abs() > f64::EPSILON
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.regions = ui::draw(frame, &self.carousel, &self.images);
        if let Some(ref message) = self.status_message {
            ui::draw_status(frame, &self.carousel, message);
        }
    }

    pub fn apply_image(&mut self, result: ImageLoadResult) {
        self.images.apply(result);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    /// Any key press counts as activity for the idle detector
    pub fn record_key_activity(&mut self) {
        self.input_pending = true;
        self.carousel.record_activity(ActivityKind::PressStart);
    }

    /// Whether key bindings may page the track
    pub fn accepts_keyboard_navigation(&self) -> bool {
        self.config.frame_options.accessibility
    }

    pub fn go(&mut self, direction: Direction) {
        if self.carousel.can_go(direction) {
            self.carousel.go(direction);
        }
    }

    pub fn jump_to_first(&mut self) {
        self.set_controlled_index(0);
    }

    pub fn jump_to_last(&mut self) {
        let count = self.carousel.view_count();
        if count > 0 {
            self.set_controlled_index(count - 1);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        let Some(ref mut modal) = self.config.modal_context else {
            return;
        };
        if !modal.allow_fullscreen {
            return;
        }
        modal.is_fullscreen = !modal.is_fullscreen;
        debug!(fullscreen = modal.is_fullscreen, "Fullscreen toggled");
        self.carousel.update_config(self.config.clone());
    }

    pub fn is_fullscreen(&self) -> bool {
        self.config.modal_context.is_some_and(|m| m.is_fullscreen)
    }

    /// Open the current slide's source in the system viewer
    pub fn open_external(&mut self) {
        let Some(slide) = self.carousel.current_view() else {
            return;
        };
        let target = match &slide.source {
            ViewSource::Path(path) => path.display().to_string(),
            ViewSource::Url(url) => url.to_string(),
        };
        if let Err(e) = open::that(&target) {
            warn!("Failed to open {}: {}", target, e);
            self.set_status(format!("Failed to open {}: {}", target, e));
        } else {
            self.set_status(format!("Opening: {}", target));
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.input_pending = true;
        let swipe = self.carousel.track().swipe;

        match mouse.kind {
            MouseEventKind::Moved => {
                self.carousel.record_activity(ActivityKind::PointerMove);
            }
            MouseEventKind::Drag(_) => {
                let kind = if self.touch {
                    ActivityKind::TouchMove
                } else {
                    ActivityKind::PointerMove
                };
                self.carousel.record_activity(kind);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.carousel.record_activity(ActivityKind::PressStart);
                self.click(mouse.column, mouse.row);
            }
            MouseEventKind::Down(_) => {
                self.carousel.record_activity(ActivityKind::PressStart);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if swipe.allows_mouse() => {
                self.carousel.record_activity(ActivityKind::PointerMove);
                self.go(Direction::Previous);
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if swipe.allows_mouse() => {
                self.carousel.record_activity(ActivityKind::PointerMove);
                self.go(Direction::Next);
            }
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(region) = self.regions.hit(column, row) else {
            return;
        };
        debug!(?region, column, row, "Click");
        match region {
            Region::NavigationPrev => self.go(Direction::Previous),
            Region::NavigationNext => self.go(Direction::Next),
            Region::HeaderClose => self.should_quit = true,
            Region::HeaderFullscreen => self.toggle_fullscreen(),
            _ => {}
        }
    }

    /// Push an index through the controlled-index path
    fn set_controlled_index(&mut self, index: usize) {
        self.config.current_index = index;
        self.carousel.update_config(self.config.clone());
    }

    /// Adopt the index the pager settled on, so later jumps compare against it
    fn sync_controlled_index(&mut self) {
        let current = self.carousel.current_index();
        if current != self.config.current_index {
            self.set_controlled_index(current);
        }
    }

    /// Indices whose images should be in memory
    fn wanted_indices(&self) -> Vec<usize> {
        let count = self.carousel.view_count();
        if count == 0 {
            return Vec::new();
        }
        let infinite = self.carousel.track().infinite;
        let visible = self.carousel.visible_indices();
        let first = visible.first().copied().unwrap_or(0) as isize;
        let last = first + visible.len().max(1) as isize - 1;
        let reach = PRELOAD_NEIGHBORS as isize;

        let mut wanted = Vec::new();
        for i in (first - reach)..=(last + reach) {
            let index = if infinite {
                i.rem_euclid(count as isize) as usize
            } else if (0..count as isize).contains(&i) {
                i as usize
            } else {
                continue;
            };
            if !wanted.contains(&index) {
                wanted.push(index);
            }
        }
        wanted
    }

    fn request_images(&mut self) {
        for index in self.wanted_indices() {
            let Some(slide) = self.config.views().get(index) else {
                continue;
            };
            let source = &slide.source;
            if self.images.is_known(source) || self.images.try_load_from_disk(source) {
                continue;
            }
            if self.images.start_loading(source) {
                debug!(%source, index, "Loading image");
                spawn_load(source.clone(), self.image_tx.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use carousel_core::options::FrameOptions;
    use carousel_core::{ModalContext, SwipeMode, TrackOptions, ViewsToShow};
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    use super::*;
    use crate::images::ImageState;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide::new(ViewSource::parse(&format!("/nonexistent/{}.png", i)).unwrap()))
            .collect()
    }

    fn app_with(track: TrackOptions, n: usize) -> (App, mpsc::UnboundedReceiver<ImageLoadResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = CarouselConfig::new()
            .with_views(slides(n))
            .with_track_options(track)
            .with_modal(ModalContext {
                is_fullscreen: false,
                allow_fullscreen: true,
            });
        let mut app = App::new(config, false, Keymap::default(), None, tx);
        app.mount();
        (app, rx)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_next_then_tick_updates_index() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 3);

        app.go(Direction::Next);
        app.tick(Instant::now());
        assert_eq!(app.carousel.current_index(), 1);
        assert_eq!(app.config.current_index, 1);
    }

    #[tokio::test]
    async fn test_jumps_use_controlled_index() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 4);

        app.go(Direction::Next);
        app.tick(Instant::now());
        app.jump_to_last();
        assert_eq!(app.carousel.current_index(), 3);
        app.jump_to_first();
        assert_eq!(app.carousel.current_index(), 0);
        assert_eq!(app.carousel.pager().position(), 0.0);
    }

    #[tokio::test]
    async fn test_first_after_pager_move_still_jumps() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 4);

        // Controlled index starts at 0; the pager moves to 2
        app.go(Direction::Next);
        app.tick(Instant::now());
        app.go(Direction::Next);
        app.tick(Instant::now());
        assert_eq!(app.carousel.current_index(), 2);

        app.jump_to_first();
        assert_eq!(app.carousel.current_index(), 0);
    }

    #[tokio::test]
    async fn test_toggle_fullscreen() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 2);
        assert!(!app.is_fullscreen());
        app.toggle_fullscreen();
        assert!(app.is_fullscreen());
        assert!(app.carousel.common_context().is_fullscreen);
    }

    #[tokio::test]
    async fn test_click_on_navigation_region() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 3);
        app.regions.insert(Region::NavigationNext, Rect::new(50, 5, 5, 3));
        app.regions.insert(Region::HeaderClose, Rect::new(40, 0, 10, 1));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 52, 6));
        app.tick(Instant::now());
        assert_eq!(app.carousel.current_index(), 1);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 45, 0));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_wheel_respects_swipe_mode() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 3);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0));
        app.tick(Instant::now());
        assert_eq!(app.carousel.current_index(), 0);

        let track = TrackOptions {
            swipe: Some(SwipeMode::Mouse),
            ..Default::default()
        };
        let (mut app, _rx) = app_with(track, 3);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0));
        app.tick(Instant::now());
        assert_eq!(app.carousel.current_index(), 1);
    }

    #[tokio::test]
    async fn test_animated_move_needs_fast_ticks() {
        let track = TrackOptions {
            instant: Some(false),
            ..Default::default()
        };
        let (mut app, _rx) = app_with(track, 3);
        let start = Instant::now();
        app.tick(start);
        assert!(!app.needs_fast_tick());

        app.go(Direction::Next);
        app.tick(start);
        app.tick(start + Duration::from_millis(100));
        assert!(app.needs_fast_tick());

        app.tick(start + Duration::from_secs(1));
        assert_eq!(app.carousel.current_index(), 1);
        assert!(!app.needs_fast_tick());
    }

    #[tokio::test]
    async fn test_images_requested_for_neighbors() {
        let (app, mut rx) = app_with(TrackOptions::default(), 5);
        let wanted = app.wanted_indices();
        assert_eq!(wanted, vec![0, 1]);

        for index in &wanted {
            let source = &app.config.views()[*index].source;
            assert!(app.images.is_known(source));
        }
        let untouched = &app.config.views()[3].source;
        assert!(!app.images.is_known(untouched));

        // Missing files come back as failures
        let mut app = app;
        let result = rx.recv().await.unwrap();
        app.apply_image(result);
        let failed = app
            .config
            .views()
            .iter()
            .filter(|s| matches!(app.images.state(&s.source), Some(ImageState::Failed(_))))
            .count();
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_infinite_preload_wraps() {
        let (app, _rx) = app_with(TrackOptions::default().infinite(true), 5);
        assert_eq!(app.wanted_indices(), vec![4, 0, 1]);
    }

    #[tokio::test]
    async fn test_multi_view_settle_survives_index_sync() {
        let track = TrackOptions {
            views_to_show: Some(ViewsToShow::Count(2)),
            ..Default::default()
        };
        let (mut app, _rx) = app_with(track, 5);

        app.go(Direction::Next);
        app.tick(Instant::now());

        assert_eq!(app.carousel.current_index(), 1);
        assert_eq!(app.config.current_index, 1);
        assert_eq!(app.carousel.visible_indices(), &[1, 2]);
        assert_eq!(app.wanted_indices(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_shrinking_slides_moves_back_in_range() {
        let (mut app, _rx) = app_with(TrackOptions::default(), 5);
        app.jump_to_last();
        assert_eq!(app.carousel.current_index(), 4);

        app.config = app.config.clone().with_views(slides(2));
        app.carousel.update_config(app.config.clone());
        app.tick(Instant::now());

        assert_eq!(app.carousel.current_index(), 1);
        assert_eq!(app.config.current_index, 1);
        assert!(app.carousel.current_view().is_some());
        assert!(app.carousel.can_go(Direction::Previous));
        assert!(!app.carousel.can_go(Direction::Next));
    }

    #[tokio::test]
    async fn test_keyboard_navigation_follows_frame_options() {
        let (app, _rx) = app_with(TrackOptions::default(), 3);
        assert!(app.accepts_keyboard_navigation());

        let (tx, _rx) = mpsc::unbounded_channel();
        let config = CarouselConfig::new()
            .with_views(slides(3))
            .with_frame_options(FrameOptions {
                accessibility: false,
                ..Default::default()
            });
        let app = App::new(config, false, Keymap::default(), None, tx);
        assert!(!app.accepts_keyboard_navigation());
    }
}
