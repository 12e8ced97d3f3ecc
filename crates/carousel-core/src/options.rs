//! Caller-facing carousel configuration.
//!
//! Track options are all optional and get merged over [`TRACK_DEFAULTS`] each time the
//! controller reads them. The defaults themselves are a constant and never change.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::components::ComponentOverrides;
use crate::formatters::{EnglishFormatters, Formatters};
use crate::styles::{Palette, StyleOverrides};

/// Easing curve the pager applies to view transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Which input devices may swipe between views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeMode {
    Enabled,
    Disabled,
    Mouse,
    Touch,
}

impl SwipeMode {
    /// Whether pointer (mouse / wheel) gestures may move the track
    pub fn allows_mouse(self) -> bool {
        matches!(self, SwipeMode::Enabled | SwipeMode::Mouse)
    }

    /// Whether touch gestures may move the track
    pub fn allows_touch(self) -> bool {
        matches!(self, SwipeMode::Enabled | SwipeMode::Touch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// How many views the pager keeps on screen at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewsToShow {
    /// Fit as many as the frame allows
    Auto,
    Count(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackAnimation {
    pub duration_ms: u64,
    pub easing: Easing,
}

/// Shared caller callback
pub struct Callback<A>(Arc<dyn Fn(A) + Send + Sync>);

impl<A> Callback<A> {
    pub fn new(f: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, arg: A) {
        (self.0)(arg)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Track options as supplied by the caller. `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    pub infinite: Option<bool>,
    /// Skip transition animations
    pub instant: Option<bool>,
    pub swipe: Option<SwipeMode>,
    /// Alignment of the current view inside the frame, 0.0 = start, 1.0 = end
    pub align: Option<f32>,
    pub axis: Option<Axis>,
    /// Keep the track from scrolling past its first/last view
    pub contain: Option<bool>,
    pub views_to_move: Option<usize>,
    pub views_to_show: Option<ViewsToShow>,
    pub swipe_threshold: Option<f32>,
    pub flick_timeout_ms: Option<u64>,
    pub animation: Option<TrackAnimation>,
    /// Called with the canonical index every time the pager settles on a new view
    pub on_view_change: Option<Callback<usize>>,
    /// Called by the pager when a transition comes to rest
    pub on_rest: Option<Callback<()>>,
}

impl TrackOptions {
    pub fn infinite(mut self, infinite: bool) -> Self {
        self.infinite = Some(infinite);
        self
    }

    pub fn on_view_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_view_change = Some(Callback::new(f));
        self
    }

    /// Merge over [`TRACK_DEFAULTS`]. `instant` defaults to on for non-touch hosts.
    pub fn resolve(&self, touch_capable: bool) -> ResolvedTrack {
        let d = &TRACK_DEFAULTS;
        ResolvedTrack {
            infinite: self.infinite.unwrap_or(d.infinite),
            instant: self.instant.unwrap_or(!touch_capable),
            swipe: self.swipe.unwrap_or(d.swipe),
            align: self.align.unwrap_or(d.align),
            axis: self.axis.unwrap_or(d.axis),
            contain: self.contain.unwrap_or(d.contain),
            views_to_move: self.views_to_move.unwrap_or(d.views_to_move).max(1),
            views_to_show: self.views_to_show.unwrap_or(d.views_to_show),
            swipe_threshold: self.swipe_threshold.unwrap_or(d.swipe_threshold),
            flick_timeout_ms: self.flick_timeout_ms.unwrap_or(d.flick_timeout_ms),
            animation: self.animation.unwrap_or(d.animation),
            on_view_change: self.on_view_change.clone(),
            on_rest: self.on_rest.clone(),
        }
    }
}

/// Fully populated track settings handed to the pager.
///
/// `align`, `swipe_threshold` and `flick_timeout_ms` are carried for pagers with drag
/// gestures and free alignment; pagers without them may ignore these fields.
#[derive(Debug, Clone)]
pub struct ResolvedTrack {
    pub infinite: bool,
    pub instant: bool,
    pub swipe: SwipeMode,
    pub align: f32,
    /// Direction views are laid out along
    pub axis: Axis,
    pub contain: bool,
    pub views_to_move: usize,
    pub views_to_show: ViewsToShow,
    pub swipe_threshold: f32,
    pub flick_timeout_ms: u64,
    pub animation: TrackAnimation,
    pub on_view_change: Option<Callback<usize>>,
    pub on_rest: Option<Callback<()>>,
}

/// Track defaults that do not depend on the host environment
#[derive(Debug, Clone, Copy)]
pub struct TrackDefaults {
    pub infinite: bool,
    pub swipe: SwipeMode,
    pub align: f32,
    pub axis: Axis,
    pub contain: bool,
    pub views_to_move: usize,
    pub views_to_show: ViewsToShow,
    pub swipe_threshold: f32,
    pub flick_timeout_ms: u64,
    pub animation: TrackAnimation,
}

pub const TRACK_DEFAULTS: TrackDefaults = TrackDefaults {
    infinite: false,
    swipe: SwipeMode::Touch,
    align: 0.0,
    axis: Axis::X,
    contain: false,
    views_to_move: 1,
    views_to_show: ViewsToShow::Count(1),
    swipe_threshold: 0.5,
    flick_timeout_ms: 300,
    animation: TrackAnimation {
        duration_ms: 250,
        easing: Easing::Cubic,
    },
};

/// Controller-level defaults
#[derive(Debug, Clone, Copy)]
pub struct CarouselDefaults {
    pub current_index: usize,
    pub hide_controls_when_idle: bool,
    pub track: TrackDefaults,
}

pub const DEFAULTS: CarouselDefaults = CarouselDefaults {
    current_index: 0,
    hide_controls_when_idle: true,
    track: TRACK_DEFAULTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSize {
    #[default]
    Off,
    Both,
    Width,
    Height,
}

/// Options for the frame that hosts the track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOptions {
    /// Frame accepts keyboard navigation while focused
    pub accessibility: bool,
    /// Size the frame to its content. Hosts with a fixed frame ignore it.
    pub auto_size: AutoSize,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            accessibility: true,
            auto_size: AutoSize::Off,
        }
    }
}

/// Present when the carousel is hosted inside a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalContext {
    pub is_fullscreen: bool,
    pub allow_fullscreen: bool,
}

/// Everything a caller can configure on a carousel
pub struct CarouselConfig<V, C> {
    /// Controlled index. Changing it between updates jumps without notifying.
    pub current_index: usize,
    pub views: Option<Arc<[V]>>,
    pub components: Option<Arc<ComponentOverrides<C>>>,
    pub frame_options: FrameOptions,
    pub track_options: TrackOptions,
    pub formatters: Arc<dyn Formatters>,
    pub hide_controls_when_idle: bool,
    pub modal_context: Option<ModalContext>,
    pub style_overrides: StyleOverrides,
    pub palette: Palette,
}

impl<V, C> Default for CarouselConfig<V, C> {
    fn default() -> Self {
        Self {
            current_index: DEFAULTS.current_index,
            views: None,
            components: None,
            frame_options: FrameOptions::default(),
            track_options: TrackOptions::default(),
            formatters: Arc::new(EnglishFormatters),
            hide_controls_when_idle: DEFAULTS.hide_controls_when_idle,
            modal_context: None,
            style_overrides: StyleOverrides::default(),
            palette: Palette::default(),
        }
    }
}

impl<V, C> Clone for CarouselConfig<V, C> {
    fn clone(&self) -> Self {
        Self {
            current_index: self.current_index,
            views: self.views.clone(),
            components: self.components.clone(),
            frame_options: self.frame_options.clone(),
            track_options: self.track_options.clone(),
            formatters: Arc::clone(&self.formatters),
            hide_controls_when_idle: self.hide_controls_when_idle,
            modal_context: self.modal_context,
            style_overrides: self.style_overrides.clone(),
            palette: self.palette.clone(),
        }
    }
}

impl<V, C> fmt::Debug for CarouselConfig<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselConfig")
            .field("current_index", &self.current_index)
            .field("views", &self.view_count())
            .field("components", &self.components.is_some())
            .field("frame_options", &self.frame_options)
            .field("track_options", &self.track_options)
            .field("formatters", &self.formatters)
            .field("hide_controls_when_idle", &self.hide_controls_when_idle)
            .field("modal_context", &self.modal_context)
            .field("style_overrides", &self.style_overrides)
            .finish()
    }
}

impl<V, C> CarouselConfig<V, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_views(mut self, views: impl Into<Arc<[V]>>) -> Self {
        self.views = Some(views.into());
        self
    }

    pub fn with_current_index(mut self, index: usize) -> Self {
        self.current_index = index;
        self
    }

    pub fn with_components(mut self, overrides: Arc<ComponentOverrides<C>>) -> Self {
        self.components = Some(overrides);
        self
    }

    pub fn with_track_options(mut self, track: TrackOptions) -> Self {
        self.track_options = track;
        self
    }

    pub fn with_frame_options(mut self, frame: FrameOptions) -> Self {
        self.frame_options = frame;
        self
    }

    pub fn with_formatters(mut self, formatters: Arc<dyn Formatters>) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn hide_controls_when_idle(mut self, hide: bool) -> Self {
        self.hide_controls_when_idle = hide;
        self
    }

    pub fn with_modal(mut self, modal: ModalContext) -> Self {
        self.modal_context = Some(modal);
        self
    }

    pub fn with_style_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.style_overrides = overrides;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Views as a slice, empty when none were supplied
    pub fn views(&self) -> &[V] {
        self.views.as_deref().unwrap_or(&[])
    }

    pub fn view_count(&self) -> usize {
        self.views().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_defaults_non_touch() {
        let track = TrackOptions::default().resolve(false);
        assert!(!track.infinite);
        assert!(track.instant);
        assert_eq!(track.swipe, SwipeMode::Touch);
        assert_eq!(track.views_to_move, 1);
        assert_eq!(track.animation.easing, Easing::Cubic);
    }

    #[test]
    fn test_track_defaults_touch_animates() {
        let track = TrackOptions::default().resolve(true);
        assert!(!track.instant);
    }

    #[test]
    fn test_caller_options_win_over_defaults() {
        let options = TrackOptions {
            instant: Some(false),
            swipe: Some(SwipeMode::Mouse),
            views_to_move: Some(0),
            ..Default::default()
        }
        .infinite(true);
        let track = options.resolve(false);
        assert!(track.infinite);
        assert!(!track.instant);
        assert_eq!(track.swipe, SwipeMode::Mouse);
        // zero would stall the track
        assert_eq!(track.views_to_move, 1);
        // constant untouched by the merge
        assert!(!TRACK_DEFAULTS.infinite);
    }

    #[test]
    fn test_config_defaults() {
        let config: CarouselConfig<&str, ()> = CarouselConfig::default();
        assert_eq!(config.current_index, 0);
        assert!(config.hide_controls_when_idle);
        assert!(config.views().is_empty());
        assert!(config.modal_context.is_none());
    }

    #[test]
    fn test_swipe_modes() {
        assert!(SwipeMode::Enabled.allows_mouse());
        assert!(SwipeMode::Mouse.allows_mouse());
        assert!(!SwipeMode::Touch.allows_mouse());
        assert!(SwipeMode::Touch.allows_touch());
        assert!(!SwipeMode::Disabled.allows_touch());
    }
}
