//! Terminal paging track
//!
//! Moves between views with an eased transition, then reports the views it settled on.
//! `position` is measured in views and may leave `0..view_count` while an infinite
//! track wraps; the renderer reduces it modulo the view count.

use std::time::{Duration, Instant};

use carousel_core::options::{Callback, TrackAnimation};
use carousel_core::{Easing, FocusId, Pager, ResolvedTrack, ViewsToShow};
use tracing::debug;

use super::easing::EasingExt;
use super::timing::{is_complete, lerp, progress};

/// Focus surface of the view frame
pub const FRAME_FOCUS: FocusId = FocusId(1);

/// Active view transition
#[derive(Debug, Clone)]
struct Transition {
    /// Set on the first poll after the move was requested
    start: Option<Instant>,
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
}

#[derive(Debug)]
pub struct TrackPager {
    view_count: usize,
    /// Index the track is at, or heading to while a transition runs
    index: usize,
    position: f64,
    transition: Option<Transition>,
    pending_settle: bool,
    infinite: bool,
    instant: bool,
    contain: bool,
    views_to_move: usize,
    views_to_show: usize,
    animation: TrackAnimation,
    on_rest: Option<Callback<()>>,
}

impl Default for TrackPager {
    fn default() -> Self {
        Self {
            view_count: 0,
            index: 0,
            position: 0.0,
            transition: None,
            pending_settle: false,
            infinite: false,
            instant: true,
            contain: false,
            views_to_move: 1,
            views_to_show: 1,
            animation: TrackAnimation {
                duration_ms: 0,
                easing: Easing::None,
            },
            on_rest: None,
        }
    }
}

impl TrackPager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether the host should poll at animation frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.transition.is_some() || self.pending_settle
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of views on screen at once
    pub fn visible_count(&self) -> usize {
        self.views_to_show.min(self.view_count).max(1)
    }

    /// Indices on screen once the track rests, first one canonical
    pub fn visible_indices(&self) -> Vec<usize> {
        let n = self.view_count;
        if n == 0 {
            return Vec::new();
        }
        (0..self.visible_count())
            .filter_map(|offset| {
                let i = self.index + offset;
                if self.infinite {
                    Some(i % n)
                } else {
                    (i < n).then_some(i)
                }
            })
            .collect()
    }

    /// Last index a finite track may start at
    fn last_start(&self) -> usize {
        if self.contain {
            self.view_count.saturating_sub(self.visible_count())
        } else {
            self.view_count.saturating_sub(1)
        }
    }

    fn step(&mut self, delta: isize) {
        let n = self.view_count;
        if n == 0 {
            return;
        }

        let (index, to) = if self.infinite {
            let base = self
                .transition
                .as_ref()
                .map(|t| t.to)
                .unwrap_or(self.index as f64);
            let index = (self.index as isize + delta).rem_euclid(n as isize) as usize;
            (index, base + delta as f64)
        } else {
            let index = (self.index as isize + delta).clamp(0, self.last_start() as isize) as usize;
            (index, index as f64)
        };

        if !self.infinite && index == self.index {
            return;
        }

        debug!(from = self.index, to = index, "Track move");
        self.index = index;

        if self.instant || self.animation.duration_ms == 0 {
            self.transition = None;
            self.position = index as f64;
            self.pending_settle = true;
            return;
        }

        self.transition = Some(Transition {
            start: None,
            from: self.position,
            to,
            duration: Duration::from_millis(self.animation.duration_ms),
            easing: self.animation.easing,
        });
    }
}

impl Pager for TrackPager {
    fn prev(&mut self) {
        self.step(-(self.views_to_move as isize));
    }

    fn next(&mut self) {
        self.step(self.views_to_move as isize);
    }

    fn sync_index(&mut self, index: usize) {
        self.transition = None;
        self.pending_settle = false;
        self.index = index;
        self.position = index as f64;
    }

    fn configure(&mut self, track: &ResolvedTrack, view_count: usize) {
        self.infinite = track.infinite;
        self.instant = track.instant;
        self.contain = track.contain;
        self.views_to_move = track.views_to_move.max(1);
        // Terminal views size to the frame, so auto fits one
        self.views_to_show = match track.views_to_show {
            ViewsToShow::Auto => 1,
            ViewsToShow::Count(count) => count.max(1),
        };
        self.animation = track.animation;
        self.on_rest = track.on_rest.clone();
        self.view_count = view_count;

        // The controller learns about the clamp through the next settle
        if view_count > 0 && self.index >= view_count {
            debug!(from = self.index, to = view_count - 1, "Track clamped to shrunk collection");
            self.sync_index(view_count - 1);
            self.pending_settle = true;
        }
    }

    fn poll(&mut self, now: Instant) -> Option<Vec<usize>> {
        let mut finished = false;
        if let Some(transition) = self.transition.as_mut() {
            let start = *transition.start.get_or_insert(now);
            if is_complete(start, now, transition.duration) {
                finished = true;
            } else {
                let t = transition.easing.apply(progress(start, now, transition.duration));
                self.position = lerp(transition.from, transition.to, t);
            }
        }
        if finished {
            self.transition = None;
            self.position = self.index as f64;
            self.pending_settle = true;
        }

        if !self.pending_settle {
            return None;
        }
        self.pending_settle = false;

        if let Some(ref on_rest) = self.on_rest {
            on_rest.call(());
        }
        Some(self.visible_indices())
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn focus_surface(&self) -> FocusId {
        FRAME_FOCUS
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use carousel_core::TrackOptions;

    use super::*;

    fn animated(duration_ms: u64) -> TrackOptions {
        TrackOptions {
            instant: Some(false),
            animation: Some(TrackAnimation {
                duration_ms,
                easing: Easing::Linear,
            }),
            ..Default::default()
        }
    }

    fn pager(options: TrackOptions, count: usize) -> TrackPager {
        let mut pager = TrackPager::new();
        pager.configure(&options.resolve(false), count);
        pager
    }

    #[test]
    fn test_instant_move_settles_on_next_poll() {
        let mut pager = pager(TrackOptions::default(), 3);
        let now = Instant::now();

        pager.next();
        assert_eq!(pager.position(), 1.0);
        assert_eq!(pager.poll(now), Some(vec![1]));
        assert_eq!(pager.poll(now), None);
    }

    #[test]
    fn test_finite_track_stops_at_ends() {
        let mut pager = pager(TrackOptions::default(), 3);
        let now = Instant::now();

        pager.prev();
        assert_eq!(pager.poll(now), None);

        pager.sync_index(2);
        pager.next();
        assert_eq!(pager.index(), 2);
        assert_eq!(pager.poll(now), None);
    }

    #[test]
    fn test_infinite_track_wraps() {
        let mut pager = pager(TrackOptions::default().infinite(true), 3);
        let now = Instant::now();

        pager.prev();
        assert_eq!(pager.poll(now), Some(vec![2]));
        pager.next();
        assert_eq!(pager.poll(now), Some(vec![0]));
    }

    #[test]
    fn test_animated_transition_interpolates_then_settles() {
        let mut pager = pager(animated(100), 3);
        let start = Instant::now();

        pager.next();
        assert!(pager.is_animating());
        assert_eq!(pager.poll(start), None);
        assert_eq!(pager.position(), 0.0);

        assert_eq!(pager.poll(start + Duration::from_millis(50)), None);
        assert!((pager.position() - 0.5).abs() < 0.001);

        assert_eq!(pager.poll(start + Duration::from_millis(100)), Some(vec![1]));
        assert_eq!(pager.position(), 1.0);
        assert!(!pager.needs_update());
    }

    #[test]
    fn test_animated_wrap_runs_past_the_end() {
        let mut pager = pager(animated(100).infinite(true), 3);
        let start = Instant::now();

        pager.prev();
        pager.poll(start);
        pager.poll(start + Duration::from_millis(50));
        assert!((pager.position() + 0.5).abs() < 0.001);

        assert_eq!(pager.poll(start + Duration::from_millis(100)), Some(vec![2]));
        assert_eq!(pager.position(), 2.0);
    }

    #[test]
    fn test_sync_index_is_silent() {
        let mut pager = pager(animated(100), 4);
        pager.next();
        pager.sync_index(3);

        assert!(!pager.is_animating());
        assert_eq!(pager.position(), 3.0);
        assert_eq!(pager.poll(Instant::now()), None);
    }

    #[test]
    fn test_multi_view_reports_every_visible_index() {
        let options = TrackOptions {
            views_to_show: Some(ViewsToShow::Count(2)),
            ..TrackOptions::default().infinite(true)
        };
        let mut pager = pager(options, 3);

        pager.next();
        pager.next();
        assert_eq!(pager.poll(Instant::now()), Some(vec![2, 0]));
    }

    #[test]
    fn test_contain_keeps_last_page_full() {
        let options = TrackOptions {
            views_to_show: Some(ViewsToShow::Count(2)),
            contain: Some(true),
            ..Default::default()
        };
        let mut pager = pager(options, 3);

        pager.next();
        pager.next();
        assert_eq!(pager.index(), 1);
        assert_eq!(pager.poll(Instant::now()), Some(vec![1, 2]));
    }

    #[test]
    fn test_on_rest_called_per_settle() {
        let rests = Arc::new(AtomicUsize::new(0));
        let counter = rests.clone();
        let options = TrackOptions {
            on_rest: Some(Callback::new(move |()| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        };
        let mut pager = pager(options, 3);

        pager.next();
        pager.poll(Instant::now());
        pager.poll(Instant::now());
        assert_eq!(rests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_track_ignores_moves() {
        let mut pager = pager(TrackOptions::default().infinite(true), 0);
        pager.next();
        pager.prev();
        assert_eq!(pager.poll(Instant::now()), None);
    }

    #[test]
    fn test_shrinking_collection_clamps_index() {
        let mut pager = pager(TrackOptions::default(), 5);
        pager.sync_index(4);
        pager.configure(&TrackOptions::default().resolve(false), 2);
        assert_eq!(pager.index(), 1);
        assert_eq!(pager.poll(Instant::now()), Some(vec![1]));
        assert_eq!(pager.poll(Instant::now()), None);
    }
}
