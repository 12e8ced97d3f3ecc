//! Collaborators the controller drives but does not implement.

use std::time::Instant;

use crate::options::ResolvedTrack;

/// Identifies a focusable surface in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(pub u32);

/// The paging engine.
///
/// The pager owns transitions: it moves on `prev`/`next`, and reports the indices it
/// settled on through `poll`. `sync_index` is the controlled-index input and must not
/// produce a notification.
pub trait Pager {
    fn prev(&mut self);

    fn next(&mut self);

    /// Show `index` without animating or notifying
    fn sync_index(&mut self, index: usize);

    fn configure(&mut self, track: &ResolvedTrack, view_count: usize);

    /// Advance transitions and return the settled indices, if a transition finished.
    /// Multi-view layouts report every visible index, first one canonical.
    fn poll(&mut self, now: Instant) -> Option<Vec<usize>>;

    /// Track position in views, fractional while a transition is running
    fn position(&self) -> f64;

    fn focus_surface(&self) -> FocusId;
}

/// Signals from the host environment
pub trait Environment {
    fn is_touch_capable(&self) -> bool;

    /// Whether a container exists to attach activity listeners to
    fn has_container(&self) -> bool;

    fn focused(&self) -> Option<FocusId>;

    fn focus(&mut self, target: FocusId);
}
