//! Animated paging track for the terminal host
//!
//! # Layout
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers, time passed in explicitly
//! - `pager` - [`TrackPager`], the `Pager` the controller drives
//!
//! # Usage
//!
//! ```ignore
//! use carousel_tui::track::TrackPager;
//!
//! let mut pager = TrackPager::new();
//! pager.configure(&track, views.len());
//! pager.next();
//!
//! // In the main loop, poll each frame; a settle yields the visible indices
//! if let Some(indices) = pager.poll(Instant::now()) { /* ... */ }
//! ```

pub mod easing;
pub mod pager;
pub mod timing;

pub use easing::EasingExt;
pub use pager::{TrackPager, FRAME_FOCUS};
