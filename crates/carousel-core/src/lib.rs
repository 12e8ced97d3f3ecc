pub mod components;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod host;
pub mod idle;
pub mod options;
pub mod slide;
pub mod styles;

#[cfg(test)]
mod testing;

pub use components::{ComponentOverrides, ComponentRegistry, ComponentSet, SlotKey};
pub use config::AppConfig;
pub use context::CommonContext;
pub use controller::{Carousel, Direction, Region, RenderPlan};
pub use error::{Error, Result};
pub use formatters::{EnglishFormatters, FormatContext, Formatters};
pub use host::{Environment, FocusId, Pager};
pub use idle::{ActivityKind, IdleState, IDLE_TIMEOUT};
pub use options::{
    CarouselConfig, Easing, ModalContext, ResolvedTrack, SwipeMode, TrackOptions, ViewsToShow,
};
pub use slide::{load_manifest, Slide, ViewSource};
pub use styles::{Palette, SlotStyle, StyleOverrides, StyleProps};
