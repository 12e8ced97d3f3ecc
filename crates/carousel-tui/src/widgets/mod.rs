//! Default renderers for the carousel slots

mod chrome;
mod navigation;
mod view;

use std::fmt;
use std::sync::Arc;

use carousel_core::{CommonContext, ComponentSet, Direction, Slide, SlotKey};
use ratatui::{layout::Rect, Frame};

use crate::images::ImageState;

pub use chrome::{
    ContainerWidget, FooterCaptionWidget, FooterCountWidget, FooterWidget, HeaderButtonWidget,
    HeaderWidget,
};
pub use navigation::{NavButtonWidget, NavigationWidget};
pub use view::ViewWidget;

/// Component type of the terminal carousel
pub type SharedSlot = Arc<dyn SlotWidget>;

/// Render context shared by every slot
pub type SlotContext<'a> = CommonContext<'a, Slide, SharedSlot>;

/// Slot-specific inputs on top of the shared context
#[derive(Debug, Clone, Copy)]
pub enum SlotProps<'a> {
    Container,
    Header {
        slide: Option<&'a Slide>,
    },
    HeaderButton {
        key: SlotKey,
        label: &'a str,
    },
    Footer,
    Caption {
        text: Option<&'a str>,
    },
    Count {
        current: usize,
        total: usize,
    },
    Navigation,
    NavButton {
        direction: Direction,
        label: &'a str,
        title: &'a str,
    },
    View {
        index: usize,
        slide: &'a Slide,
        image: Option<&'a ImageState>,
    },
}

/// A renderer for one carousel slot
pub trait SlotWidget: fmt::Debug + Send + Sync {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>);
}

/// The renderers used when the caller does not override a slot
pub fn default_components() -> ComponentSet<SharedSlot> {
    ComponentSet::<SharedSlot>::new()
        .with(SlotKey::Container, Arc::new(ContainerWidget))
        .with(SlotKey::Header, Arc::new(HeaderWidget))
        .with(SlotKey::HeaderClose, Arc::new(HeaderButtonWidget))
        .with(SlotKey::HeaderFullscreen, Arc::new(HeaderButtonWidget))
        .with(SlotKey::Footer, Arc::new(FooterWidget))
        .with(SlotKey::FooterCaption, Arc::new(FooterCaptionWidget))
        .with(SlotKey::FooterCount, Arc::new(FooterCountWidget))
        .with(SlotKey::Navigation, Arc::new(NavigationWidget))
        .with(SlotKey::NavigationPrev, Arc::new(NavButtonWidget))
        .with(SlotKey::NavigationNext, Arc::new(NavButtonWidget))
        .with(SlotKey::View, Arc::new(ViewWidget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_components_cover_every_slot() {
        let set = default_components();
        for key in SlotKey::ALL {
            assert!(set.contains(key), "missing default for {}", key.as_str());
        }
    }
}
