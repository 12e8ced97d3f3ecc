use crate::components::SlotKey;
use crate::formatters::{FormatContext, Formatters};
use crate::options::{CarouselConfig, FrameOptions, ModalContext, ResolvedTrack};
use crate::styles::{Align, SlotStyle, StyleProps, StyleResolver};

/// Read-only snapshot shared by every slot during one render pass
pub struct CommonContext<'a, V, C> {
    pub config: &'a CarouselConfig<V, C>,
    pub current_index: usize,
    pub current_view: Option<&'a V>,
    pub views: &'a [V],
    pub frame_options: &'a FrameOptions,
    pub track: &'a ResolvedTrack,
    pub is_modal: bool,
    pub is_fullscreen: bool,
    pub modal_context: Option<&'a ModalContext>,
    pub interaction_is_idle: bool,
    pub(crate) styles: StyleResolver<'a>,
}

impl<V, C> CommonContext<'_, V, C> {
    /// Resolve the style of a slot for this render pass
    pub fn get_styles(&self, key: SlotKey, props: &StyleProps) -> SlotStyle {
        self.styles.resolve(key, props)
    }

    /// Style props derived from the snapshot
    pub fn style_props(&self, align: Option<Align>) -> StyleProps {
        StyleProps {
            interaction_is_idle: self.interaction_is_idle,
            is_fullscreen: self.is_fullscreen,
            is_modal: self.is_modal,
            align,
        }
    }

    /// Shorthand for `get_styles(key, &style_props(None))`
    pub fn style_for(&self, key: SlotKey) -> SlotStyle {
        self.get_styles(key, &self.style_props(None))
    }

    pub fn format_context(&self) -> FormatContext {
        FormatContext {
            current_index: self.current_index,
            view_count: self.views.len(),
            is_fullscreen: self.is_fullscreen,
            is_modal: self.is_modal,
        }
    }

    pub fn formatters(&self) -> &dyn Formatters {
        self.config.formatters.as_ref()
    }
}
