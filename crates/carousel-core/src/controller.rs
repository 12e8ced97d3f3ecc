//! The carousel controller.
//!
//! Single source of truth for which view is shown and whether the user can move
//! further. Index changes flow one way each:
//!
//! - [`Carousel::update_config`] with a new controlled index overwrites the index and
//!   syncs the pager, without notifying the caller;
//! - [`Carousel::on_pager_index_change`] records what the pager settled on and
//!   notifies the caller, without commanding the pager.
//!
//! The pager is trusted to report indices within `0..views.len()`. Out-of-range
//! reports are stored as-is; [`Carousel::current_view`] then yields `None`.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::components::{ComponentRegistry, ComponentSet, SlotKey};
use crate::context::CommonContext;
use crate::host::{Environment, Pager};
use crate::idle::{ActivityKind, IdleDetector, IdleState, TimerToken};
use crate::options::{CarouselConfig, ResolvedTrack};
use crate::styles::{Align, SlotStyle, StyleProps, StyleResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Host regions the renderer reports measured areas for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Container,
    Header,
    HeaderClose,
    HeaderFullscreen,
    Footer,
    Frame,
    NavigationPrev,
    NavigationNext,
}

pub struct NavButtonPlan<'a, C> {
    pub direction: Direction,
    pub component: Option<&'a C>,
    pub align: Align,
    pub aria_label: String,
    pub title: String,
    pub region: Region,
}

pub struct NavigationPlan<'a, C> {
    pub component: &'a C,
    pub prev: Option<NavButtonPlan<'a, C>>,
    pub next: Option<NavButtonPlan<'a, C>>,
}

pub struct HeaderPlan<'a, V, C> {
    pub component: &'a C,
    pub data: Option<&'a V>,
    pub close_label: String,
    pub fullscreen_label: String,
    pub close_button: Option<&'a C>,
    pub fullscreen_button: Option<&'a C>,
    pub region: Region,
}

pub struct FooterPlan<'a, C> {
    pub component: &'a C,
    pub caption: Option<&'a C>,
    pub count: Option<&'a C>,
    pub region: Region,
}

pub struct ViewPlan<'a, V> {
    pub index: usize,
    pub data: &'a V,
}

/// What to draw this pass, and with which components
pub struct RenderPlan<'a, V, C> {
    pub container: Option<&'a C>,
    pub header: Option<HeaderPlan<'a, V, C>>,
    pub navigation: Option<NavigationPlan<'a, C>>,
    pub footer: Option<FooterPlan<'a, C>>,
    /// Shared by every view wrapper, only `data` differs per view
    pub view: Option<&'a C>,
    pub views: Vec<ViewPlan<'a, V>>,
}

pub struct Carousel<V, C> {
    config: CarouselConfig<V, C>,
    track: ResolvedTrack,
    registry: ComponentRegistry<C>,
    pager: Box<dyn Pager>,
    env: Box<dyn Environment>,
    current_index: usize,
    visible_indices: Vec<usize>,
    idle: IdleDetector,
    touch_capable: bool,
    mounted: bool,
}

impl<V, C: Clone> Carousel<V, C> {
    pub fn new(
        config: CarouselConfig<V, C>,
        mut pager: Box<dyn Pager>,
        env: Box<dyn Environment>,
        defaults: ComponentSet<C>,
    ) -> Self {
        let touch_capable = env.is_touch_capable();
        let track = config.track_options.resolve(touch_capable);
        let registry = ComponentRegistry::new(defaults, config.components.clone());
        let current_index = config.current_index;

        pager.configure(&track, config.view_count());
        pager.sync_index(current_index);

        Self {
            config,
            track,
            registry,
            pager,
            env,
            current_index,
            visible_indices: vec![current_index],
            idle: IdleDetector::new(touch_capable),
            touch_capable,
            mounted: false,
        }
    }

    /// Called once the host has laid out the container
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if self.config.hide_controls_when_idle && self.env.has_container() {
            self.idle.attach();
            debug!("Idle activity listeners attached");
        }
        if self.config.modal_context.is_some() {
            self.focus_view_frame();
        }
    }

    /// Detach listeners and drop pending timer and activity callbacks
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.idle.detach();
        debug!("Carousel torn down");
    }

    /// Apply a new caller configuration
    pub fn update_config(&mut self, config: CarouselConfig<V, C>) {
        let old = std::mem::replace(&mut self.config, config);

        self.registry.refresh(self.config.components.as_ref());

        self.track = self.config.track_options.resolve(self.touch_capable);
        self.pager.configure(&self.track, self.config.view_count());

        // A controlled index that echoes the settled one is already displayed
        if old.current_index != self.config.current_index
            && self.config.current_index != self.current_index
        {
            debug!(
                from = self.current_index,
                to = self.config.current_index,
                "Controlled index changed"
            );
            self.current_index = self.config.current_index;
            self.visible_indices = vec![self.current_index];
            self.pager.sync_index(self.current_index);
        }
    }

    /// Pager notification: the first index is canonical
    pub fn on_pager_index_change(&mut self, indices: &[usize]) {
        let Some(&index) = indices.first() else {
            return;
        };

        self.current_index = index;
        self.visible_indices = indices.to_vec();
        debug!(index, visible = ?indices, "Pager settled");

        if let Some(ref on_view_change) = self.track.on_view_change {
            on_view_change.call(index);
        }
    }

    /// Host pump: settle notifications, coalesced activity, idle timer
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }

        if let Some(indices) = self.pager.poll(now) {
            self.on_pager_index_change(&indices);
        }
        if let Some(state) = self.idle.flush_frame(now) {
            debug!(?state, "Interaction state changed");
        }
        if let Some(state) = self.idle.poll_timer(now) {
            debug!(?state, "Interaction state changed");
        }
    }

    /// Activity listener entry point. Ignored unless the idle detector is installed.
    pub fn record_activity(&mut self, kind: ActivityKind) {
        self.idle.record(kind);
    }

    /// Deliver a timer callback directly. Stale or post-teardown tokens do nothing.
    pub fn fire_idle_timer(&mut self, token: TimerToken) -> Option<IdleState> {
        self.idle.fire(token)
    }

    pub fn pending_idle_timer(&self) -> Option<TimerToken> {
        self.idle.pending_timer()
    }

    pub fn go_previous(&mut self) {
        self.pager.prev();
        self.focus_view_frame();
    }

    pub fn go_next(&mut self) {
        self.pager.next();
        self.focus_view_frame();
    }

    pub fn go(&mut self, direction: Direction) {
        match direction {
            Direction::Previous => self.go_previous(),
            Direction::Next => self.go_next(),
        }
    }

    fn focus_view_frame(&mut self) {
        let frame = self.pager.focus_surface();
        if self.env.focused() != Some(frame) {
            self.env.focus(frame);
        }
    }

    pub fn can_go_previous(&self) -> bool {
        if self.view_count() == 0 {
            return false;
        }
        self.track.infinite || self.current_index != 0
    }

    pub fn can_go_next(&self) -> bool {
        let count = self.view_count();
        if count == 0 {
            return false;
        }
        self.track.infinite || self.current_index != count - 1
    }

    pub fn can_go(&self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.can_go_previous(),
            Direction::Next => self.can_go_next(),
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Every index the pager reported with the last settle, canonical first
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    pub fn current_view(&self) -> Option<&V> {
        self.config.views().get(self.current_index)
    }

    #[inline]
    pub fn interaction_is_idle(&self) -> bool {
        self.idle.is_idle()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn view_count(&self) -> usize {
        self.config.view_count()
    }

    pub fn config(&self) -> &CarouselConfig<V, C> {
        &self.config
    }

    pub fn track(&self) -> &ResolvedTrack {
        &self.track
    }

    pub fn components(&self) -> &Arc<ComponentSet<C>> {
        self.registry.resolved()
    }

    pub fn pager(&self) -> &dyn Pager {
        self.pager.as_ref()
    }

    pub fn resolve_style(&self, key: SlotKey, props: &StyleProps) -> SlotStyle {
        StyleResolver::new(&self.config.palette, &self.config.style_overrides).resolve(key, props)
    }

    pub fn common_context(&self) -> CommonContext<'_, V, C> {
        let modal_context = self.config.modal_context.as_ref();
        CommonContext {
            config: &self.config,
            current_index: self.current_index,
            current_view: self.current_view(),
            views: self.config.views(),
            frame_options: &self.config.frame_options,
            track: &self.track,
            is_modal: modal_context.is_some(),
            is_fullscreen: modal_context.is_some_and(|m| m.is_fullscreen),
            modal_context,
            interaction_is_idle: self.interaction_is_idle(),
            styles: StyleResolver::new(&self.config.palette, &self.config.style_overrides),
        }
    }

    /// Decide which slots render this pass
    pub fn render_plan(&self) -> RenderPlan<'_, V, C> {
        let components = self.registry.resolved().as_ref();
        let ctx = self.common_context();
        let fmt_ctx = ctx.format_context();
        let formatters = ctx.formatters();

        let show_prev = self.can_go_previous();
        let show_next = self.can_go_next();
        let navigation = match components.get(SlotKey::Navigation) {
            Some(component) if show_prev || show_next => Some(NavigationPlan {
                component,
                prev: show_prev.then(|| NavButtonPlan {
                    direction: Direction::Previous,
                    component: components.get(SlotKey::NavigationPrev),
                    align: Align::Left,
                    aria_label: formatters.prev_label(&fmt_ctx),
                    title: formatters.prev_title(&fmt_ctx),
                    region: Region::NavigationPrev,
                }),
                next: show_next.then(|| NavButtonPlan {
                    direction: Direction::Next,
                    component: components.get(SlotKey::NavigationNext),
                    align: Align::Right,
                    aria_label: formatters.next_label(&fmt_ctx),
                    title: formatters.next_title(&fmt_ctx),
                    region: Region::NavigationNext,
                }),
            }),
            _ => None,
        };

        let header = components.get(SlotKey::Header).map(|component| HeaderPlan {
            component,
            data: self.current_view(),
            close_label: formatters.close_label(&fmt_ctx),
            fullscreen_label: formatters.fullscreen_label(&fmt_ctx),
            close_button: components.get(SlotKey::HeaderClose),
            fullscreen_button: components.get(SlotKey::HeaderFullscreen),
            region: Region::Header,
        });

        let footer = components.get(SlotKey::Footer).map(|component| FooterPlan {
            component,
            caption: components.get(SlotKey::FooterCaption),
            count: components.get(SlotKey::FooterCount),
            region: Region::Footer,
        });

        let views = self
            .config
            .views()
            .iter()
            .enumerate()
            .map(|(index, data)| ViewPlan { index, data })
            .collect();

        RenderPlan {
            container: components.get(SlotKey::Container),
            header,
            navigation,
            footer,
            view: components.get(SlotKey::View),
            views,
        }
    }
}
