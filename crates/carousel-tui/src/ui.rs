//! Draws a carousel render plan onto a ratatui frame

use std::collections::HashMap;

use carousel_core::{Carousel, Region, Slide, SlotKey, ViewsToShow};
use carousel_core::options::Axis;
use carousel_core::styles::Align;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::images::ImageCache;
use crate::theme;
use crate::widgets::{FooterCountWidget, SharedSlot, SlotProps};

pub type TerminalCarousel = Carousel<Slide, SharedSlot>;

/// Screen areas of the regions drawn in the last frame
#[derive(Debug, Clone, Default)]
pub struct Regions {
    rects: HashMap<Region, Rect>,
}

impl Regions {
    /// Hit-test order: buttons before the bars and the frame they sit on
    const HIT_ORDER: [Region; 8] = [
        Region::NavigationPrev,
        Region::NavigationNext,
        Region::HeaderClose,
        Region::HeaderFullscreen,
        Region::Header,
        Region::Footer,
        Region::Frame,
        Region::Container,
    ];

    pub fn insert(&mut self, region: Region, rect: Rect) {
        self.rects.insert(region, rect);
    }

    pub fn get(&self, region: Region) -> Option<Rect> {
        self.rects.get(&region).copied()
    }

    /// Topmost region under a terminal cell
    pub fn hit(&self, column: u16, row: u16) -> Option<Region> {
        Self::HIT_ORDER.into_iter().find(|region| {
            self.get(*region).is_some_and(|r| {
                column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
            })
        })
    }
}

/// Part of a `width`-wide column at `x` that lies within `bounds`
fn clip_column(x: i32, width: u16, bounds: Rect) -> Option<Rect> {
    let left = x.max(bounds.x as i32);
    let right = (x + width as i32).min(bounds.right() as i32);
    (right > left).then(|| Rect {
        x: left as u16,
        y: bounds.y,
        width: (right - left) as u16,
        height: bounds.height,
    })
}

/// Part of a `height`-tall row at `y` that lies within `bounds`
fn clip_row(y: i32, height: u16, bounds: Rect) -> Option<Rect> {
    let top = y.max(bounds.y as i32);
    let bottom = (y + height as i32).min(bounds.bottom() as i32);
    (bottom > top).then(|| Rect {
        x: bounds.x,
        y: top as u16,
        width: bounds.width,
        height: (bottom - top) as u16,
    })
}

/// Views sharing the frame, at most one per cell along the track axis
fn views_per_page(views_to_show: ViewsToShow, view_count: usize, extent: u16) -> usize {
    let wanted = match views_to_show {
        ViewsToShow::Auto => 1,
        ViewsToShow::Count(count) => count.clamp(1, view_count.max(1)),
    };
    wanted.min(extent.max(1) as usize)
}

/// Render the carousel and report where each region landed
pub fn draw(frame: &mut Frame, carousel: &TerminalCarousel, images: &ImageCache) -> Regions {
    let area = frame.area();
    let ctx = carousel.common_context();
    let plan = carousel.render_plan();
    let mut regions = Regions::default();

    regions.insert(Region::Container, area);
    if let Some(container) = plan.container {
        container.render(frame, area, &ctx, &SlotProps::Container);
    }
    let inner = theme::content_area(area, &ctx.style_for(SlotKey::Container));

    let header_style = ctx.style_for(SlotKey::Header);
    let footer_style = ctx.style_for(SlotKey::Footer);
    let header_height = match plan.header {
        Some(_) => theme::outer_height(&header_style).unwrap_or(1),
        None => 0,
    };
    let footer_height = match plan.footer {
        Some(_) => theme::outer_height(&footer_style).unwrap_or(1),
        None => 0,
    };
    let [header_area, body, footer_area] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(inner);

    // Views
    regions.insert(Region::Frame, body);
    let views = &plan.views;
    if let (Some(view), false) = (plan.view, views.is_empty()) {
        let n = views.len();
        let vertical = ctx.track.axis == Axis::Y;
        let extent = if vertical { body.height } else { body.width };
        let per_page = views_per_page(ctx.track.views_to_show, n, extent);
        let view_size = (extent / per_page as u16).max(1);
        let position = carousel.pager().position();
        let first = position.floor();
        let shift = ((position - first) * view_size as f64).round() as i32;

        for slot in 0..=per_page {
            let logical = first as i64 + slot as i64;
            let index = if ctx.track.infinite {
                logical.rem_euclid(n as i64) as usize
            } else if (0..n as i64).contains(&logical) {
                logical as usize
            } else {
                continue;
            };
            let offset = slot as i32 * view_size as i32 - shift;
            let rect = if vertical {
                clip_row(body.y as i32 + offset, view_size, body)
            } else {
                clip_column(body.x as i32 + offset, view_size, body)
            };
            let Some(rect) = rect else {
                continue;
            };
            let data = views[index].data;
            view.render(
                frame,
                rect,
                &ctx,
                &SlotProps::View {
                    index,
                    slide: data,
                    image: images.state(&data.source),
                },
            );
        }
    }

    // Header
    if let Some(ref header) = plan.header {
        header
            .component
            .render(frame, header_area, &ctx, &SlotProps::Header { slide: header.data });
        if !header_style.hidden {
            regions.insert(header.region, header_area);

            let content = theme::content_area(header_area, &header_style);
            let mut right = content.right();
            let buttons = [
                (
                    ctx.is_modal,
                    header.close_button,
                    SlotKey::HeaderClose,
                    Region::HeaderClose,
                    header.close_label.as_str(),
                ),
                (
                    ctx.modal_context.is_some_and(|m| m.allow_fullscreen),
                    header.fullscreen_button,
                    SlotKey::HeaderFullscreen,
                    Region::HeaderFullscreen,
                    header.fullscreen_label.as_str(),
                ),
            ];
            for (enabled, component, key, region, label) in buttons {
                let Some(component) = component.filter(|_| enabled) else {
                    continue;
                };
                let width = (label.width() as u16).min(right.saturating_sub(content.x));
                if width == 0 || content.height == 0 {
                    break;
                }
                let rect = Rect::new(right - width, content.y, width, 1);
                component.render(frame, rect, &ctx, &SlotProps::HeaderButton { key, label });
                regions.insert(region, rect);
                right = rect.x.saturating_sub(2);
            }
        }
    }

    // Navigation
    if let Some(ref navigation) = plan.navigation {
        navigation
            .component
            .render(frame, body, &ctx, &SlotProps::Navigation);
        if !ctx.style_for(SlotKey::Navigation).hidden {
            for button in [&navigation.prev, &navigation.next].into_iter().flatten() {
                let Some(component) = button.component else {
                    continue;
                };
                let key = match button.align {
                    Align::Right => SlotKey::NavigationNext,
                    _ => SlotKey::NavigationPrev,
                };
                let style = ctx.get_styles(key, &ctx.style_props(Some(button.align)));
                if style.hidden {
                    continue;
                }
                let width = theme::outer_width(&style).unwrap_or(3).min(body.width);
                let height = theme::outer_height(&style).unwrap_or(3).min(body.height);
                let x = match button.align {
                    Align::Right => body.right().saturating_sub(width + 1).max(body.x),
                    _ => (body.x + 1).min(body.right().saturating_sub(width)),
                };
                let y = body.y + (body.height - height) / 2;
                let rect = Rect::new(x, y, width, height);
                component.render(
                    frame,
                    rect,
                    &ctx,
                    &SlotProps::NavButton {
                        direction: button.direction,
                        label: &button.aria_label,
                        title: &button.title,
                    },
                );
                regions.insert(button.region, rect);
            }
        }
    }

    // Footer
    if let Some(ref footer) = plan.footer {
        footer
            .component
            .render(frame, footer_area, &ctx, &SlotProps::Footer);
        if !footer_style.hidden {
            regions.insert(footer.region, footer_area);

            let content = theme::content_area(footer_area, &footer_style);
            let total = ctx.views.len();
            let count_text = FooterCountWidget::text(ctx.current_index, total);
            let count_width = match footer.count {
                Some(_) if total > 0 => (count_text.width() as u16).min(content.width),
                _ => 0,
            };
            let [caption_area, count_area] = Layout::horizontal([
                Constraint::Min(0),
                Constraint::Length(count_width),
            ])
            .areas(content);

            if let Some(caption) = footer.caption {
                let text = ctx.current_view.and_then(|slide| slide.caption.as_deref());
                caption.render(frame, caption_area, &ctx, &SlotProps::Caption { text });
            }
            if let Some(count) = footer.count {
                count.render(
                    frame,
                    count_area,
                    &ctx,
                    &SlotProps::Count {
                        current: ctx.current_index,
                        total,
                    },
                );
            }
        }
    }

    regions
}

/// Overlay a one-line status message on the bottom row
pub fn draw_status(frame: &mut Frame, carousel: &TerminalCarousel, message: &str) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let theme = theme::Theme::from(&carousel.config().palette);
    let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new(message.to_string()).style(Style::default().fg(theme.highlight).bg(theme.bg1)),
        row,
    );
}
