use carousel_core::styles::Align;
use carousel_core::{Direction, SlotKey};
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{SlotContext, SlotProps, SlotWidget};
use crate::theme;

/// Wrapper around the two buttons. Draws nothing on its own.
#[derive(Debug, Default)]
pub struct NavigationWidget;

impl SlotWidget for NavigationWidget {
    fn render(&self, _frame: &mut Frame, _area: Rect, _ctx: &SlotContext<'_>, _props: &SlotProps<'_>) {}
}

/// Previous / next arrow button
#[derive(Debug, Default)]
pub struct NavButtonWidget;

impl NavButtonWidget {
    pub fn arrow(direction: Direction) -> &'static str {
        match direction {
            Direction::Previous => "◀",
            Direction::Next => "▶",
        }
    }
}

impl SlotWidget for NavButtonWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let SlotProps::NavButton { direction, .. } = *props else {
            return;
        };
        let (key, align) = match direction {
            Direction::Previous => (SlotKey::NavigationPrev, Align::Left),
            Direction::Next => (SlotKey::NavigationNext, Align::Right),
        };
        let style = ctx.get_styles(key, &ctx.style_props(Some(align)));
        if style.hidden {
            return;
        }

        frame.render_widget(theme::block(&style), area);
        let inner = theme::content_area(area, &style);
        let row = theme::centered(inner, inner.width, 1);
        let arrow = Paragraph::new(Line::from(Self::arrow(direction)))
            .style(theme::text_style(&style))
            .alignment(Alignment::Center);
        frame.render_widget(arrow, row);
    }
}
