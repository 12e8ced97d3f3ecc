use carousel_core::SlotKey;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{SlotContext, SlotProps, SlotWidget};
use crate::theme;

/// Fills the carousel area with the container background
#[derive(Debug, Default)]
pub struct ContainerWidget;

impl SlotWidget for ContainerWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, _props: &SlotProps<'_>) {
        let style = ctx.style_for(SlotKey::Container);
        if style.hidden {
            return;
        }
        frame.render_widget(theme::block(&style), area);
    }
}

/// Title bar showing the current slide's title
#[derive(Debug, Default)]
pub struct HeaderWidget;

impl SlotWidget for HeaderWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let style = ctx.style_for(SlotKey::Header);
        if style.hidden {
            return;
        }
        frame.render_widget(theme::block(&style), area);

        let SlotProps::Header { slide: Some(slide) } = props else {
            return;
        };
        let title = Line::from(Span::styled(
            slide.display_title(),
            theme::text_style(&style).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title), theme::content_area(area, &style));
    }
}

/// Close and fullscreen affordances in the header
#[derive(Debug, Default)]
pub struct HeaderButtonWidget;

impl SlotWidget for HeaderButtonWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let SlotProps::HeaderButton { key, label } = *props else {
            return;
        };
        let style = ctx.style_for(key);
        if style.hidden {
            return;
        }
        let paragraph = Paragraph::new(Line::from(label))
            .style(theme::text_style(&style))
            .alignment(Alignment::Right);
        frame.render_widget(paragraph, theme::content_area(area, &style));
    }
}

/// Bottom bar background
#[derive(Debug, Default)]
pub struct FooterWidget;

impl SlotWidget for FooterWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, _props: &SlotProps<'_>) {
        let style = ctx.style_for(SlotKey::Footer);
        if style.hidden {
            return;
        }
        frame.render_widget(theme::block(&style), area);
    }
}

/// Caption of the current slide
#[derive(Debug, Default)]
pub struct FooterCaptionWidget;

impl SlotWidget for FooterCaptionWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let SlotProps::Caption { text: Some(text) } = *props else {
            return;
        };
        let style = ctx.style_for(SlotKey::FooterCaption);
        if style.hidden {
            return;
        }
        let paragraph = Paragraph::new(Line::from(text)).style(theme::text_style(&style));
        frame.render_widget(paragraph, theme::content_area(area, &style));
    }
}

/// "current / total" counter
#[derive(Debug, Default)]
pub struct FooterCountWidget;

impl FooterCountWidget {
    pub fn text(current: usize, total: usize) -> String {
        format!("{} / {}", current + 1, total)
    }
}

impl SlotWidget for FooterCountWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let SlotProps::Count { current, total } = *props else {
            return;
        };
        let style = ctx.style_for(SlotKey::FooterCount);
        if style.hidden || total == 0 {
            return;
        }
        let paragraph = Paragraph::new(Line::from(Self::text(current, total)))
            .style(theme::text_style(&style))
            .alignment(Alignment::Right);
        frame.render_widget(paragraph, theme::content_area(area, &style));
    }
}
