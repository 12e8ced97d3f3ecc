use carousel_core::SlotKey;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{SlotContext, SlotProps, SlotWidget};
use crate::images::{halfblock_lines, ImageState};
use crate::theme::{self, Theme};

/// One slide: the image in halfblocks, or its load state
#[derive(Debug, Default)]
pub struct ViewWidget;

impl ViewWidget {
    fn render_message(frame: &mut Frame, area: Rect, message: Line<'_>, style: Style) {
        let paragraph = Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, theme::centered(area, area.width, 1));
    }
}

impl SlotWidget for ViewWidget {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &SlotContext<'_>, props: &SlotProps<'_>) {
        let SlotProps::View { image, slide, .. } = *props else {
            return;
        };
        let style = ctx.style_for(SlotKey::View);
        if style.hidden {
            return;
        }
        let base = theme::text_style(&style);
        let palette = Theme::from(&ctx.config.palette);

        frame.render_widget(theme::block(&style), area);
        let inner = theme::content_area(area, &style);

        match image {
            Some(ImageState::Loaded(img)) => {
                let lines = halfblock_lines(img, inner.width, inner.height);
                frame.render_widget(Paragraph::new(lines), inner);
            }
            Some(ImageState::Loading) => Self::render_message(
                frame,
                inner,
                Line::from(Span::styled(
                    "Loading image...",
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                )),
                base,
            ),
            Some(ImageState::Failed(error)) => Self::render_message(
                frame,
                inner,
                Line::from(vec![
                    Span::styled("Failed to load ", Style::default().fg(palette.error)),
                    Span::styled(slide.source.to_string(), Style::default().fg(palette.grey1)),
                    Span::styled(format!(": {}", error), Style::default().fg(palette.error)),
                ]),
                base,
            ),
            None => Self::render_message(
                frame,
                inner,
                Line::from(Span::styled(
                    "Image not loaded",
                    Style::default()
                        .fg(palette.grey1)
                        .add_modifier(Modifier::ITALIC),
                )),
                base,
            ),
        }
    }
}
