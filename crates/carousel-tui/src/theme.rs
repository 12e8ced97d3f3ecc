//! Mapping of resolved slot styles onto ratatui

use carousel_core::styles::{BoxSizing, Rgb};
use carousel_core::{Palette, SlotStyle};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

#[inline]
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Runtime theme derived from the carousel palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey1: Color,
    pub accent: Color,
    pub highlight: Color,
    pub error: Color,
}

impl From<&Palette> for Theme {
    fn from(palette: &Palette) -> Self {
        Self {
            bg0: color(palette.bg0),
            bg1: color(palette.bg1),
            bg2: color(palette.bg2),
            fg0: color(palette.fg0),
            fg1: color(palette.fg1),
            grey1: color(palette.grey1),
            accent: color(palette.accent),
            highlight: color(palette.highlight),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&Palette::default())
    }
}

/// Text style for a slot
pub fn text_style(slot: &SlotStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = slot.fg {
        style = style.fg(color(fg));
    }
    if let Some(bg) = slot.bg {
        style = style.bg(color(bg));
    }
    if slot.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if slot.dim {
        style = style.add_modifier(Modifier::DIM);
    }
    if slot.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Background block, bordered when the slot asks for it
pub fn block(slot: &SlotStyle) -> Block<'static> {
    let block = Block::default().style(text_style(slot));
    if slot.border {
        let border = slot.fg.map(color).unwrap_or(Color::Reset);
        block
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
    } else {
        block
    }
}

/// Rows or columns taken by border and padding on one axis
fn chrome(slot: &SlotStyle, padding: u16) -> u16 {
    let border = if slot.border { 2 } else { 0 };
    border + padding * 2
}

/// Outer height of a fixed-height slot.
/// Content-box heights exclude border and padding, border-box heights include them.
pub fn outer_height(slot: &SlotStyle) -> Option<u16> {
    slot.height.map(|h| match slot.box_sizing {
        BoxSizing::BorderBox => h,
        BoxSizing::ContentBox => h + chrome(slot, slot.padding.vertical),
    })
}

/// Outer width of a fixed-width slot
pub fn outer_width(slot: &SlotStyle) -> Option<u16> {
    slot.width.map(|w| match slot.box_sizing {
        BoxSizing::BorderBox => w,
        BoxSizing::ContentBox => w + chrome(slot, slot.padding.horizontal),
    })
}

/// Content area left inside `area` after border and padding
pub fn content_area(area: Rect, slot: &SlotStyle) -> Rect {
    let mut inner = if slot.border {
        Block::default().borders(Borders::ALL).inner(area)
    } else {
        area
    };
    let (px, py) = (slot.padding.horizontal, slot.padding.vertical);
    inner.x = inner.x.saturating_add(px);
    inner.y = inner.y.saturating_add(py);
    inner.width = inner.width.saturating_sub(px * 2);
    inner.height = inner.height.saturating_sub(py * 2);
    inner
}

/// Center a rect of the given size within `area`, clamped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use carousel_core::styles::Padding;

    use super::*;

    #[test]
    fn test_text_style_maps_colors_and_modifiers() {
        let slot = SlotStyle {
            fg: Some(Rgb(1, 2, 3)),
            bold: true,
            ..Default::default()
        };
        let style = text_style(&slot);
        assert_eq!(style.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(style.bg, None);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_box_sizing_changes_outer_height() {
        let mut slot = SlotStyle {
            border: true,
            padding: Padding::new(1, 1),
            height: Some(3),
            ..Default::default()
        };
        assert_eq!(outer_height(&slot), Some(7));
        slot.box_sizing = BoxSizing::BorderBox;
        assert_eq!(outer_height(&slot), Some(3));
        assert_eq!(outer_width(&slot), None);
    }

    #[test]
    fn test_content_area_removes_chrome() {
        let slot = SlotStyle {
            border: true,
            padding: Padding::new(1, 0),
            ..Default::default()
        };
        let inner = content_area(Rect::new(0, 0, 20, 5), &slot);
        assert_eq!(inner, Rect::new(2, 1, 16, 3));
    }

    #[test]
    fn test_centered_clamps() {
        let area = Rect::new(10, 10, 8, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(12, 11, 4, 2));
        assert_eq!(centered(area, 20, 20), area);
    }
}
