//! Slot styling.
//!
//! Each slot has a default style function. Resolution normalizes box sizing to
//! border-box and then hands the result to the caller's override for that slot, if any.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::SlotKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Parse a hex color string.
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb(r, g, b))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
    /// Border and padding are added around the slot's area
    #[default]
    ContentBox,
    /// Border and padding are taken from the slot's area
    BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub horizontal: u16,
    pub vertical: u16,
}

impl Padding {
    pub const fn new(horizontal: u16, vertical: u16) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Resolved visual properties of one slot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    /// Slot is laid out but not drawn
    pub hidden: bool,
    pub border: bool,
    pub padding: Padding,
    pub box_sizing: BoxSizing,
    /// Fixed height in rows
    pub height: Option<u16>,
    /// Fixed width in columns
    pub width: Option<u16>,
}

/// Inputs to style functions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleProps {
    pub interaction_is_idle: bool,
    pub is_fullscreen: bool,
    pub is_modal: bool,
    pub align: Option<Align>,
}

/// Semantic colors used by the default styles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub bg0: Rgb,
    pub bg1: Rgb,
    pub bg2: Rgb,
    pub fg0: Rgb,
    pub fg1: Rgb,
    pub grey1: Rgb,
    pub accent: Rgb,
    pub highlight: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // Gruvbox dark
        Self {
            bg0: Rgb(0x28, 0x28, 0x28),
            bg1: Rgb(0x32, 0x30, 0x2f),
            bg2: Rgb(0x45, 0x40, 0x3d),
            fg0: Rgb(0xd4, 0xbe, 0x98),
            fg1: Rgb(0xdd, 0xc7, 0xa1),
            grey1: Rgb(0x92, 0x83, 0x74),
            accent: Rgb(0x89, 0xb4, 0x82),
            highlight: Rgb(0xd8, 0xa6, 0x57),
        }
    }
}

/// Optional palette overrides from the config file.
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub grey1: Option<String>,
    pub accent: Option<String>,
    pub highlight: Option<String>,
}

impl Palette {
    /// Apply user color overrides. Invalid hex values are logged and skipped.
    pub fn with_overrides(mut self, overrides: &PaletteOverrides) -> Self {
        let slots = [
            ("bg0", &overrides.bg0, &mut self.bg0),
            ("bg1", &overrides.bg1, &mut self.bg1),
            ("bg2", &overrides.bg2, &mut self.bg2),
            ("fg0", &overrides.fg0, &mut self.fg0),
            ("fg1", &overrides.fg1, &mut self.fg1),
            ("grey1", &overrides.grey1, &mut self.grey1),
            ("accent", &overrides.accent, &mut self.accent),
            ("highlight", &overrides.highlight, &mut self.highlight),
        ];
        for (name, hex, target) in slots {
            let Some(hex) = hex else { continue };
            match parse_hex_color(hex) {
                Some(color) => *target = color,
                None => warn!("Invalid color override {} = '{}', keeping default", name, hex),
            }
        }
        self
    }
}

/// Caller style override: receives the normalized base style and the props
pub type StyleFn = Arc<dyn Fn(SlotStyle, &StyleProps) -> SlotStyle + Send + Sync>;

#[derive(Clone, Default)]
pub struct StyleOverrides {
    overrides: BTreeMap<SlotKey, StyleFn>,
}

impl fmt::Debug for StyleOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.overrides.keys()).finish()
    }
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        key: SlotKey,
        f: impl Fn(SlotStyle, &StyleProps) -> SlotStyle + Send + Sync + 'static,
    ) -> Self {
        self.overrides.insert(key, Arc::new(f));
        self
    }

    pub fn get(&self, key: SlotKey) -> Option<&StyleFn> {
        self.overrides.get(&key)
    }
}

/// Default style function for each slot
pub fn default_style(key: SlotKey, props: &StyleProps, palette: &Palette) -> SlotStyle {
    // Controls fade out while the user is idle
    let controls_hidden = props.interaction_is_idle;

    match key {
        SlotKey::Container => SlotStyle {
            bg: Some(palette.bg0),
            fg: Some(palette.fg0),
            ..Default::default()
        },
        SlotKey::Header => SlotStyle {
            bg: Some(palette.bg1),
            fg: Some(palette.fg0),
            hidden: controls_hidden,
            border: !props.is_fullscreen,
            padding: Padding::new(1, 0),
            height: Some(if props.is_fullscreen { 1 } else { 3 }),
            ..Default::default()
        },
        SlotKey::HeaderClose | SlotKey::HeaderFullscreen => SlotStyle {
            fg: Some(palette.fg1),
            bold: true,
            hidden: controls_hidden,
            ..Default::default()
        },
        SlotKey::Footer => SlotStyle {
            bg: Some(palette.bg1),
            fg: Some(palette.fg0),
            hidden: controls_hidden,
            border: !props.is_fullscreen,
            padding: Padding::new(1, 0),
            height: Some(if props.is_fullscreen { 1 } else { 3 }),
            ..Default::default()
        },
        SlotKey::FooterCaption => SlotStyle {
            fg: Some(palette.fg0),
            ..Default::default()
        },
        SlotKey::FooterCount => SlotStyle {
            fg: Some(palette.grey1),
            dim: true,
            ..Default::default()
        },
        SlotKey::Navigation => SlotStyle {
            hidden: controls_hidden,
            ..Default::default()
        },
        SlotKey::NavigationPrev | SlotKey::NavigationNext => SlotStyle {
            bg: Some(palette.bg2),
            fg: Some(palette.highlight),
            bold: true,
            hidden: controls_hidden,
            border: true,
            width: Some(5),
            height: Some(3),
            ..Default::default()
        },
        SlotKey::View => SlotStyle {
            bg: Some(palette.bg0),
            ..Default::default()
        },
    }
}

/// Resolves slot styles against a palette and the caller's overrides
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    palette: &'a Palette,
    overrides: &'a StyleOverrides,
}

impl<'a> StyleResolver<'a> {
    pub fn new(palette: &'a Palette, overrides: &'a StyleOverrides) -> Self {
        Self { palette, overrides }
    }

    pub fn resolve(&self, key: SlotKey, props: &StyleProps) -> SlotStyle {
        let mut base = default_style(key, props, self.palette);
        base.box_sizing = BoxSizing::BorderBox;
        match self.overrides.get(key) {
            Some(custom) => custom(base, props),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("nope"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_resolve_normalizes_box_sizing() {
        let palette = Palette::default();
        let overrides = StyleOverrides::default();
        let resolver = StyleResolver::new(&palette, &overrides);

        let style = resolver.resolve(SlotKey::Header, &StyleProps::default());
        assert_eq!(style.box_sizing, BoxSizing::BorderBox);
        assert_eq!(style.bg, Some(palette.bg1));
    }

    #[test]
    fn test_override_receives_normalized_base() {
        let palette = Palette::default();
        let overrides = StyleOverrides::new().with(SlotKey::Footer, |base, props| {
            assert_eq!(base.box_sizing, BoxSizing::BorderBox);
            SlotStyle {
                bg: Some(Rgb(1, 2, 3)),
                hidden: base.hidden && !props.is_modal,
                ..base
            }
        });
        let resolver = StyleResolver::new(&palette, &overrides);

        let props = StyleProps {
            interaction_is_idle: true,
            is_modal: true,
            ..Default::default()
        };
        let style = resolver.resolve(SlotKey::Footer, &props);
        assert_eq!(style.bg, Some(Rgb(1, 2, 3)));
        assert!(!style.hidden);

        // other slots untouched
        let header = resolver.resolve(SlotKey::Header, &props);
        assert!(header.hidden);
    }

    #[test]
    fn test_controls_hidden_when_idle() {
        let palette = Palette::default();
        let idle = StyleProps {
            interaction_is_idle: true,
            ..Default::default()
        };
        assert!(default_style(SlotKey::NavigationNext, &idle, &palette).hidden);
        assert!(!default_style(SlotKey::View, &idle, &palette).hidden);
        assert!(!default_style(SlotKey::NavigationNext, &StyleProps::default(), &palette).hidden);
    }

    #[test]
    fn test_palette_overrides() {
        let overrides = PaletteOverrides {
            bg0: Some("#000000".to_string()),
            accent: Some("zzz".to_string()),
            ..Default::default()
        };
        let palette = Palette::default().with_overrides(&overrides);
        assert_eq!(palette.bg0, Rgb(0, 0, 0));
        assert_eq!(palette.accent, Palette::default().accent);
    }
}
