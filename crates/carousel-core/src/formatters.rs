use std::fmt;

/// The slice of the common context that label formatters may read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatContext {
    pub current_index: usize,
    pub view_count: usize,
    pub is_fullscreen: bool,
    pub is_modal: bool,
}

impl FormatContext {
    /// 1-based position of the view before the current one, wrapping at the start
    fn prev_position(&self) -> usize {
        if self.view_count == 0 {
            return 0;
        }
        (self.current_index + self.view_count - 1) % self.view_count + 1
    }

    /// 1-based position of the view after the current one, wrapping at the end
    fn next_position(&self) -> usize {
        if self.view_count == 0 {
            return 0;
        }
        (self.current_index + 1) % self.view_count + 1
    }
}

/// Label and title strings for navigation and header affordances.
///
/// Every method has an English default, so custom sets only override what they need.
pub trait Formatters: Send + Sync + fmt::Debug {
    fn prev_label(&self, ctx: &FormatContext) -> String {
        format!("Show slide {} of {}", ctx.prev_position(), ctx.view_count)
    }

    fn next_label(&self, ctx: &FormatContext) -> String {
        format!("Show slide {} of {}", ctx.next_position(), ctx.view_count)
    }

    fn prev_title(&self, _ctx: &FormatContext) -> String {
        "Previous (left arrow)".to_string()
    }

    fn next_title(&self, _ctx: &FormatContext) -> String {
        "Next (right arrow)".to_string()
    }

    fn close_label(&self, _ctx: &FormatContext) -> String {
        "Close (esc)".to_string()
    }

    fn fullscreen_label(&self, ctx: &FormatContext) -> String {
        if ctx.is_fullscreen {
            "Exit fullscreen (f)".to_string()
        } else {
            "Enter fullscreen (f)".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFormatters;

impl Formatters for EnglishFormatters {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current_index: usize, view_count: usize) -> FormatContext {
        FormatContext {
            current_index,
            view_count,
            is_fullscreen: false,
            is_modal: false,
        }
    }

    #[test]
    fn test_navigation_labels() {
        let f = EnglishFormatters;
        assert_eq!(f.next_label(&ctx(0, 3)), "Show slide 2 of 3");
        assert_eq!(f.prev_label(&ctx(1, 3)), "Show slide 1 of 3");
        assert_eq!(f.prev_title(&ctx(1, 3)), "Previous (left arrow)");
        assert_eq!(f.next_title(&ctx(1, 3)), "Next (right arrow)");
    }

    #[test]
    fn test_labels_wrap_at_edges() {
        let f = EnglishFormatters;
        assert_eq!(f.next_label(&ctx(2, 3)), "Show slide 1 of 3");
        assert_eq!(f.prev_label(&ctx(0, 3)), "Show slide 3 of 3");
    }

    #[test]
    fn test_fullscreen_label_follows_state() {
        let f = EnglishFormatters;
        let mut c = ctx(0, 1);
        assert_eq!(f.fullscreen_label(&c), "Enter fullscreen (f)");
        c.is_fullscreen = true;
        assert_eq!(f.fullscreen_label(&c), "Exit fullscreen (f)");
        assert_eq!(f.close_label(&c), "Close (esc)");
    }

    #[test]
    fn test_custom_formatter_overrides_one_label() {
        #[derive(Debug)]
        struct Terse;
        impl Formatters for Terse {
            fn next_title(&self, _ctx: &FormatContext) -> String {
                "»".to_string()
            }
        }

        let f = Terse;
        assert_eq!(f.next_title(&ctx(0, 2)), "»");
        assert_eq!(f.prev_title(&ctx(0, 2)), "Previous (left arrow)");
    }
}
