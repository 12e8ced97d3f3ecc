//! Host environment of the terminal carousel

use carousel_core::{Environment, FocusId};
use tracing::debug;

/// Terminal environment. Touch support comes from configuration since terminals
/// do not report it.
#[derive(Debug, Default)]
pub struct TerminalEnv {
    touch: bool,
    focused: Option<FocusId>,
}

impl TerminalEnv {
    pub fn new(touch: bool) -> Self {
        Self {
            touch,
            focused: None,
        }
    }
}

impl Environment for TerminalEnv {
    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    /// The terminal screen always hosts the carousel
    fn has_container(&self) -> bool {
        true
    }

    fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    fn focus(&mut self, target: FocusId) {
        debug!(?target, "Focus moved");
        self.focused = Some(target);
    }
}
