//! Fakes for the host collaborators

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use crate::host::{Environment, FocusId, Pager};
use crate::options::ResolvedTrack;

pub const FRAME_FOCUS: FocusId = FocusId(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerCommand {
    Prev,
    Next,
    Sync(usize),
}

#[derive(Debug, Default)]
pub struct PagerLog {
    pub commands: Vec<PagerCommand>,
    pub configured: Vec<(bool, usize)>,
    settled: VecDeque<Vec<usize>>,
}

impl PagerLog {
    /// Queue a settle notification for the next poll
    pub fn settle(&mut self, indices: Vec<usize>) {
        self.settled.push_back(indices);
    }

    pub fn moves(&self) -> Vec<PagerCommand> {
        self.commands
            .iter()
            .copied()
            .filter(|c| !matches!(c, PagerCommand::Sync(_)))
            .collect()
    }
}

pub struct FakePager {
    pub log: Rc<RefCell<PagerLog>>,
}

impl FakePager {
    pub fn new() -> (Self, Rc<RefCell<PagerLog>>) {
        let log = Rc::new(RefCell::new(PagerLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl Pager for FakePager {
    fn prev(&mut self) {
        self.log.borrow_mut().commands.push(PagerCommand::Prev);
    }

    fn next(&mut self) {
        self.log.borrow_mut().commands.push(PagerCommand::Next);
    }

    fn sync_index(&mut self, index: usize) {
        self.log.borrow_mut().commands.push(PagerCommand::Sync(index));
    }

    fn configure(&mut self, track: &ResolvedTrack, view_count: usize) {
        self.log
            .borrow_mut()
            .configured
            .push((track.infinite, view_count));
    }

    fn poll(&mut self, _now: Instant) -> Option<Vec<usize>> {
        self.log.borrow_mut().settled.pop_front()
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn focus_surface(&self) -> FocusId {
        FRAME_FOCUS
    }
}

#[derive(Debug, Default)]
pub struct EnvLog {
    pub focused: Option<FocusId>,
    pub focus_calls: usize,
}

pub struct FakeEnv {
    pub touch: bool,
    pub container: bool,
    pub log: Rc<RefCell<EnvLog>>,
}

impl FakeEnv {
    pub fn new(touch: bool) -> (Self, Rc<RefCell<EnvLog>>) {
        let log = Rc::new(RefCell::new(EnvLog::default()));
        (
            Self {
                touch,
                container: true,
                log: log.clone(),
            },
            log,
        )
    }
}

impl Environment for FakeEnv {
    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    fn has_container(&self) -> bool {
        self.container
    }

    fn focused(&self) -> Option<FocusId> {
        self.log.borrow().focused
    }

    fn focus(&mut self, target: FocusId) {
        let mut log = self.log.borrow_mut();
        log.focused = Some(target);
        log.focus_calls += 1;
    }
}
