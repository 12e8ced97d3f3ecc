//! Idle activity detection.
//!
//! The detector is driven by the host: activity events are scheduled into a
//! [`FrameCoalescer`] and evaluated at most once per frame, and the inactivity timer is
//! a single [`IdleTimer`] slot whose tokens go stale as soon as a newer timer starts or
//! the detector is detached.

use std::time::{Duration, Instant};

use tracing::debug;

/// Inactivity window after which controls may hide
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Minimum spacing between two coalesced activity evaluations (~60fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    PressStart,
    PointerMove,
    TouchMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    Active,
    Idle,
}

/// Single-slot frame scheduler.
///
/// Scheduling replaces whatever is pending; `flush` hands out the latest value at most
/// once per `interval`.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    last_flush: Option<Instant>,
    interval: Duration,
}

impl<T> FrameCoalescer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            pending: None,
            last_flush: None,
            interval,
        }
    }

    pub fn schedule(&mut self, value: T) {
        self.pending = Some(value);
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if a frame has elapsed since the last flush
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        self.pending.as_ref()?;
        if let Some(last) = self.last_flush {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_flush = Some(now);
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Handle of a scheduled timer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// One pending deadline at a time. Starting a timer invalidates the previous token.
#[derive(Debug, Clone, Default)]
pub struct IdleTimer {
    generation: u64,
    pending: Option<(TimerToken, Instant)>,
}

impl IdleTimer {
    pub fn start(&mut self, now: Instant, timeout: Duration) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.pending = Some((token, now + timeout));
        token
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending.map(|(token, _)| token)
    }

    /// Token of the pending timer if its deadline has passed
    pub fn due(&self, now: Instant) -> Option<TimerToken> {
        self.pending
            .filter(|(_, deadline)| now >= *deadline)
            .map(|(token, _)| token)
    }

    /// Consume the pending timer if `token` is still the current one
    pub fn claim(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some((current, _)) if current == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdleDetector {
    state: IdleState,
    attached: bool,
    timeout: Duration,
    timer: IdleTimer,
    activity: FrameCoalescer<ActivityKind>,
}

impl IdleDetector {
    /// Touch hosts start idle since they have no hover signal
    pub fn new(initially_idle: bool) -> Self {
        Self::with_timing(initially_idle, IDLE_TIMEOUT, FRAME_INTERVAL)
    }

    pub fn with_timing(initially_idle: bool, timeout: Duration, frame: Duration) -> Self {
        Self {
            state: if initially_idle {
                IdleState::Idle
            } else {
                IdleState::Active
            },
            attached: false,
            timeout,
            timer: IdleTimer::default(),
            activity: FrameCoalescer::new(frame),
        }
    }

    /// Start listening for activity
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening and drop any pending timer or coalesced activity
    pub fn detach(&mut self) {
        self.attached = false;
        self.timer.cancel();
        self.activity.cancel();
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[inline]
    pub fn state(&self) -> IdleState {
        self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == IdleState::Idle
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.pending()
    }

    pub fn has_pending_activity(&self) -> bool {
        self.activity.is_pending()
    }

    /// Queue an activity event for the next frame
    pub fn record(&mut self, kind: ActivityKind) {
        if self.attached {
            self.activity.schedule(kind);
        }
    }

    /// Evaluate the coalesced activity for this frame. Returns the new state on a transition.
    pub fn flush_frame(&mut self, now: Instant) -> Option<IdleState> {
        if !self.attached {
            return None;
        }
        let kind = self.activity.flush(now)?;
        self.timer.start(now, self.timeout);
        debug!(?kind, "Activity detected, idle timer restarted");

        if self.state == IdleState::Idle {
            self.state = IdleState::Active;
            return Some(IdleState::Active);
        }
        None
    }

    /// Fire the timer if its deadline has passed
    pub fn poll_timer(&mut self, now: Instant) -> Option<IdleState> {
        let token = self.timer.due(now)?;
        self.fire(token)
    }

    /// Timer callback. Stale tokens and callbacks after detach are ignored.
    pub fn fire(&mut self, token: TimerToken) -> Option<IdleState> {
        if !self.attached || !self.timer.claim(token) {
            return None;
        }
        if self.state == IdleState::Active {
            self.state = IdleState::Idle;
            return Some(IdleState::Idle);
        }
        None
    }
}
