//! Frame throttle - run a task at most once per interval on the host's frame tick.
//!
//! The throttle never runs anything itself. It asks the host for a frame
//! (or a timer followed by a frame) and tells the caller, when the frame
//! arrives, whether the task should run now. Only one request is ever
//! outstanding.

/// Handle for a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Handle for a started timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// The host's scheduling primitives.
///
/// After `request_frame` the host calls back with the token on its next
/// render tick; after `start_timer` it calls back once the delay elapses.
pub trait FrameHost {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;

    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);

    fn start_timer(&mut self, delay_ms: u64) -> TimerToken;
    fn cancel_timer(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    Timer(TimerToken),
    Frame(FrameToken),
}

/// Rate limiter that coalesces run requests onto frame ticks.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    min_interval_ms: u64,
    last_run_ms: Option<u64>,
    pending: Pending,
}

impl FrameThrottle {
    /// Create a throttle allowing one run per `min_interval_ms`.
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_run_ms: None,
            pending: Pending::Idle,
        }
    }

    /// Ask for a run.
    ///
    /// Requests a frame directly if the interval has elapsed, otherwise a
    /// timer for the remainder. Does nothing if a request is outstanding.
    pub fn schedule<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.pending != Pending::Idle {
            return;
        }

        let now = host.now_ms();
        let wait = self
            .last_run_ms
            .map(|last| self.min_interval_ms.saturating_sub(now.saturating_sub(last)))
            .unwrap_or(0);

        self.pending = if wait == 0 {
            Pending::Frame(host.request_frame())
        } else {
            Pending::Timer(host.start_timer(wait))
        };
    }

    /// Host callback for an elapsed timer; hands off to the next frame.
    pub fn on_timer<H: FrameHost + ?Sized>(&mut self, token: TimerToken, host: &mut H) {
        if self.pending == Pending::Timer(token) {
            self.pending = Pending::Frame(host.request_frame());
        }
    }

    /// Host callback for a frame tick.
    ///
    /// Returns `true` if the caller should run its task now.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: u64) -> bool {
        if self.pending != Pending::Frame(token) {
            return false;
        }
        self.pending = Pending::Idle;
        self.last_run_ms = Some(now_ms);
        true
    }

    /// Cancel any outstanding request.
    pub fn cancel<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        match std::mem::replace(&mut self.pending, Pending::Idle) {
            Pending::Idle => {}
            Pending::Timer(token) => host.cancel_timer(token),
            Pending::Frame(token) => host.cancel_frame(token),
        }
    }

    /// Whether a frame or timer is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.pending != Pending::Idle
    }

    /// Time of the last run.
    pub fn last_run_ms(&self) -> Option<u64> {
        self.last_run_ms
    }
}
