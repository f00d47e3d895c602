//! Start/stop plumbing shared by every host: a cancel token checked at each
//! frame and listener boundary, a registry of teardown actions, and the
//! elapsed-time clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Longest step the clock accepts; longer gaps (tab switches, debugger
/// pauses) advance time by this much only.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Single-threaded cancellation flag. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Wrap a callback so it becomes a no-op once the token is cancelled.
    pub fn guard<A>(&self, mut f: impl FnMut(A)) -> impl FnMut(A) {
        let token = self.clone();
        move |arg| {
            if !token.is_cancelled() {
                f(arg)
            }
        }
    }
}

/// Ordered list of undo actions (listener removal, timer clears, ...).
///
/// [`Teardown::run`] cancels the token first, then runs every action exactly
/// once in reverse registration order. Dropping runs it as well.
pub struct Teardown {
    token: CancelToken,
    actions: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            actions: Vec::new(),
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn defer(&mut self, action: impl FnOnce() + 'static) {
        self.actions.push(Box::new(action));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() && self.actions.is_empty()
    }

    pub fn run(&mut self) {
        self.token.cancel();
        let n = self.actions.len();
        while let Some(action) = self.actions.pop() {
            action();
        }
        if n > 0 {
            log::debug!("[lifecycle] ran {n} teardown actions");
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

/// Elapsed simulation time. Does not advance while paused.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    elapsed: Duration,
    frames: u64,
}

impl FrameClock {
    /// Advance by `dt` (capped at [`MAX_FRAME_STEP`]) and return elapsed seconds.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed += dt.min(MAX_FRAME_STEP);
        self.frames += 1;
        self.seconds()
    }

    #[inline]
    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
