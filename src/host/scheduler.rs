use crate::engine::scheduler::FrameScheduler;

/// Scheduler for hosts that drive frames themselves (offline rendering, tests).
///
/// It only records requests; the host polls [`ManualScheduler::take_request`] and calls
/// `on_frame` when it returns `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Create a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the outstanding request. Returns `false` when none is pending.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests issued so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests cancelled so far.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        if std::mem::take(&mut self.pending) {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;
