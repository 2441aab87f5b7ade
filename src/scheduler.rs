use std::time::{Duration, Instant};

/// Fires every `period`, first firing one period after it is started.
///
/// Polled from the main loop; a late poll fires once and re-arms from now
/// rather than replaying every missed period.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn start(period: Duration, now: Instant) -> Self {
        IntervalTimer {
            period,
            next_due: Some(now + period),
        }
    }

    /// True if the timer fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }
}

/// A one-shot "run before the next repaint" request, re-armed by its owner
/// after every frame.
#[derive(Debug, Clone)]
pub struct FrameRequest {
    frame_interval: Duration,
    pending: Option<Instant>,
    cancelled: bool,
}

impl FrameRequest {
    pub fn new(fps: u32) -> Self {
        FrameRequest {
            frame_interval: Duration::from_secs_f64(1.0 / fps.clamp(1, 120) as f64),
            pending: None,
            cancelled: false,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Arm for the next repaint after `now`. Ignored once cancelled.
    pub fn request(&mut self, now: Instant) {
        if !self.cancelled {
            self.pending = Some(now + self.frame_interval);
        }
    }

    /// Consumes the request if it is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending = None;
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}
