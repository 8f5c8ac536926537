//! Entrance animation driver.
//!
//! State machine: `Idle → Running → Complete`. While running, every tick
//! asks the host scheduler for exactly one more frame; completion and reset
//! leave no frame pending. Dropping the driver cancels any pending frame so
//! a torn-down layout never receives a stale tick.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::easing::ease_out_cubic;

/// Default entrance duration.
pub const DEFAULT_DURATION_MS: f64 = 1500.0;
/// Default delay after completion before a layout counts as settled.
pub const DEFAULT_SETTLE_DELAY_MS: f64 = 500.0;

/// The host's per-frame scheduling callback.
pub trait FrameScheduler {
    type Handle: Copy + std::fmt::Debug;

    /// Schedule one frame. The host calls [`AnimationDriver::tick`] when it
    /// fires.
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancel a previously requested frame. Cancelling a frame that already
    /// fired is a no-op.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    type Handle = S::Handle;

    fn request_frame(&mut self) -> Self::Handle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: Self::Handle) {
        (**self).cancel_frame(handle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    Idle,
    Running,
    Complete,
}

impl AnimationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }
}

/// Configuration for the entrance animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Length of the 0→1 ramp (default: 1500).
    pub duration_ms: f64,
    /// Wait after completion before the layout counts as settled (default: 500).
    pub settle_delay_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl AnimationConfig {
    fn sanitized(&self) -> Self {
        let valid = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
        Self {
            duration_ms: valid(self.duration_ms, DEFAULT_DURATION_MS),
            settle_delay_ms: valid(self.settle_delay_ms, DEFAULT_SETTLE_DELAY_MS),
        }
    }
}

/// Drives a monotonic progress value in [0, 1] from wall-clock time.
pub struct AnimationDriver<S: FrameScheduler> {
    config: AnimationConfig,
    scheduler: S,
    state: AnimationState,
    start_ms: f64,
    /// `start_ms + duration_ms`; the run completes once `now` reaches it.
    end_ms: f64,
    progress: f32,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(config: AnimationConfig, scheduler: S) -> Self {
        Self {
            config: config.sanitized(),
            scheduler,
            state: AnimationState::Idle,
            start_ms: 0.0,
            end_ms: 0.0,
            progress: 0.0,
            pending: None,
        }
    }

    pub fn with_defaults(scheduler: S) -> Self {
        Self::new(AnimationConfig::default(), scheduler)
    }

    /// Begin a fresh 0→1 run at `now`. Restarts a run already in progress.
    pub fn start(&mut self, now: f64) {
        self.cancel_pending();

        let now = if now.is_finite() {
            now
        } else {
            tracing::warn!(now, "non-finite start timestamp; starting at 0");
            0.0
        };

        self.state = AnimationState::Running;
        self.start_ms = now;
        self.end_ms = now + self.config.duration_ms;
        self.progress = 0.0;
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Advance to `now` and return the eased progress.
    ///
    /// Idle ticks return 0 and complete ticks return 1; neither schedules.
    /// Progress never decreases within one run.
    pub fn tick(&mut self, now: f64) -> f32 {
        if self.state != AnimationState::Running {
            return self.progress;
        }

        self.cancel_pending();

        if !now.is_finite() {
            self.pending = Some(self.scheduler.request_frame());
            return self.progress;
        }

        if now >= self.end_ms {
            self.progress = 1.0;
            self.state = AnimationState::Complete;
        } else {
            let raw = ((now - self.start_ms) / self.config.duration_ms).clamp(0.0, 1.0);
            self.progress = self.progress.max(ease_out_cubic(raw as f32));
            self.pending = Some(self.scheduler.request_frame());
        }

        self.progress
    }

    /// Return to Idle, cancelling any pending frame.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = AnimationState::Idle;
        self.start_ms = 0.0;
        self.end_ms = 0.0;
        self.progress = 0.0;
    }

    /// True once the run has completed and the settle delay has elapsed.
    pub fn is_settled(&self, now: f64) -> bool {
        self.state == AnimationState::Complete
            && now >= self.end_ms + self.config.settle_delay_ms
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<S: FrameScheduler> Drop for AnimationDriver<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Host-driven scheduler: records requested frames until the host fires or
/// cancels them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: BTreeSet<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest pending frame, returning its handle.
    pub fn fire(&mut self) -> Option<u64> {
        self.pending.pop_first()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> u64 {
        let handle = self.next;
        self.next += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: u64) {
        self.pending.remove(&handle);
    }
}
