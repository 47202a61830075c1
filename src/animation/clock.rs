// src/animation/clock.rs
//
// Frame timing for the controller. Time is reported in milliseconds.

use std::cell::Cell;
use std::time::Instant;

/// Nominal 60 Hz frame length in ms.
pub const FRAME_MS: f32 = 1000.0 / 60.0;

pub trait Clock {
    /// Milliseconds since the clock started.
    fn now_ms(&self) -> f64;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and offline rendering.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Turns clock readings into capped frame deltas.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<f64>,
    max_dt: f32,
}

impl FrameTimer {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Delta since the previous call. The first frame after a reset
    /// reports one nominal frame.
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now - last).max(0.0) as f32).min(self.max_dt),
            None => FRAME_MS.min(self.max_dt),
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame, e.g. while paused.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
