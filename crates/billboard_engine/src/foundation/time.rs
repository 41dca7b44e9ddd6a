//! Time management utilities

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Monotonic media time in seconds
///
/// Pose samples and frame ticks share this clock so a frame's timestamp can be
/// handed straight to a pose query.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The clock epoch
    pub const ZERO: Self = Self(0.0);

    /// Create a timestamp from seconds since the clock epoch
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Seconds since the clock epoch
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Signed distance from `earlier` to `self`
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// Advance by a duration
    pub fn advanced_by(self, delta: Duration) -> Self {
        Self(self.0 + delta.as_secs_f64())
    }
}

/// Frame clock for the host loop
///
/// Produces the per-frame delta and the monotonic timestamp used for pose
/// queries.
pub struct FrameClock {
    epoch: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock; its epoch is now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            epoch: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame and return its timestamp
    pub fn tick(&mut self) -> Timestamp {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.now()
    }

    /// Current media time
    pub fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.last_frame.duration_since(self.epoch).as_secs_f64())
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}
