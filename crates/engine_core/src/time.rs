//! Frame timing for the display-refresh loop.

use std::time::{Duration, Instant};

/// Default upper bound on a single frame delta (seconds).
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.1;

/// Monotonic per-frame delta source owned by the frame scheduler.
///
/// Deltas are capped so a window drag or debugger stall does not feed one huge
/// step into physics and smoothing.
#[derive(Debug)]
pub struct FrameClock {
    /// Time of the last frame.
    last_frame: Instant,
    /// Capped duration of the last frame.
    delta: Duration,
    /// Upper bound applied to every delta.
    max_delta: Duration,
    /// Frame count since creation.
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    /// Create a clock whose deltas never exceed `max_delta_seconds`.
    ///
    /// Negative caps become zero. Caps too large for a `Duration` fall back to
    /// [`DEFAULT_MAX_FRAME_DELTA`].
    pub fn new(max_delta_seconds: f32) -> Self {
        let max_delta = Duration::try_from_secs_f32(max_delta_seconds.max(0.0)).unwrap_or_else(|e| {
            log::warn!(
                "frame delta cap {} unusable ({}), using {}s",
                max_delta_seconds,
                e,
                DEFAULT_MAX_FRAME_DELTA
            );
            Duration::from_secs_f32(DEFAULT_MAX_FRAME_DELTA)
        });
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            max_delta,
            frame_count: 0,
        }
    }

    /// Sample the clock at the start of a new frame and return the capped delta in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        if raw > self.max_delta {
            log::debug!(
                "frame delta {:.3}s capped to {:.3}s",
                raw.as_secs_f32(),
                self.max_delta.as_secs_f32()
            );
            self.delta = self.max_delta;
        } else {
            self.delta = raw;
        }
        self.delta.as_secs_f32()
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the delta cap in seconds.
    pub fn max_delta_seconds(&self) -> f32 {
        self.max_delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_counts_frames_and_is_non_negative() {
        let mut clock = FrameClock::default();
        let dt = clock.update();
        assert!(dt >= 0.0);
        clock.update();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn delta_is_capped() {
        let mut clock = FrameClock::new(0.0);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.update(), 0.0);
        assert_eq!(clock.delta_seconds(), 0.0);
    }

    #[test]
    fn negative_cap_is_clamped_to_zero() {
        let clock = FrameClock::new(-1.0);
        assert_eq!(clock.max_delta_seconds(), 0.0);
    }

    #[test]
    fn oversized_or_infinite_cap_uses_default() {
        for cap in [1e20, f32::INFINITY] {
            let clock = FrameClock::new(cap);
            assert!((clock.max_delta_seconds() - DEFAULT_MAX_FRAME_DELTA).abs() < 1e-6);
        }
        let clock = FrameClock::new(f32::NAN);
        assert_eq!(clock.max_delta_seconds(), 0.0);
    }
}
