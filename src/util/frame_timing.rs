//! Frame clock and per-frame timing snapshots.

use web_time::Instant;

/// Timing snapshot handed to the engine once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Number of ticks before this one.
    pub frame: u64,
}

impl FrameTick {
    /// Tick at an explicit time, for hosts with their own clock and tests.
    #[must_use]
    pub fn at(elapsed: f32, dt: f32, frame: u64) -> Self {
        Self { elapsed, dt, frame }
    }
}

/// Weight of the newest frame in the smoothed frame rate.
const FPS_SMOOTHING: f32 = 0.05;

/// Wall clock that turns into one [`FrameTick`] per rendered frame and keeps
/// a smoothed frame rate for diagnostics.
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame: u64,
    fps: f32,
}

impl FrameClock {
    /// Clock starting now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame: 0,
            fps: 60.0,
        }
    }

    /// Advance by one frame.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        if dt > 0.0 {
            self.fps += (dt.recip() - self.fps) * FPS_SMOOTHING;
        }

        let tick = FrameTick::at(now.duration_since(self.start).as_secs_f32(), dt, self.frame);
        self.frame += 1;
        tick
    }

    /// Exponentially smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Ticks so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_count_up_and_never_run_backwards() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!((first.frame, second.frame), (0, 1));
        assert!(second.elapsed >= first.elapsed);
        assert!(second.dt >= 0.0);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn explicit_ticks_carry_their_fields() {
        let tick = FrameTick::at(2.5, 0.016, 9);
        assert_eq!(tick.elapsed, 2.5);
        assert_eq!(tick.frame, 9);
    }
}
