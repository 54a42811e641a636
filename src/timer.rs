/// Accumulates frame deltas against a fixed interval.
///
/// The check happens before the accumulation: once the accumulated time
/// exceeds the interval, the next tick fires and resets to zero, and that
/// tick's delta is dropped. A single oversized delta can therefore fire at
/// most once, on the following tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    elapsed: f64,
    interval: f64,
}

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            elapsed: 0.0,
            interval: interval_ms,
        }
    }

    /// Timer for a sprite animated at `fps` frames per second
    pub fn from_fps(fps: f64) -> Self {
        Self::new(1000.0 / fps)
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances the timer, returning true on the tick it fires
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            true
        } else {
            self.elapsed += delta_ms;
            false
        }
    }
}
