//=========================================================================
// Frame Timing
//=========================================================================
//
// Monotonic frame-duration measurement. The reported duration is the
// average of the last `NUM_SAMPLES` frame deltas; once the window is
// full, a delta more than `SPIKE_FACTOR` times the current average is
// treated as a hitch (breakpoint, window drag) and not recorded. After
// `MAX_SPIKES` hitches in a row the slowdown is taken as the new normal
// and the window restarts from it.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== Constants ===========================================================

const NUM_SAMPLES: usize = 60;
const SPIKE_FACTOR: f64 = 10.0;
const MAX_SPIKES: u32 = 8;

//=== FrameTimer ==========================================================

/// Rolling-average frame timer.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<Instant>,
    samples: [f64; NUM_SAMPLES],
    cursor: usize,
    count: usize,
    spikes: u32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: None,
            samples: [0.0; NUM_SAMPLES],
            cursor: 0,
            count: 0,
            spikes: 0,
        }
    }

    /// Marks the start of a frame using the monotonic clock.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Marks the start of a frame at `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last {
            let delta = now.saturating_duration_since(last).as_secs_f64();
            self.record(delta);
        }
        self.last = Some(now);
    }

    /// Averaged frame duration, or zero before two ticks have happened.
    pub fn frame_duration(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let sum: f64 = self.samples[..self.count].iter().sum();
        Duration::from_secs_f64(sum / self.count as f64)
    }

    /// Forgets all samples (e.g. after the app was suspended).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn record(&mut self, delta: f64) {
        if self.count == NUM_SAMPLES {
            let average = self.frame_duration().as_secs_f64();
            if average > 0.0 && delta > average * SPIKE_FACTOR {
                self.spikes += 1;
                if self.spikes < MAX_SPIKES {
                    return;
                }
                self.cursor = 0;
                self.count = 0;
            }
        }
        self.spikes = 0;
        self.samples[self.cursor] = delta;
        self.cursor = (self.cursor + 1) % NUM_SAMPLES;
        self.count = (self.count + 1).min(NUM_SAMPLES);
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn zero_before_second_tick() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.frame_duration(), Duration::ZERO);
        timer.tick_at(Instant::now());
        assert_eq!(timer.frame_duration(), Duration::ZERO);
    }

    #[test]
    fn averages_deltas() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.tick_at(start);
        timer.tick_at(start + ms(10));
        timer.tick_at(start + ms(30));

        let avg = timer.frame_duration().as_secs_f64();
        assert!((avg - 0.015).abs() < 1e-6, "got {}", avg);
    }

    #[test]
    fn ignores_spikes_once_warm() {
        let mut timer = FrameTimer::new();
        let mut now = Instant::now();
        timer.tick_at(now);
        for _ in 0..NUM_SAMPLES {
            now += ms(16);
            timer.tick_at(now);
        }
        now += Duration::from_secs(2);
        timer.tick_at(now);

        let avg = timer.frame_duration().as_secs_f64();
        assert!((avg - 0.016).abs() < 1e-6, "spike leaked into average: {}", avg);
    }

    #[test]
    fn sustained_slowdown_is_adopted() {
        let mut timer = FrameTimer::new();
        let mut now = Instant::now();
        timer.tick_at(now);
        for _ in 0..NUM_SAMPLES {
            now += ms(16);
            timer.tick_at(now);
        }
        for _ in 0..(MAX_SPIKES as usize + 4) {
            now += ms(200);
            timer.tick_at(now);
        }

        let avg = timer.frame_duration().as_secs_f64();
        assert!((avg - 0.2).abs() < 1e-6, "stuck at old average: {}", avg);
    }

    #[test]
    fn reset_clears_samples() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.tick_at(start);
        timer.tick_at(start + ms(5));
        timer.reset();
        assert_eq!(timer.frame_duration(), Duration::ZERO);
    }
}
