// Animation clock
// One-shot sweep from 0 to 360: ticks stop at the end instead of wrapping

use std::time::Duration;

use log::{trace, warn};

use crate::signal::CYCLE;

pub const DEGREES_PER_TICK: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockState {
    pub elapsed_angle_degrees: f64,
    pub running: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    state: ClockState,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.state.elapsed_angle_degrees
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    // A finished sweep starts over from zero
    pub fn start(&mut self) {
        if self.state.elapsed_angle_degrees >= CYCLE {
            self.state.elapsed_angle_degrees = 0.0;
        }
        self.state.running = true;
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }

    // Start/stop button, returns the new running flag
    pub fn toggle(&mut self) -> bool {
        if self.state.running {
            self.stop();
        } else {
            self.start();
        }
        self.state.running
    }

    // Returns whether the clock advanced
    pub fn tick(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        let next = (self.state.elapsed_angle_degrees + DEGREES_PER_TICK).min(CYCLE);
        self.state.elapsed_angle_degrees = next;
        if next >= CYCLE {
            trace!("sweep finished, clock stopped at {}", next);
            self.state.running = false;
        }
        true
    }

    pub fn reset(&mut self) {
        self.state = ClockState::default();
    }

    // Slider drag, rounds to a whole degree and leaves the running flag alone
    pub fn set_time_degrees(&mut self, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value };
        self.state.elapsed_angle_degrees = value.round().clamp(0.0, CYCLE);
    }
}

/// Fixed-step accumulator. Wall-clock deltas go in, whole logical ticks come out.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    interval: Duration,
    accumulated: Duration,
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(interval: Duration, max_ticks: u32) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += delta;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
            if ticks == self.max_ticks {
                break;
            }
        }
        // Backlog after a stall would replay a burst of frames, drop it
        if self.accumulated >= self.interval {
            warn!(
                "animation loop fell behind, dropping {:?} of backlog",
                self.accumulated
            );
            self.accumulated = Duration::ZERO;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sweep_auto_stops() {
        let mut clock = AnimationClock::new();
        clock.start();
        for _ in 0..360 {
            assert!(clock.tick());
        }
        assert_eq!(clock.elapsed(), 360.0);
        assert!(!clock.is_running());

        // 361st tick does nothing
        assert!(!clock.tick());
        assert_eq!(clock.elapsed(), 360.0);
    }

    #[test]
    fn still_running_one_tick_before_the_end() {
        let mut clock = AnimationClock::new();
        clock.start();
        for _ in 0..359 {
            clock.tick();
        }
        assert_eq!(clock.elapsed(), 359.0);
        assert!(clock.is_running());
    }

    #[test]
    fn stopped_clock_ignores_ticks() {
        let mut clock = AnimationClock::new();
        assert!(!clock.tick());
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn start_after_finished_sweep_rewinds() {
        let mut clock = AnimationClock::new();
        clock.set_time_degrees(360.0);
        clock.start();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(clock.is_running());
    }

    #[test]
    fn start_midway_keeps_position() {
        let mut clock = AnimationClock::new();
        clock.set_time_degrees(120.0);
        assert!(clock.toggle());
        assert_eq!(clock.elapsed(), 120.0);
        assert!(!clock.toggle());
        assert_eq!(clock.elapsed(), 120.0);
    }

    #[test]
    fn reset_from_any_state() {
        let mut clock = AnimationClock::new();
        clock.start();
        for _ in 0..42 {
            clock.tick();
        }
        clock.reset();
        assert_eq!(clock.state(), ClockState::default());

        clock.set_time_degrees(360.0);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_running());
    }

    #[test]
    fn set_time_rounds_and_clamps() {
        let mut clock = AnimationClock::new();
        clock.start();
        clock.set_time_degrees(89.6);
        assert_eq!(clock.elapsed(), 90.0);
        assert!(clock.is_running());
        clock.set_time_degrees(999.0);
        assert_eq!(clock.elapsed(), 360.0);
        clock.set_time_degrees(-4.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn accumulator_consumes_whole_intervals() {
        let mut step = FixedTimestep::new(Duration::from_millis(10), 8);
        assert_eq!(step.advance(Duration::from_millis(4)), 0);
        assert_eq!(step.advance(Duration::from_millis(4)), 0);
        assert_eq!(step.advance(Duration::from_millis(4)), 1);
        assert_eq!(step.advance(Duration::from_millis(25)), 2);
        // 7ms left over from before
        assert_eq!(step.advance(Duration::from_millis(3)), 1);
    }

    #[test]
    fn accumulator_drops_backlog_past_the_cap() {
        let mut step = FixedTimestep::new(Duration::from_millis(10), 3);
        assert_eq!(step.advance(Duration::from_secs(1)), 3);
        assert_eq!(step.advance(Duration::from_millis(5)), 0);
    }
}
