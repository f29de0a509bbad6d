use std::time::{Duration, Instant};

use log::warn;

/// Stopwatch accumulating time across start/stop pairs.
#[derive(Debug, Clone, Default)]
pub struct TimeCounter {
    started: Option<Instant>,
    elapsed: Duration,
}

impl TimeCounter {
    pub fn started() -> Self {
        let mut counter = Self::default();
        counter.start();
        counter
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    /// Zero the counter; a running counter keeps running from now.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.started.map_or(Duration::ZERO, |s| s.elapsed())
    }
}

mod defaults {
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
}

/// Turns frame durations into a whole number of fixed physics ticks.
///
/// In coupled mode every frame is exactly one tick, whatever its duration.
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: Duration,
    accumulator: Duration,
    max_ticks: u32,
    coupled: bool,
    dropped: u64,
}

impl FixedStep {
    pub fn new(dt: f64) -> Self {
        assert!(dt > 0.);
        Self {
            dt: Duration::from_secs_f64(dt),
            accumulator: Duration::ZERO,
            max_ticks: defaults::MAX_TICKS_PER_FRAME,
            coupled: false,
            dropped: 0,
        }
    }

    pub fn coupled(dt: f64) -> Self {
        Self {
            coupled: true,
            ..Self::new(dt)
        }
    }

    pub fn with_max_ticks(self, max_ticks: u32) -> Self {
        assert!(max_ticks > 0);
        Self { max_ticks, ..self }
    }

    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn is_coupled(&self) -> bool {
        self.coupled
    }

    /// Ticks thrown away because a frame took too long.
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped
    }

    /// Number of ticks to run for a frame that lasted `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.coupled {
            return 1;
        }
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks > self.max_ticks {
            let dropped = ticks - self.max_ticks;
            warn!("frame too long, dropping {dropped} ticks");
            self.dropped += u64::from(dropped);
            ticks = self.max_ticks;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod timing_tests {
    use super::*;

    #[test]
    fn counter_accumulates() {
        let mut counter = TimeCounter::default();
        assert!(!counter.is_running());
        assert_eq!(counter.elapsed(), Duration::ZERO);

        counter.start();
        std::thread::sleep(Duration::from_millis(5));
        counter.stop();
        let first = counter.elapsed();
        assert!(first >= Duration::from_millis(5));

        // stopped counters don't move
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(counter.elapsed(), first);

        counter.reset();
        assert_eq!(counter.elapsed(), Duration::ZERO);
    }

    #[test]
    fn coupled_is_one_per_frame() {
        let mut step = FixedStep::coupled(1. / 60.);
        assert_eq!(step.advance(Duration::ZERO), 1);
        assert_eq!(step.advance(Duration::from_millis(100)), 1);
    }

    #[test]
    fn accumulator_carries_remainder() {
        let mut step = FixedStep::new(0.01);
        assert_eq!(step.advance(Duration::from_millis(5)), 0);
        assert_eq!(step.advance(Duration::from_millis(7)), 1);
        assert_eq!(step.advance(Duration::from_millis(8)), 1);
        assert_eq!(step.advance(Duration::from_millis(30)), 3);
    }

    #[test]
    fn tick_count_independent_of_frame_rate() {
        // same wall time split into uneven frames gives the same tick count
        let frames_a = [16u64, 17, 16, 17, 16, 18, 16, 17, 16, 15];
        let frames_b = [33u64, 33, 34, 30, 34];
        let total_a: u64 = frames_a.iter().sum();
        let total_b: u64 = frames_b.iter().sum();
        assert_eq!(total_a, total_b);

        let mut a = FixedStep::new(0.01);
        let mut b = FixedStep::new(0.01);
        let ticks_a: u32 = frames_a
            .iter()
            .map(|&ms| a.advance(Duration::from_millis(ms)))
            .sum();
        let ticks_b: u32 = frames_b
            .iter()
            .map(|&ms| b.advance(Duration::from_millis(ms)))
            .sum();
        assert_eq!(ticks_a, ticks_b);
        assert_eq!(ticks_a, 16);
    }

    #[test]
    fn caps_ticks_per_frame() {
        let mut step = FixedStep::new(0.01).with_max_ticks(4);
        assert_eq!(step.advance(Duration::from_millis(100)), 4);
        assert_eq!(step.dropped_ticks(), 6);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
    }
}
