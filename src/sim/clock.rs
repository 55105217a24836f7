//! Wall-clock delta tracking
//!
//! The clock measures elapsed time since `start()` and hands out the
//! difference to the previous reading on every `tick()`. Time itself comes
//! from an injected [`TimeSource`] so the simulation stays deterministic
//! under test.

const NANOS_PER_SEC: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;

/// A point in time (or a span) split into whole seconds and nanoseconds.
///
/// Only built through [`Timestamp::new`], which keeps `nanos` below one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    secs: u64,
    nanos: u32,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { secs: 0, nanos: 0 };

    pub fn new(secs: u64, nanos: u32) -> Self {
        Self {
            secs: secs.saturating_add((nanos / NANOS_PER_SEC) as u64),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    pub fn secs(&self) -> u64 {
        self.secs
    }

    /// Sub-second part, always < 1e9
    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Build from fractional milliseconds (e.g. `Date.now()`)
    pub fn from_millis_f64(ms: f64) -> Self {
        let ms = ms.max(0.0);
        let secs = (ms / 1000.0).floor();
        let nanos = ((ms - secs * 1000.0) * NANOS_PER_MILLI as f64) as u32;
        Self::new(secs as u64, nanos)
    }

    /// Span from `earlier` to `self`.
    ///
    /// Borrows a second when the nanosecond part would go negative. If
    /// `earlier` is actually later (wall clocks can step backwards) the span
    /// is zero.
    pub fn elapsed_since(self, earlier: Timestamp) -> Timestamp {
        if self <= earlier {
            return Timestamp::ZERO;
        }
        if self.nanos < earlier.nanos {
            Timestamp {
                secs: self.secs - earlier.secs - 1,
                nanos: self.nanos + NANOS_PER_SEC - earlier.nanos,
            }
        } else {
            Timestamp {
                secs: self.secs - earlier.secs,
                nanos: self.nanos - earlier.nanos,
            }
        }
    }

    /// Seconds with the sub-second part truncated to whole milliseconds
    pub fn as_secs_f32(self) -> f32 {
        self.secs as f32 + (self.nanos / NANOS_PER_MILLI) as f32 / 1000.0
    }
}

/// Something that can tell the current wall-clock time
pub trait TimeSource {
    fn now(&mut self) -> Timestamp;
}

impl<S: TimeSource + ?Sized> TimeSource for &mut S {
    fn now(&mut self) -> Timestamp {
        (**self).now()
    }
}

impl<S: TimeSource + ?Sized> TimeSource for Box<S> {
    fn now(&mut self) -> Timestamp {
        (**self).now()
    }
}

/// Per-tick delta producer
#[derive(Debug, Clone)]
pub struct Clock<S> {
    source: S,
    start: Timestamp,
    last_elapsed: Timestamp,
}

impl<S: TimeSource> Clock<S> {
    /// Create a clock and start it immediately
    pub fn new(source: S) -> Self {
        let mut clock = Self {
            source,
            start: Timestamp::ZERO,
            last_elapsed: Timestamp::ZERO,
        };
        clock.start();
        clock
    }

    /// Record the start time and forget previous readings
    pub fn start(&mut self) {
        self.start = self.source.now();
        self.last_elapsed = Timestamp::ZERO;
    }

    /// Seconds since the previous tick.
    ///
    /// The first tick after `start()` returns the whole time since start,
    /// since the previous reading is zero.
    pub fn tick(&mut self) -> f32 {
        let now = self.source.now();
        let elapsed = now.elapsed_since(self.start);
        let delta = elapsed.elapsed_since(self.last_elapsed);
        self.last_elapsed = self.last_elapsed.max(elapsed);
        delta.as_secs_f32()
    }

    /// Time between `start()` and the latest tick
    pub fn elapsed(&self) -> Timestamp {
        self.last_elapsed
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Replays a fixed list of readings, repeating the last one
    struct Scripted {
        readings: Vec<Timestamp>,
        next: usize,
    }

    impl Scripted {
        fn new(readings: &[(u64, u32)]) -> Self {
            Self {
                readings: readings.iter().map(|&(s, n)| Timestamp::new(s, n)).collect(),
                next: 0,
            }
        }
    }

    impl TimeSource for Scripted {
        fn now(&mut self) -> Timestamp {
            let t = self.readings[self.next.min(self.readings.len() - 1)];
            self.next += 1;
            t
        }
    }

    #[test]
    fn test_elapsed_borrows_a_second() {
        let later = Timestamp::new(11, 100_000_000);
        let earlier = Timestamp::new(10, 900_000_000);
        assert_eq!(later.elapsed_since(earlier), Timestamp::new(0, 200_000_000));
    }

    #[test]
    fn test_new_carries_excess_nanos() {
        let t = Timestamp::new(1, 4_000_000_000);
        assert_eq!((t.secs(), t.nanos()), (5, 0));
        // Earlier stamp is really 5s, so the span saturates instead of underflowing
        assert_eq!(Timestamp::new(2, 0).elapsed_since(t), Timestamp::ZERO);
        assert_eq!(
            Timestamp::new(7, 500_000_000).elapsed_since(t),
            Timestamp::new(2, 500_000_000)
        );
    }

    #[test]
    fn test_clock_with_unnormalized_source_readings() {
        // A source that hands out overflowing nanosecond counts
        let mut clock = Clock::new(Scripted::new(&[(1, 4_000_000_000), (2, 0), (5, 1_500_000_000)]));
        assert_eq!(clock.tick(), 0.0);
        assert!((clock.tick() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_saturates_when_backwards() {
        let later = Timestamp::new(5, 0);
        let earlier = Timestamp::new(6, 0);
        assert_eq!(later.elapsed_since(earlier), Timestamp::ZERO);
    }

    #[test]
    fn test_as_secs_truncates_to_millis() {
        let t = Timestamp::new(2, 123_999_999);
        assert!((t.as_secs_f32() - 2.123).abs() < 1e-6);
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(Timestamp::from_millis_f64(1500.0), Timestamp::new(1, 500_000_000));
        assert_eq!(Timestamp::from_millis_f64(-3.0), Timestamp::ZERO);
    }

    #[test]
    fn test_first_tick_returns_time_since_start() {
        // start at 100.0s, ticks at 100.5s, 100.75s, 101.25s
        let mut clock = Clock::new(Scripted::new(&[
            (100, 0),
            (100, 500_000_000),
            (100, 750_000_000),
            (101, 250_000_000),
        ]));
        assert!((clock.tick() - 0.5).abs() < 1e-6);
        assert!((clock.tick() - 0.25).abs() < 1e-6);
        assert!((clock.tick() - 0.5).abs() < 1e-6);
        assert_eq!(clock.elapsed(), Timestamp::new(1, 250_000_000));
    }

    #[test]
    fn test_restart_resets_previous_reading() {
        let mut clock = Clock::new(Scripted::new(&[(0, 0), (3, 0), (10, 0), (12, 0)]));
        assert!((clock.tick() - 3.0).abs() < 1e-6);
        clock.start();
        // Full time since the new start, not since the old tick
        assert!((clock.tick() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_step_yields_zero_and_stays_monotonic() {
        let mut clock = Clock::new(Scripted::new(&[(10, 0), (12, 0), (11, 0), (13, 0)]));
        assert!((clock.tick() - 2.0).abs() < 1e-6);
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.elapsed(), Timestamp::new(2, 0));
        assert!((clock.tick() - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_delta_never_negative(
            s1 in 0u64..1_000_000, n1 in 0u32..NANOS_PER_SEC,
            ds in 0u64..1_000, n2 in 0u32..NANOS_PER_SEC,
        ) {
            let earlier = Timestamp::new(s1, n1);
            let mut later = Timestamp::new(s1 + ds, n2);
            if later < earlier {
                later = earlier;
            }
            let span = later.elapsed_since(earlier);
            prop_assert!(span.nanos < NANOS_PER_SEC);
            prop_assert!(span.as_secs_f32() >= 0.0);
            // Adding the span back recovers the later stamp
            let total = earlier.nanos as u64 + span.nanos as u64;
            prop_assert_eq!(earlier.secs + span.secs + total / NANOS_PER_SEC as u64, later.secs);
            prop_assert_eq!((total % NANOS_PER_SEC as u64) as u32, later.nanos);
        }

        #[test]
        fn prop_clock_ticks_non_negative(steps in proptest::collection::vec((0u64..3, 0u32..NANOS_PER_SEC), 1..20)) {
            let mut readings = vec![(1_000u64, 0u32)];
            readings.extend(steps.iter().map(|&(s, n)| (1_000 + s, n)));
            let mut clock = Clock::new(Scripted::new(&readings));
            let mut last = Timestamp::ZERO;
            for _ in 0..steps.len() {
                prop_assert!(clock.tick() >= 0.0);
                prop_assert!(clock.elapsed() >= last);
                last = clock.elapsed();
            }
        }
    }
}
