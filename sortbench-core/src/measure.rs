//! Wall-Clock Timing
//!
//! Millisecond timing of single sort calls. Resolution is whatever
//! `std::time::Instant` offers; no warm-up or clock correction is applied.

use std::time::{Duration, Instant};

/// Timer for a single measured call
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return the elapsed duration
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Convert a duration to fractional milliseconds
#[inline]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

/// Run `f` once, returning its output and the elapsed milliseconds.
///
/// The output is passed through `black_box` so the call is not optimised away.
#[inline]
pub fn time_ms<T, F>(f: F) -> (T, f64)
where
    F: FnOnce() -> T,
{
    let timer = Timer::start();
    let output = std::hint::black_box(f());
    let elapsed = timer.stop();
    (output, as_millis_f64(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_as_millis_f64() {
        assert!((as_millis_f64(Duration::from_micros(1500)) - 1.5).abs() < 1e-9);
        assert_eq!(as_millis_f64(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_time_ms_returns_output() {
        let (value, elapsed) = time_ms(|| {
            std::thread::sleep(Duration::from_millis(2));
            41 + 1
        });
        assert_eq!(value, 42);
        assert!(elapsed >= 1.0);
    }
}
