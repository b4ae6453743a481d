use std::cell::Cell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// A monotonic source of seconds.
///
/// The [`Clock`] reads time exclusively through this trait so that the
/// playback logic can be driven by a manual source in tests and headless runs.
pub trait TimeSource {
    /// Seconds since an arbitrary, fixed origin.
    fn now_seconds(&self) -> f64;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced time source.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and hand another to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<f64>>,
}

impl ManualTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

/// Start/stop wall clock used as the playback reference.
///
/// `delta()` reports the seconds since its previous call while running.
/// A clock that was never started starts itself on the first `delta()`
/// call and reports 0; a clock that was explicitly stopped stays stopped
/// (and reports 0) until [`start`](Self::start) is called again.
#[derive(Debug, Clone)]
pub struct Clock<S: TimeSource = SystemTimeSource> {
    source: S,
    auto_start: bool,
    running: bool,
    start_time: f64,
    old_time: f64,
    /// Accumulated running time. Settable so a restarted clock can resume
    /// from an existing playback position.
    pub elapsed_time: f64,
}

impl Default for Clock<SystemTimeSource> {
    fn default() -> Self {
        Self::new(SystemTimeSource::new())
    }
}

impl<S: TimeSource> Clock<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            auto_start: true,
            running: false,
            start_time: 0.0,
            old_time: 0.0,
            elapsed_time: 0.0,
        }
    }

    /// (Re)starts the clock and resets `elapsed_time` to 0.
    pub fn start(&mut self) {
        self.start_time = self.source.now_seconds();
        self.old_time = self.start_time;
        self.elapsed_time = 0.0;
        self.running = true;
    }

    /// Stops the clock, folding the final interval into `elapsed_time`.
    pub fn stop(&mut self) {
        self.delta();
        self.running = false;
        self.auto_start = false;
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the last call.
    pub fn delta(&mut self) -> f64 {
        if self.auto_start && !self.running {
            self.start();
            return 0.0;
        }

        if !self.running {
            return 0.0;
        }

        let now = self.source.now_seconds();
        let diff = (now - self.old_time).max(0.0);
        self.old_time = now;
        self.elapsed_time += diff;
        diff
    }

    /// Total running time, including the interval up to now.
    pub fn elapsed(&mut self) -> f64 {
        self.delta();
        self.elapsed_time
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_auto_starts_with_zero_delta() {
        let time = ManualTimeSource::new();
        let mut clock = Clock::new(time.clone());

        time.advance(5.0);
        assert!(clock.delta().abs() < f64::EPSILON);
        assert!(clock.is_running());

        time.advance(0.25);
        assert!((clock.delta() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn stopped_clock_does_not_advance() {
        let time = ManualTimeSource::new();
        let mut clock = Clock::new(time.clone());
        clock.start();
        time.advance(1.0);
        clock.stop();
        assert!((clock.elapsed_time - 1.0).abs() < 1e-9);

        time.advance(3.0);
        assert!(clock.delta().abs() < f64::EPSILON);
        assert!((clock.elapsed() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn restarted_clock_resumes_from_reference() {
        let time = ManualTimeSource::new();
        let mut clock = Clock::new(time.clone());
        clock.start();
        clock.elapsed_time = 4.0;
        time.advance(0.5);
        assert!((clock.elapsed() - 4.5).abs() < 1e-9);
    }
}
