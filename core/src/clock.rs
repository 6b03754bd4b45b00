use core::time::Duration;
use web_time::Instant;

/// Elapsed-time tracking for one game.
///
/// Starting twice keeps the first start, stopping is idempotent and stopping a watch that never started does nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            let now = Instant::now();
            log::debug!("stopwatch started");
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("stopwatch stopped after {}s", self.elapsed_secs());
            self.stopped_at = Some(Instant::now());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.stopped_at) {
            (Some(started_at), Some(stopped_at)) => stopped_at.duration_since(started_at),
            (Some(started_at), None) => started_at.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    /// Whole seconds since start, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed().as_secs().try_into().unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_watch_reports_zero() {
        let watch = Stopwatch::default();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), Duration::ZERO);
        assert_eq!(watch.elapsed_secs(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut watch = Stopwatch::default();
        watch.stop();
        assert!(!watch.is_running());

        watch.start();
        assert!(watch.is_running());
        watch.stop();
        let frozen = watch.elapsed();
        watch.stop();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), frozen);
    }

    #[test]
    fn restart_keeps_first_start() {
        let mut watch = Stopwatch::default();
        watch.start();
        let first = watch.started_at;
        watch.start();
        assert_eq!(watch.started_at, first);

        watch.reset();
        assert_eq!(watch, Stopwatch::default());
    }
}
