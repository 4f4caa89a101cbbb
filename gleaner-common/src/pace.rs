use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Random delay between `min` and `max` (inclusive), awaited before upstream
/// calls so a run does not hammer the remote side at machine speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Build a pacer from a millisecond range. Bounds given in the wrong order
    /// are swapped.
    pub fn from_millis(min: u64, max: u64) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: Duration::from_millis(lo),
            max: Duration::from_millis(hi),
        }
    }

    /// A pacer that never waits. Used by tests and dry runs.
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }

    /// Draw one delay from the configured range.
    pub fn pick(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let ms = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(ms as u64)
    }

    /// Sleep for a randomly drawn delay and return how long we waited.
    pub async fn pause(&self) -> Duration {
        let wait = self.pick();
        if !wait.is_zero() {
            tracing::trace!(target: "pace", wait_ms = wait.as_millis() as u64, "pacer.sleep");
            sleep(wait).await;
        }
        wait
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_within_range() {
        let pacer = Pacer::from_millis(2000, 4000);
        for _ in 0..200 {
            let d = pacer.pick();
            assert!(d >= Duration::from_millis(2000));
            assert!(d <= Duration::from_millis(4000));
        }
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let pacer = Pacer::from_millis(900, 100);
        assert_eq!(pacer, Pacer::from_millis(100, 900));
        for _ in 0..200 {
            let d = pacer.pick();
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(900));
        }
    }

    #[tokio::test]
    async fn none_never_sleeps() {
        let pacer = Pacer::none();
        assert_eq!(pacer, Pacer::default());
        assert_eq!(pacer.pause().await, Duration::ZERO);
    }
}
