use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Instant,
};

use crate::foundation::core::Millis;

/// Monotonic time base consumed by the engine.
pub trait Clock {
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Wall-clock time elapsed since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        let ms = self.origin.elapsed().as_millis();
        Millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle while the engine owns
/// another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(at: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(at.0)),
        }
    }

    /// Move time forward by `ms`, saturating at `u64::MAX`.
    pub fn advance(&self, ms: u64) -> Millis {
        let prev = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(ms))
            })
            .unwrap_or_else(|now| now);
        Millis(prev.saturating_add(ms))
    }

    /// Jump to `at`. Moving backwards is ignored, the time base stays monotonic.
    pub fn set(&self, at: Millis) {
        self.now.fetch_max(at.0, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/clock.rs"]
mod tests;
