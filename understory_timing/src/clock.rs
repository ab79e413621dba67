// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic time sources.

use alloc::rc::Rc;
use core::cell::Cell;
use core::time::Duration;

/// A monotonic time source.
///
/// Time is reported as a [`Duration`] since an arbitrary, clock-specific
/// epoch. Only differences between two readings of the same clock are
/// meaningful.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a host (or a test) can keep one
/// handle and hand another to the components that read it.
///
/// ```rust
/// use core::time::Duration;
/// use understory_timing::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let reader = clock.clone();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(reader.now(), Duration::from_millis(16));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// Sets the clock to `now`.
    ///
    /// Setting a time earlier than the current reading is allowed; callers
    /// doing so are responsible for what that means to their consumers.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Wall-clock-independent monotonic time backed by [`std::time::Instant`].
///
/// The epoch is the moment the clock was created.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}
