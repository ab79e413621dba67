// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced callbacks.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;
use core::time::Duration;

use crate::clock::Clock;

/// Length of the coalescing window of a [`Debouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DebounceDelay {
    /// Debouncing is switched off; every call is forwarded synchronously.
    Disabled,
    /// Calls arriving within this window of each other are coalesced.
    ///
    /// A zero window forwards every call synchronously.
    Window(Duration),
}

impl DebounceDelay {
    /// Forward every call synchronously, without coalescing.
    pub const IMMEDIATE: Self = Self::Window(Duration::ZERO);

    /// Creates a window of `millis` milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::Window(Duration::from_millis(millis))
    }

    /// Creates a delay from a signed millisecond count.
    ///
    /// Negative values disable debouncing.
    #[must_use]
    pub const fn from_signed_millis(millis: i64) -> Self {
        if millis < 0 {
            Self::Disabled
        } else {
            Self::from_millis(millis.unsigned_abs())
        }
    }

    /// Returns the window length in whole milliseconds, or `None` when disabled.
    #[must_use]
    pub fn as_millis(self) -> Option<u128> {
        match self {
            Self::Disabled => None,
            Self::Window(window) => Some(window.as_millis()),
        }
    }

    /// Returns the window when it actually coalesces calls (non-zero).
    #[must_use]
    pub fn coalescing_window(self) -> Option<Duration> {
        match self {
            Self::Window(window) if !window.is_zero() => Some(window),
            _ => None,
        }
    }
}

impl Default for DebounceDelay {
    fn default() -> Self {
        Self::IMMEDIATE
    }
}

/// Which call of a burst a [`Debouncer`] delivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    /// Deliver the first call of a burst immediately and drop the rest.
    #[default]
    Leading,
    /// Deliver the last call of a burst once the window has elapsed after it.
    Trailing,
}

struct Pending<A> {
    /// Time of the most recent call in the burst.
    last_call: Duration,
    /// Arguments awaiting a trailing delivery.
    args: Option<A>,
}

/// A callback wrapper that collapses bursts of calls.
///
/// A burst starts with the first call made while no window is open and lasts
/// until `window` has elapsed since the most recent call. Each call inside
/// the burst pushes the deadline back, so sustained calls are delivered at
/// most once per idle gap, not at a fixed rate.
///
/// The debouncer never runs on its own: the host calls [`Debouncer::poll`]
/// at or after [`Debouncer::next_deadline`] to close the window and, for
/// [`Edge::Trailing`], to deliver the latest arguments. A call arriving after
/// the deadline but before the next poll first closes the expired window
/// (delivering its trailing arguments) and then starts a new burst.
///
/// Changing the callback, the delay or the edge discards any open window;
/// buffered arguments are dropped and never delivered.
pub struct Debouncer<A> {
    clock: Rc<dyn Clock>,
    delay: DebounceDelay,
    edge: Edge,
    callback: Box<dyn FnMut(A)>,
    pending: Option<Pending<A>>,
}

impl<A> Debouncer<A> {
    /// Wraps `callback` using `clock` to measure the window.
    pub fn new(
        clock: Rc<dyn Clock>,
        delay: DebounceDelay,
        edge: Edge,
        callback: impl FnMut(A) + 'static,
    ) -> Self {
        Self {
            clock,
            delay,
            edge,
            callback: Box::new(callback),
            pending: None,
        }
    }

    /// Wraps a callback that ignores its arguments and does nothing.
    pub fn noop(clock: Rc<dyn Clock>, delay: DebounceDelay, edge: Edge) -> Self
    where
        A: 'static,
    {
        Self::new(clock, delay, edge, |_| {})
    }

    /// Returns the current delay.
    #[must_use]
    pub fn delay(&self) -> DebounceDelay {
        self.delay
    }

    /// Returns the current edge.
    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Returns `true` while a coalescing window is open.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the time at which the open window closes, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let window = self.delay.coalescing_window()?;
        self.pending
            .as_ref()
            .map(|pending| pending.last_call.saturating_add(window))
    }

    /// Replaces the wrapped callback and discards any open window.
    pub fn set_callback(&mut self, callback: impl FnMut(A) + 'static) {
        self.callback = Box::new(callback);
        self.cancel();
    }

    /// Sets the delay and discards any open window.
    pub fn set_delay(&mut self, delay: DebounceDelay) {
        self.delay = delay;
        self.cancel();
    }

    /// Sets the edge and discards any open window.
    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
        self.cancel();
    }

    /// Discards the open window, if any, without delivering anything.
    ///
    /// Returns `true` if a window was open.
    pub fn cancel(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if pending.args.is_some() {
            log::debug!("discarding undelivered debounced call");
        }
        true
    }

    /// Calls the wrapped callback, subject to debouncing.
    pub fn invoke(&mut self, args: A) {
        if self.delay.coalescing_window().is_none() {
            (self.callback)(args);
            return;
        }

        let now = self.clock.now();
        // A window whose deadline has passed is closed even if the host has
        // not polled yet; this call starts a new burst.
        if self.next_deadline().is_some_and(|deadline| now >= deadline) {
            self.close_window();
        }
        if let Some(pending) = self.pending.as_mut() {
            pending.last_call = now;
            match self.edge {
                Edge::Trailing => pending.args = Some(args),
                Edge::Leading => log::trace!("coalescing call into open window"),
            }
            return;
        }

        match self.edge {
            Edge::Trailing => {
                self.pending = Some(Pending {
                    last_call: now,
                    args: Some(args),
                });
            }
            Edge::Leading => {
                self.pending = Some(Pending {
                    last_call: now,
                    args: None,
                });
                (self.callback)(args);
            }
        }
    }

    /// Closes the open window if its deadline has passed.
    ///
    /// For [`Edge::Trailing`] this delivers the latest arguments. Returns
    /// `true` if the callback was called.
    pub fn poll(&mut self) -> bool {
        let Some(deadline) = self.next_deadline() else {
            return false;
        };
        if self.clock.now() < deadline {
            return false;
        }
        self.close_window()
    }

    /// Takes the open window, delivering its trailing arguments if any.
    fn close_window(&mut self) -> bool {
        match self.pending.take().and_then(|pending| pending.args) {
            Some(args) => {
                log::trace!("delivering trailing debounced call");
                (self.callback)(args);
                true
            }
            None => false,
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("edge", &self.edge)
            .field("pending", &self.is_pending())
            .field("next_deadline", &self.next_deadline())
            .finish_non_exhaustive()
    }
}
