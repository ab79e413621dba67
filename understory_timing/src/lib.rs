// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timing: host-agnostic timing primitives for UI runtimes.
//!
//! This crate does not own an event loop or spawn timers. Deferred work is
//! modeled as data: a [`Clock`] reports the current time, and stateful
//! helpers such as [`Debouncer`] expose the deadline at which the host should
//! call back into them. Hosts are expected to:
//! - Pick a clock ([`SystemClock`] with the `std` feature, or [`ManualClock`]
//!   for tests and deterministic replay).
//! - Call [`Debouncer::poll`] at or after [`Debouncer::next_deadline`], for
//!   example from a frame callback or a platform timer.
//!
//! ## Debouncing
//!
//! [`Debouncer`] collapses bursts of calls into at most one delivered call
//! per idle gap. With [`Edge::Leading`] the first call of a burst is
//! delivered immediately; with [`Edge::Trailing`] the last call of a burst is
//! delivered once the window has elapsed without another call.
//!
//! ```rust
//! use core::cell::RefCell;
//! use core::time::Duration;
//! use std::rc::Rc;
//!
//! use understory_timing::{DebounceDelay, Debouncer, Edge, ManualClock};
//!
//! let clock = ManualClock::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let mut debounced = Debouncer::new(
//!     Rc::new(clock.clone()),
//!     DebounceDelay::from_millis(50),
//!     Edge::Trailing,
//!     move |v: u32| sink.borrow_mut().push(v),
//! );
//!
//! debounced.invoke(1);
//! clock.advance(Duration::from_millis(10));
//! debounced.invoke(2);
//! clock.advance(Duration::from_millis(10));
//! debounced.invoke(3);
//!
//! // Nothing is delivered while the burst is still active.
//! debounced.poll();
//! assert!(seen.borrow().is_empty());
//!
//! // 50ms after the last call, only the latest arguments are delivered.
//! clock.advance(Duration::from_millis(50));
//! debounced.poll();
//! assert_eq!(*seen.borrow(), [3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod debounce;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use debounce::{DebounceDelay, Debouncer, Edge};
