// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Pan Zoom: clamped pan/zoom/origin state and its affine transform.
//!
//! This crate provides a small, headless controller for content that can be
//! panned and zoomed about a movable origin. It focuses on:
//! - Pan, zoom and origin ordinates, each with its own min/max limits.
//! - Forgiving writes: values are coerced and clamped, never rejected.
//! - A composed 3×3 affine [`Matrix`] derived from the current state.
//! - Change notifications, optionally debounced on the leading or trailing
//!   edge of a burst.
//!
//! It does **not** render anything or listen to input. Callers are expected
//! to:
//! - Translate pointer, wheel or keyboard input into setter calls.
//! - Read [`PanZoom::transform`] (or its CSS form via `Display`) from the
//!   change callback and apply it to their own surface.
//! - Call [`PanZoom::poll`] from their event loop when notifications are
//!   debounced.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Vec2};
//! use understory_pan_zoom::{ManualClock, PanZoom, PanZoomOptions};
//!
//! let pans = Rc::new(Cell::new(0));
//! let counter = pans.clone();
//!
//! let mut view = PanZoom::with_clock(
//!     PanZoomOptions::new()
//!         .min_pan_x(-100)
//!         .max_pan_x(100)
//!         .on_pan(move |_| counter.set(counter.get() + 1)),
//!     ManualClock::new(),
//! );
//!
//! // Out-of-range and textual input is coerced, then clamped.
//! view.set_pan_x("250");
//! assert_eq!(view.pan(), Vec2::new(100.0, 0.0));
//!
//! // Writing the same value again is not a change.
//! view.set_pan_x(100);
//! assert_eq!(pans.get(), 1);
//!
//! // Zoom about a chosen origin.
//! view.set_origin(50, 50);
//! view.set_zoom(2);
//! let corners = view.apply_transform(&[Point::new(50.0, 50.0), Point::new(60.0, 50.0)]);
//! assert_eq!(corners, [Point::new(150.0, 50.0), Point::new(170.0, 50.0)]);
//! ```
//!
//! ## Debounced notifications
//!
//! ```rust
//! use core::cell::RefCell;
//! use core::time::Duration;
//! use std::rc::Rc;
//!
//! use understory_pan_zoom::{ManualClock, PanZoom, PanZoomOptions};
//!
//! let clock = ManualClock::new();
//! let zooms = Rc::new(RefCell::new(Vec::new()));
//! let sink = zooms.clone();
//!
//! let mut view = PanZoom::with_clock(
//!     PanZoomOptions::new()
//!         .notify_delay(50)
//!         .notify_leading(false)
//!         .on_zoom(move |change| sink.borrow_mut().push(change.to)),
//!     clock.clone(),
//! );
//!
//! view.set_zoom(1.5);
//! view.set_zoom(2.0);
//! view.set_zoom(3.0);
//! assert!(zooms.borrow().is_empty());
//!
//! clock.advance(Duration::from_millis(50));
//! view.poll();
//! assert_eq!(*zooms.borrow(), [3.0]);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform; there is no rotation or skew.
//! - The transform is recomputed from the five ordinates on every read, so
//!   it can never disagree with them.
//! - Limits always satisfy `min <= max`; tightening a limit past the current
//!   value moves the value through its regular setter, which notifies.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod matrix;
mod notify;
mod options;
mod pan_zoom;
mod scalar;

pub use bounds::Bounds;
pub use matrix::{Matrix, apply_to_points};
pub use notify::Change;
pub use options::PanZoomOptions;
pub use pan_zoom::{PanZoom, PanZoomDebugInfo};
pub use scalar::Scalar;

#[cfg(feature = "std")]
pub use understory_timing::SystemClock;
pub use understory_timing::{Clock, DebounceDelay, Edge, ManualClock};
