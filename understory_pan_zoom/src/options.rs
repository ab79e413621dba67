// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for [`crate::PanZoom`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::matrix::Matrix;
use crate::notify::Change;
use crate::scalar::Scalar;

pub(crate) type ChangeCallback = Box<dyn FnMut(Matrix)>;
pub(crate) type PanCallback = Box<dyn FnMut(Change<Vec2>)>;
pub(crate) type ZoomCallback = Box<dyn FnMut(Change<f64>)>;
pub(crate) type OriginCallback = Box<dyn FnMut(Change<Point>)>;

#[derive(Default)]
pub(crate) struct Callbacks {
    pub(crate) change: Option<ChangeCallback>,
    pub(crate) pan: Option<PanCallback>,
    pub(crate) zoom: Option<ZoomCallback>,
    pub(crate) origin: Option<OriginCallback>,
}

/// Initial values, limits and callbacks for a [`crate::PanZoom`].
///
/// Every field left as `None` takes its default:
///
/// | option | default |
/// |---|---|
/// | `pan_x`, `pan_y`, `origin_x`, `origin_y` | `0` |
/// | `zoom` | `1` |
/// | `min_*` | `-Infinity`, except `min_zoom` which is `0` |
/// | `max_*` | `+Infinity` |
/// | `notify_delay` | `0` (notify synchronously) |
/// | `notify_leading` | `true` |
///
/// A value that is present but unreadable counts as `0`. Limits are applied
/// min first, then max clipped against it; the starting values are then
/// clamped into their limits.
///
/// ```rust
/// use understory_pan_zoom::{ManualClock, PanZoom, PanZoomOptions};
///
/// let options = PanZoomOptions::new()
///     .pan_x("10")
///     .min_pan_x(-20)
///     .max_pan_x(5)
///     .zoom(2.5);
/// let view = PanZoom::with_clock(options, ManualClock::new());
/// assert_eq!(view.pan_x(), 5.0);
/// assert_eq!(view.zoom(), 2.5);
/// ```
///
/// With the `serde` feature the numeric options deserialize from their
/// camelCase names (`panX`, `minPanX`, `notifyDelay`, `notifyLeading`, ...),
/// as numbers or numeric strings. Callbacks are never deserialized.
#[derive(Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PanZoomOptions {
    /// Initial horizontal pan.
    pub pan_x: Option<Scalar>,
    /// Initial vertical pan.
    pub pan_y: Option<Scalar>,
    /// Lower limit of horizontal pan.
    pub min_pan_x: Option<Scalar>,
    /// Lower limit of vertical pan.
    pub min_pan_y: Option<Scalar>,
    /// Upper limit of horizontal pan.
    pub max_pan_x: Option<Scalar>,
    /// Upper limit of vertical pan.
    pub max_pan_y: Option<Scalar>,
    /// Initial zoom factor.
    pub zoom: Option<Scalar>,
    /// Lower limit of zoom.
    pub min_zoom: Option<Scalar>,
    /// Upper limit of zoom.
    pub max_zoom: Option<Scalar>,
    /// Initial horizontal transform origin.
    pub origin_x: Option<Scalar>,
    /// Initial vertical transform origin.
    pub origin_y: Option<Scalar>,
    /// Lower limit of the horizontal origin.
    pub min_origin_x: Option<Scalar>,
    /// Lower limit of the vertical origin.
    pub min_origin_y: Option<Scalar>,
    /// Upper limit of the horizontal origin.
    pub max_origin_x: Option<Scalar>,
    /// Upper limit of the vertical origin.
    pub max_origin_y: Option<Scalar>,
    /// Debounce window for notifications in milliseconds; negative disables
    /// debouncing.
    pub notify_delay: Option<Scalar>,
    /// Whether notifications fire on the leading edge of a burst.
    pub notify_leading: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) callbacks: Callbacks,
}

macro_rules! scalar_option_setters {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: impl Into<Scalar>) -> Self {
                self.$name = Some(value.into());
                self
            }
        )*
    };
}

impl PanZoomOptions {
    /// Options with every value left at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options whose only setting is the generic change callback.
    #[must_use]
    pub fn from_change(callback: impl FnMut(Matrix) + 'static) -> Self {
        Self::new().on_change(callback)
    }

    scalar_option_setters! {
        /// Sets the initial horizontal pan.
        pan_x;
        /// Sets the initial vertical pan.
        pan_y;
        /// Sets the lower limit of horizontal pan.
        min_pan_x;
        /// Sets the lower limit of vertical pan.
        min_pan_y;
        /// Sets the upper limit of horizontal pan.
        max_pan_x;
        /// Sets the upper limit of vertical pan.
        max_pan_y;
        /// Sets the initial zoom factor.
        zoom;
        /// Sets the lower limit of zoom.
        min_zoom;
        /// Sets the upper limit of zoom.
        max_zoom;
        /// Sets the initial horizontal origin.
        origin_x;
        /// Sets the initial vertical origin.
        origin_y;
        /// Sets the lower limit of the horizontal origin.
        min_origin_x;
        /// Sets the lower limit of the vertical origin.
        min_origin_y;
        /// Sets the upper limit of the horizontal origin.
        max_origin_x;
        /// Sets the upper limit of the vertical origin.
        max_origin_y;
        /// Sets the debounce window in milliseconds.
        notify_delay;
    }

    /// Sets whether notifications fire on the leading edge of a burst.
    #[must_use]
    pub fn notify_leading(mut self, leading: bool) -> Self {
        self.notify_leading = Some(leading);
        self
    }

    /// Sets the callback run after any change, with the new transform.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(Matrix) + 'static) -> Self {
        self.callbacks.change = Some(Box::new(callback));
        self
    }

    /// Sets the callback run when the pan changes.
    #[must_use]
    pub fn on_pan(mut self, callback: impl FnMut(Change<Vec2>) + 'static) -> Self {
        self.callbacks.pan = Some(Box::new(callback));
        self
    }

    /// Sets the callback run when the zoom changes.
    #[must_use]
    pub fn on_zoom(mut self, callback: impl FnMut(Change<f64>) + 'static) -> Self {
        self.callbacks.zoom = Some(Box::new(callback));
        self
    }

    /// Sets the callback run when the origin changes.
    #[must_use]
    pub fn on_origin(mut self, callback: impl FnMut(Change<Point>) + 'static) -> Self {
        self.callbacks.origin = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for PanZoomOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanZoomOptions")
            .field("pan_x", &self.pan_x)
            .field("pan_y", &self.pan_y)
            .field("min_pan_x", &self.min_pan_x)
            .field("min_pan_y", &self.min_pan_y)
            .field("max_pan_x", &self.max_pan_x)
            .field("max_pan_y", &self.max_pan_y)
            .field("zoom", &self.zoom)
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("min_origin_x", &self.min_origin_x)
            .field("min_origin_y", &self.min_origin_y)
            .field("max_origin_x", &self.max_origin_x)
            .field("max_origin_y", &self.max_origin_y)
            .field("notify_delay", &self.notify_delay)
            .field("notify_leading", &self.notify_leading)
            .finish_non_exhaustive()
    }
}
