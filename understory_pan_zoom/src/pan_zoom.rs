// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Vec2};
use understory_timing::{Clock, DebounceDelay, Edge};

use crate::bounds::Bounds;
use crate::matrix::{Matrix, apply_to_points};
use crate::notify::{Change, Notifiers};
use crate::options::PanZoomOptions;
use crate::scalar::Scalar;

/// Pan, zoom and transform-origin state with a composed affine transform.
///
/// Every ordinate has its own [`Bounds`]. Writes are coerced (see
/// [`Scalar`]) and clamped, never rejected. A write that changes the stored
/// value notifies the matching typed channel (pan, zoom or origin) and then
/// the generic change channel; a write that leaves the value as it was
/// notifies nothing.
///
/// Notifications go through a [`understory_timing::Debouncer`] per channel.
/// With a non-zero `notify_delay` the host must call [`PanZoom::poll`] at or
/// after [`PanZoom::next_deadline`] for windows to close and trailing calls
/// to be delivered.
///
/// ```rust
/// use kurbo::Point;
/// use understory_pan_zoom::{ManualClock, PanZoom, PanZoomOptions};
///
/// let mut view = PanZoom::with_clock(PanZoomOptions::new(), ManualClock::new());
/// view.set_pan_x(10);
/// view.set_zoom(2);
///
/// // Zoom about (0, 0), then pan.
/// assert_eq!(view.apply_transform(&[Point::new(5.0, 5.0)]), [Point::new(20.0, 10.0)]);
/// assert_eq!(view.to_string(), "matrix(2,0,0,2,10,0)");
/// ```
pub struct PanZoom {
    pan_x: f64,
    pan_y: f64,
    pan_x_bounds: Bounds,
    pan_y_bounds: Bounds,
    zoom: f64,
    zoom_bounds: Bounds,
    origin_x: f64,
    origin_y: f64,
    origin_x_bounds: Bounds,
    origin_y_bounds: Bounds,
    notify: Notifiers,
}

fn bounds_from(default: Bounds, min: Option<&Scalar>, max: Option<&Scalar>) -> Bounds {
    let mut bounds = default;
    if let Some(min) = min {
        bounds.set_min(min.to_bound());
    }
    if let Some(max) = max {
        bounds.set_max(max.to_bound());
    }
    bounds
}

fn ordinate_from(value: Option<&Scalar>, default: f64, bounds: Bounds) -> f64 {
    bounds.clamp(value.map_or(default, Scalar::to_ordinate))
}

fn delay_from(value: &Scalar) -> DebounceDelay {
    let millis = value.to_ordinate();
    if millis < 0.0 {
        return DebounceDelay::Disabled;
    }
    // Whole milliseconds only; any fraction is dropped.
    #[expect(clippy::cast_possible_truncation, reason = "float to int casts saturate")]
    let whole = millis as u64;
    DebounceDelay::from_millis(whole)
}

fn edge_from(leading: bool) -> Edge {
    if leading { Edge::Leading } else { Edge::Trailing }
}

impl PanZoom {
    /// Creates a controller measuring debounce windows with a
    /// [`understory_timing::SystemClock`].
    #[cfg(feature = "std")]
    #[must_use]
    pub fn new(options: PanZoomOptions) -> Self {
        Self::with_clock(options, understory_timing::SystemClock::new())
    }

    /// Creates a controller whose only setting is the generic change callback.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn from_change(callback: impl FnMut(Matrix) + 'static) -> Self {
        Self::new(PanZoomOptions::from_change(callback))
    }

    /// Creates a controller measuring debounce windows with `clock`.
    #[must_use]
    pub fn with_clock(options: PanZoomOptions, clock: impl Clock + 'static) -> Self {
        let o = options;

        let pan_x_bounds = bounds_from(Bounds::UNBOUNDED, o.min_pan_x.as_ref(), o.max_pan_x.as_ref());
        let pan_y_bounds = bounds_from(Bounds::UNBOUNDED, o.min_pan_y.as_ref(), o.max_pan_y.as_ref());
        let zoom_bounds = bounds_from(Bounds::NON_NEGATIVE, o.min_zoom.as_ref(), o.max_zoom.as_ref());
        let origin_x_bounds =
            bounds_from(Bounds::UNBOUNDED, o.min_origin_x.as_ref(), o.max_origin_x.as_ref());
        let origin_y_bounds =
            bounds_from(Bounds::UNBOUNDED, o.min_origin_y.as_ref(), o.max_origin_y.as_ref());

        let delay = o.notify_delay.as_ref().map_or(DebounceDelay::IMMEDIATE, delay_from);
        let edge = edge_from(o.notify_leading.unwrap_or(true));
        let mut notify = Notifiers::new(Rc::new(clock), delay, edge);
        let callbacks = o.callbacks;
        if let Some(cb) = callbacks.change {
            notify.change.set_callback(cb);
        }
        if let Some(cb) = callbacks.pan {
            notify.pan.set_callback(cb);
        }
        if let Some(cb) = callbacks.zoom {
            notify.zoom.set_callback(cb);
        }
        if let Some(cb) = callbacks.origin {
            notify.origin.set_callback(cb);
        }

        Self {
            pan_x: ordinate_from(o.pan_x.as_ref(), 0.0, pan_x_bounds),
            pan_y: ordinate_from(o.pan_y.as_ref(), 0.0, pan_y_bounds),
            pan_x_bounds,
            pan_y_bounds,
            zoom: ordinate_from(o.zoom.as_ref(), 1.0, zoom_bounds),
            zoom_bounds,
            origin_x: ordinate_from(o.origin_x.as_ref(), 0.0, origin_x_bounds),
            origin_y: ordinate_from(o.origin_y.as_ref(), 0.0, origin_y_bounds),
            origin_x_bounds,
            origin_y_bounds,
            notify,
        }
    }

    // --- pan ---

    /// Returns the pan offset.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    /// Sets both pan ordinates, notifying once if either changes.
    pub fn set_pan(&mut self, x: impl Into<Scalar>, y: impl Into<Scalar>) {
        let x = self.pan_x_bounds.clamp(x.into().to_ordinate());
        let y = self.pan_y_bounds.clamp(y.into().to_ordinate());
        self.write_pan(x, y);
    }

    /// Returns the horizontal pan.
    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Sets the horizontal pan.
    pub fn set_pan_x(&mut self, x: impl Into<Scalar>) {
        let x = self.pan_x_bounds.clamp(x.into().to_ordinate());
        self.write_pan(x, self.pan_y);
    }

    /// Returns the vertical pan.
    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the vertical pan.
    pub fn set_pan_y(&mut self, y: impl Into<Scalar>) {
        let y = self.pan_y_bounds.clamp(y.into().to_ordinate());
        self.write_pan(self.pan_x, y);
    }

    /// Returns the lower limit of horizontal pan.
    #[must_use]
    pub fn min_pan_x(&self) -> f64 {
        self.pan_x_bounds.min()
    }

    /// Sets the lower limit of horizontal pan, re-clamping the pan if needed.
    pub fn set_min_pan_x(&mut self, min: impl Into<Scalar>) {
        let min = self.pan_x_bounds.set_min(min.into().to_bound());
        if self.pan_x < min {
            self.set_pan_x(min);
        }
    }

    /// Returns the upper limit of horizontal pan.
    #[must_use]
    pub fn max_pan_x(&self) -> f64 {
        self.pan_x_bounds.max()
    }

    /// Sets the upper limit of horizontal pan, re-clamping the pan if needed.
    pub fn set_max_pan_x(&mut self, max: impl Into<Scalar>) {
        let max = self.pan_x_bounds.set_max(max.into().to_bound());
        if self.pan_x > max {
            self.set_pan_x(max);
        }
    }

    /// Returns the lower limit of vertical pan.
    #[must_use]
    pub fn min_pan_y(&self) -> f64 {
        self.pan_y_bounds.min()
    }

    /// Sets the lower limit of vertical pan, re-clamping the pan if needed.
    pub fn set_min_pan_y(&mut self, min: impl Into<Scalar>) {
        let min = self.pan_y_bounds.set_min(min.into().to_bound());
        if self.pan_y < min {
            self.set_pan_y(min);
        }
    }

    /// Returns the upper limit of vertical pan.
    #[must_use]
    pub fn max_pan_y(&self) -> f64 {
        self.pan_y_bounds.max()
    }

    /// Sets the upper limit of vertical pan, re-clamping the pan if needed.
    pub fn set_max_pan_y(&mut self, max: impl Into<Scalar>) {
        let max = self.pan_y_bounds.set_max(max.into().to_bound());
        if self.pan_y > max {
            self.set_pan_y(max);
        }
    }

    // --- zoom ---

    /// Returns the zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor.
    pub fn set_zoom(&mut self, zoom: impl Into<Scalar>) {
        let to = self.zoom_bounds.clamp(zoom.into().to_ordinate());
        let from = self.zoom;
        if to == from {
            return;
        }
        self.zoom = to;
        self.notify.zoom.invoke(Change { from, to });
        self.notify_changed();
    }

    /// Returns the lower limit of zoom.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.zoom_bounds.min()
    }

    /// Sets the lower limit of zoom, re-clamping the zoom if needed.
    pub fn set_min_zoom(&mut self, min: impl Into<Scalar>) {
        let min = self.zoom_bounds.set_min(min.into().to_bound());
        if self.zoom < min {
            self.set_zoom(min);
        }
    }

    /// Returns the upper limit of zoom.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.zoom_bounds.max()
    }

    /// Sets the upper limit of zoom, re-clamping the zoom if needed.
    pub fn set_max_zoom(&mut self, max: impl Into<Scalar>) {
        let max = self.zoom_bounds.set_max(max.into().to_bound());
        if self.zoom > max {
            self.set_zoom(max);
        }
    }

    // --- origin ---

    /// Returns the transform origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Sets both origin ordinates, notifying once if either changes.
    pub fn set_origin(&mut self, x: impl Into<Scalar>, y: impl Into<Scalar>) {
        let x = self.origin_x_bounds.clamp(x.into().to_ordinate());
        let y = self.origin_y_bounds.clamp(y.into().to_ordinate());
        self.write_origin(x, y);
    }

    /// Returns the horizontal origin.
    #[must_use]
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Sets the horizontal origin.
    pub fn set_origin_x(&mut self, x: impl Into<Scalar>) {
        let x = self.origin_x_bounds.clamp(x.into().to_ordinate());
        self.write_origin(x, self.origin_y);
    }

    /// Returns the vertical origin.
    #[must_use]
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// Sets the vertical origin.
    pub fn set_origin_y(&mut self, y: impl Into<Scalar>) {
        let y = self.origin_y_bounds.clamp(y.into().to_ordinate());
        self.write_origin(self.origin_x, y);
    }

    /// Returns the lower limit of the horizontal origin.
    #[must_use]
    pub fn min_origin_x(&self) -> f64 {
        self.origin_x_bounds.min()
    }

    /// Sets the lower limit of the horizontal origin, re-clamping if needed.
    pub fn set_min_origin_x(&mut self, min: impl Into<Scalar>) {
        let min = self.origin_x_bounds.set_min(min.into().to_bound());
        if self.origin_x < min {
            self.set_origin_x(min);
        }
    }

    /// Returns the upper limit of the horizontal origin.
    #[must_use]
    pub fn max_origin_x(&self) -> f64 {
        self.origin_x_bounds.max()
    }

    /// Sets the upper limit of the horizontal origin, re-clamping if needed.
    pub fn set_max_origin_x(&mut self, max: impl Into<Scalar>) {
        let max = self.origin_x_bounds.set_max(max.into().to_bound());
        if self.origin_x > max {
            self.set_origin_x(max);
        }
    }

    /// Returns the lower limit of the vertical origin.
    #[must_use]
    pub fn min_origin_y(&self) -> f64 {
        self.origin_y_bounds.min()
    }

    /// Sets the lower limit of the vertical origin, re-clamping if needed.
    pub fn set_min_origin_y(&mut self, min: impl Into<Scalar>) {
        let min = self.origin_y_bounds.set_min(min.into().to_bound());
        if self.origin_y < min {
            self.set_origin_y(min);
        }
    }

    /// Returns the upper limit of the vertical origin.
    #[must_use]
    pub fn max_origin_y(&self) -> f64 {
        self.origin_y_bounds.max()
    }

    /// Sets the upper limit of the vertical origin, re-clamping if needed.
    pub fn set_max_origin_y(&mut self, max: impl Into<Scalar>) {
        let max = self.origin_y_bounds.set_max(max.into().to_bound());
        if self.origin_y > max {
            self.set_origin_y(max);
        }
    }

    // --- notifications ---

    /// Returns the debounce window applied to notifications.
    #[must_use]
    pub fn notify_delay(&self) -> DebounceDelay {
        self.notify.delay()
    }

    /// Sets the debounce window in milliseconds; negative disables debouncing.
    ///
    /// The window is a whole number of milliseconds: a fractional value is
    /// truncated and an unreadable one reads as `0`.
    ///
    /// A different value discards every open window, so no notification
    /// buffered under the old settings is ever delivered.
    pub fn set_notify_delay(&mut self, millis: impl Into<Scalar>) {
        let delay = delay_from(&millis.into());
        if delay != self.notify.delay() {
            self.notify.set_delay(delay);
        }
    }

    /// Returns `true` if notifications fire on the leading edge of a burst.
    #[must_use]
    pub fn notify_leading(&self) -> bool {
        self.notify.edge() == Edge::Leading
    }

    /// Chooses leading- or trailing-edge notifications.
    ///
    /// A different value discards every open window.
    pub fn set_notify_leading(&mut self, leading: bool) {
        let edge = edge_from(leading);
        if edge != self.notify.edge() {
            self.notify.set_edge(edge);
        }
    }

    /// Replaces the callback run after any change, discarding its open window.
    ///
    /// The callback receives the transform as of the change it reports.
    pub fn set_on_change(&mut self, callback: impl FnMut(Matrix) + 'static) {
        self.notify.change.set_callback(callback);
    }

    /// Replaces the pan callback, discarding its open window.
    pub fn set_on_pan(&mut self, callback: impl FnMut(Change<Vec2>) + 'static) {
        self.notify.pan.set_callback(callback);
    }

    /// Replaces the zoom callback, discarding its open window.
    pub fn set_on_zoom(&mut self, callback: impl FnMut(Change<f64>) + 'static) {
        self.notify.zoom.set_callback(callback);
    }

    /// Replaces the origin callback, discarding its open window.
    pub fn set_on_origin(&mut self, callback: impl FnMut(Change<Point>) + 'static) {
        self.notify.origin.set_callback(callback);
    }

    /// Closes every notification window whose deadline has passed,
    /// delivering trailing calls. Returns the number of callbacks run.
    pub fn poll(&mut self) -> usize {
        self.notify.poll()
    }

    /// Returns the earliest time at which [`PanZoom::poll`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.notify.next_deadline()
    }

    /// Returns `true` while any notification window is open.
    #[must_use]
    pub fn has_pending_notifications(&self) -> bool {
        self.notify.is_pending()
    }

    // --- transform ---

    /// Returns the composed transform.
    ///
    /// The matrix is `T(pan) * T(origin) * S(zoom) * T(-origin)`: content
    /// is zoomed about the origin, then panned in screen space. It is
    /// recomputed on every call.
    #[must_use]
    pub fn transform(&self) -> Matrix {
        let origin = Vec2::new(self.origin_x, self.origin_y);
        Matrix::concat([
            Matrix::translate(self.pan()),
            Matrix::translate(origin),
            Matrix::scale(self.zoom),
            Matrix::translate(-origin),
        ])
    }

    /// Projects `points` through the current transform.
    #[must_use]
    pub fn apply_transform(&self, points: &[Point]) -> Vec<Point> {
        apply_to_points(points, &self.transform())
    }

    /// Returns the six affine components `[a, b, c, d, tx, ty]` of the
    /// current transform, in CSS `matrix()` order.
    #[must_use]
    pub fn components(&self) -> [f64; 6] {
        self.transform().components()
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PanZoomDebugInfo {
        PanZoomDebugInfo {
            pan: self.pan(),
            pan_x_bounds: self.pan_x_bounds,
            pan_y_bounds: self.pan_y_bounds,
            zoom: self.zoom,
            zoom_bounds: self.zoom_bounds,
            origin: self.origin(),
            origin_x_bounds: self.origin_x_bounds,
            origin_y_bounds: self.origin_y_bounds,
            notify_delay: self.notify.delay(),
            notify_edge: self.notify.edge(),
            pending_notifications: self.notify.is_pending(),
            transform: self.transform(),
        }
    }

    fn write_pan(&mut self, x: f64, y: f64) {
        let from = self.pan();
        if x == from.x && y == from.y {
            return;
        }
        self.pan_x = x;
        self.pan_y = y;
        self.notify.pan.invoke(Change { from, to: self.pan() });
        self.notify_changed();
    }

    fn write_origin(&mut self, x: f64, y: f64) {
        let from = self.origin();
        if x == from.x && y == from.y {
            return;
        }
        self.origin_x = x;
        self.origin_y = y;
        self.notify.origin.invoke(Change { from, to: self.origin() });
        self.notify_changed();
    }

    fn notify_changed(&mut self) {
        let transform = self.transform();
        self.notify.change.invoke(transform);
    }
}

#[cfg(feature = "std")]
impl Default for PanZoom {
    fn default() -> Self {
        Self::new(PanZoomOptions::default())
    }
}

impl fmt::Debug for PanZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanZoom")
            .field("pan", &self.pan())
            .field("pan_x_bounds", &self.pan_x_bounds)
            .field("pan_y_bounds", &self.pan_y_bounds)
            .field("zoom", &self.zoom)
            .field("zoom_bounds", &self.zoom_bounds)
            .field("origin", &self.origin())
            .field("origin_x_bounds", &self.origin_x_bounds)
            .field("origin_y_bounds", &self.origin_y_bounds)
            .field("notify_delay", &self.notify.delay())
            .field("notify_edge", &self.notify.edge())
            .finish_non_exhaustive()
    }
}

/// Renders the transform as a CSS `matrix(a,b,c,d,tx,ty)` function.
impl fmt::Display for PanZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("matrix(")?;
        for (i, value) in self.components().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", CssNumber(value))?;
        }
        f.write_str(")")
    }
}

/// A number spelled the way script engines print it: `Infinity`, and no
/// negative zero.
struct CssNumber(f64);

impl fmt::Display for CssNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value == f64::INFINITY {
            f.write_str("Infinity")
        } else if value == f64::NEG_INFINITY {
            f.write_str("-Infinity")
        } else {
            write!(f, "{}", value + 0.0)
        }
    }
}

impl IntoIterator for &PanZoom {
    type Item = f64;
    type IntoIter = core::array::IntoIter<f64, 6>;

    /// Yields the same six components as [`PanZoom::components`].
    fn into_iter(self) -> Self::IntoIter {
        self.components().into_iter()
    }
}

/// Debug snapshot of a [`PanZoom`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomDebugInfo {
    /// Current pan offset.
    pub pan: Vec2,
    /// Limits of horizontal pan.
    pub pan_x_bounds: Bounds,
    /// Limits of vertical pan.
    pub pan_y_bounds: Bounds,
    /// Current zoom factor.
    pub zoom: f64,
    /// Limits of zoom.
    pub zoom_bounds: Bounds,
    /// Current transform origin.
    pub origin: Point,
    /// Limits of the horizontal origin.
    pub origin_x_bounds: Bounds,
    /// Limits of the vertical origin.
    pub origin_y_bounds: Bounds,
    /// Debounce window applied to notifications.
    pub notify_delay: DebounceDelay,
    /// Edge on which debounced notifications fire.
    pub notify_edge: Edge,
    /// Whether any notification window is open.
    pub pending_notifications: bool,
    /// Composed transform.
    pub transform: Matrix,
}
