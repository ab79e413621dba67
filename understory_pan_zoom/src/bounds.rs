// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Closed range `[min, max]` that an ordinate is clamped into.
///
/// `min <= max` always holds: each setter clips the incoming value against
/// the opposite end instead of rejecting it. Either end may be infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// No limits in either direction.
    pub const UNBOUNDED: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Non-negative values only; the default range for zoom.
    pub const NON_NEGATIVE: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Creates bounds from `min` and `max`.
    ///
    /// `min` is applied first, then `max` is clipped against it, so an
    /// inverted pair collapses to `[min, min]`. NaN ends are read as zero.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let mut bounds = Self::UNBOUNDED;
        bounds.set_min(min);
        bounds.set_max(max);
        bounds
    }

    /// Returns the lower end.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper end.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sets the lower end, never letting it exceed the upper end.
    ///
    /// Returns the stored value.
    pub fn set_min(&mut self, min: f64) -> f64 {
        self.min = if min.is_nan() { 0.0 } else { min }.min(self.max);
        self.min
    }

    /// Sets the upper end, never letting it fall below the lower end.
    ///
    /// Returns the stored value.
    pub fn set_max(&mut self, max: f64) -> f64 {
        self.max = if max.is_nan() { 0.0 } else { max }.max(self.min);
        self.max
    }

    /// Clamps `value` into `[min, max]`.
    ///
    /// Unlike [`f64::clamp`] this never panics; a NaN `value` yields `min`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        debug_assert!(self.min <= self.max, "bounds inverted: {self:?}");
        value.max(self.min).min(self.max)
    }

    /// Returns `true` if `value` lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
