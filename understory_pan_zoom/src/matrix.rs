// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major 3×3 affine matrices.

use alloc::vec::Vec;
use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};

/// A 3×3 affine matrix stored row-major as 9 numbers.
///
/// ```text
/// | a  c  tx |     [0] [1] [2]
/// | b  d  ty |  =  [3] [4] [5]
/// | 0  0  1  |     [6] [7] [8]
/// ```
///
/// Points are column vectors, so `A * B` applies `B` first and `A` second.
/// [`Matrix::concat`] multiplies left to right, which reads as "outermost
/// transform first".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix([f64; 9]);

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Creates a matrix from 9 row-major entries.
    #[must_use]
    pub const fn new(entries: [f64; 9]) -> Self {
        Self(entries)
    }

    /// A translation by `offset`.
    #[must_use]
    pub fn translate(offset: impl Into<Vec2>) -> Self {
        let Vec2 { x, y } = offset.into();
        Self([1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0])
    }

    /// A uniform scale by `factor` about `(0, 0)`.
    #[must_use]
    pub fn scale(factor: f64) -> Self {
        Self([factor, 0.0, 0.0, 0.0, factor, 0.0, 0.0, 0.0, 1.0])
    }

    /// Returns the 9 row-major entries.
    #[must_use]
    pub fn entries(&self) -> [f64; 9] {
        self.0
    }

    /// Returns the translation column `(tx, ty)`.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.0[2], self.0[5])
    }

    /// Returns the six affine components `[a, b, c, d, tx, ty]`.
    ///
    /// This is the argument order of the CSS `matrix()` function and of
    /// canvas `setTransform`, and the coefficient order of [`Affine`].
    #[must_use]
    pub fn components(&self) -> [f64; 6] {
        let [a, c, tx, b, d, ty, ..] = self.0;
        [a, b, c, d, tx, ty]
    }

    /// Standard matrix product `self * rhs`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        let [a, b, c, p, q, r, u, v, w] = self.0;
        let [aa, bb, cc, pp, qq, rr, uu, vv, ww] = rhs.0;
        Self([
            a * aa + b * pp + c * uu,
            a * bb + b * qq + c * vv,
            a * cc + b * rr + c * ww,
            p * aa + q * pp + r * uu,
            p * bb + q * qq + r * vv,
            p * cc + q * rr + r * ww,
            u * aa + v * pp + w * uu,
            u * bb + v * qq + w * vv,
            u * cc + v * rr + w * ww,
        ])
    }

    /// Multiplies `matrices` together left to right.
    ///
    /// No matrices yields [`Matrix::IDENTITY`]; a single matrix is returned
    /// unchanged. Order matters and is never rearranged.
    ///
    /// ```rust
    /// use kurbo::Vec2;
    /// use understory_pan_zoom::Matrix;
    ///
    /// // Scale by 2, then move right by 10.
    /// let m = Matrix::concat([Matrix::translate(Vec2::new(10.0, 0.0)), Matrix::scale(2.0)]);
    /// assert_eq!(m.components(), [2.0, 0.0, 0.0, 2.0, 10.0, 0.0]);
    /// assert_eq!(Matrix::concat([]), Matrix::IDENTITY);
    /// ```
    #[must_use]
    pub fn concat(matrices: impl IntoIterator<Item = Self>) -> Self {
        let mut matrices = matrices.into_iter();
        let Some(first) = matrices.next() else {
            return Self::IDENTITY;
        };
        matrices.fold(first, |acc, m| acc.multiply(&m))
    }

    /// Converts to a [`kurbo::Affine`], dropping the constant bottom row.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::new(self.components())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self([a, c, tx, b, d, ty, 0.0, 0.0, 1.0])
    }
}

impl From<Matrix> for Affine {
    fn from(matrix: Matrix) -> Self {
        matrix.to_affine()
    }
}

/// Projects each point through `matrix`.
///
/// Each point is lifted to a translation matrix `P`, composed as
/// `matrix * P`, and read back from the translation column. The input is
/// left untouched; the result has the same length and order.
#[must_use]
pub fn apply_to_points(points: &[Point], matrix: &Matrix) -> Vec<Point> {
    points
        .iter()
        .map(|point| {
            let moved = matrix.multiply(&Matrix::translate(point.to_vec2()));
            moved.translation().to_point()
        })
        .collect()
}
