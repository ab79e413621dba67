// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loosely typed numeric input.
//!
//! Every numeric setter of [`crate::PanZoom`] accepts `impl Into<Scalar>`, so
//! values coming from text fields, markup attributes or config files can be
//! assigned without the caller parsing them first. Conversion never fails:
//! anything that does not read as a number becomes NaN, which the setters
//! then treat as zero.

use alloc::string::String;

/// A value that can be coerced to a number.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum Scalar {
    /// A number, used as is.
    Number(f64),
    /// Text parsed as a numeric literal.
    Text(String),
    /// `false` reads as `0`, `true` as `1`.
    Bool(bool),
    /// No value at all; reads as NaN.
    #[default]
    Missing,
}

impl Scalar {
    /// Converts to a number, yielding NaN for anything unreadable.
    ///
    /// Text is trimmed first. Empty text reads as `0`. Accepted forms are
    /// decimal literals with optional sign, fraction and exponent
    /// (`"-.5"`, `"+1e3"`), `Infinity` with optional sign, and unsigned
    /// `0x`/`0o`/`0b` integers.
    ///
    /// ```rust
    /// use understory_pan_zoom::Scalar;
    ///
    /// assert_eq!(Scalar::from("  +2.5 ").to_number(), 2.5);
    /// assert_eq!(Scalar::from("0x10").to_number(), 16.0);
    /// assert_eq!(Scalar::from("").to_number(), 0.0);
    /// assert!(Scalar::from("ten").to_number().is_nan());
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => parse_number(text),
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Missing => f64::NAN,
        }
    }

    /// Converts to a value suitable for an ordinate: finite, or else `0`.
    #[must_use]
    pub fn to_ordinate(&self) -> f64 {
        let n = self.to_number();
        if n.is_finite() { n } else { 0.0 }
    }

    /// Converts to a value suitable for a bound: NaN becomes `0`, infinities
    /// are kept.
    #[must_use]
    pub fn to_bound(&self) -> f64 {
        let n = self.to_number();
        if n.is_nan() { 0.0 } else { n }
    }
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'+' => (1.0, &text[1..]),
        b'-' => (-1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    if unsigned.len() == text.len() {
        if let Some(radix) = radix_prefix(text) {
            return parse_radix(&text[2..], radix);
        }
    }

    // Rust's float grammar also accepts `inf`/`nan` spellings; only let
    // plain decimal literals through.
    let decimal = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

fn radix_prefix(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    match bytes[1] {
        b'x' | b'X' => Some(16),
        b'o' | b'O' => Some(8),
        b'b' | b'B' => Some(2),
        _ => None,
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return f64::NAN;
        };
        value = value * f64::from(radix) + f64::from(digit);
    }
    value
}

macro_rules! scalar_from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

scalar_from_lossless!(f64, f32, i8, i16, i32, u8, u16, u32);

macro_rules! scalar_from_wide {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

// Integers wider than 53 bits round to the nearest double.
scalar_from_wide!(i64, u64, isize, usize);

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
