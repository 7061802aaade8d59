//! Fixed-point lengths.
//!
//! Bit geometry produces fractional increments (dovetail offsets, pass
//! centres at half a bit width). Those values are kept as integers scaled by
//! [`FIXED_SCALE`] so that comparisons near cut boundaries are exact and never
//! depend on binary floating-point drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Number of fixed-point steps per increment (four decimal places).
pub const FIXED_SCALE: i64 = 10_000;

/// A signed length in increments with 1/10000 increment resolution.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed(i64);

/// Divide, rounding half away from zero.
#[inline]
fn div_round(num: i128, den: i128) -> i128 {
    let q = num / den;
    let r = num % den;
    if 2 * r.abs() >= den.abs() {
        if (num < 0) != (den < 0) {
            q - 1
        } else {
            q + 1
        }
    } else {
        q
    }
}

impl Fixed {
    /// Zero increments.
    pub const ZERO: Fixed = Fixed(0);
    /// One increment.
    pub const ONE: Fixed = Fixed(FIXED_SCALE);

    /// Create from a whole number of increments.
    #[inline]
    pub const fn from_increments(n: i32) -> Self {
        Fixed(n as i64 * FIXED_SCALE)
    }

    /// Create from the raw scaled representation.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Fixed(raw)
    }

    /// Create from a floating-point number of increments, rounding to the
    /// nearest fixed-point step.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Fixed((value * FIXED_SCALE as f64).round() as i64)
    }

    /// The raw scaled representation.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert to floating-point increments.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_SCALE as f64
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Fixed(self.0.abs())
    }

    /// Half of this value, rounded to the nearest fixed-point step.
    #[inline]
    pub fn half(self) -> Self {
        Fixed(div_round(self.0 as i128, 2) as i64)
    }

    /// True if this value is a whole number of increments.
    #[inline]
    pub const fn is_integral(self) -> bool {
        self.0 % FIXED_SCALE == 0
    }

    /// Largest whole increment not greater than this value.
    #[inline]
    pub fn floor(self) -> i32 {
        self.0.div_euclid(FIXED_SCALE) as i32
    }

    /// Smallest whole increment not less than this value.
    #[inline]
    pub fn ceil(self) -> i32 {
        let f = self.0.div_euclid(FIXED_SCALE);
        if self.0.rem_euclid(FIXED_SCALE) == 0 {
            f as i32
        } else {
            (f + 1) as i32
        }
    }

    /// Round to whole increments, ties toward zero.
    pub fn round_half_down(self) -> i32 {
        let mag = self.0.abs();
        let whole = mag / FIXED_SCALE;
        let frac = mag % FIXED_SCALE;
        let rounded = if 2 * frac > FIXED_SCALE {
            whole + 1
        } else {
            whole
        };
        if self.0 < 0 {
            -(rounded as i32)
        } else {
            rounded as i32
        }
    }

    /// Round to whole increments, ties away from zero.
    pub fn round_half_up(self) -> i32 {
        div_round(self.0 as i128, FIXED_SCALE as i128) as i32
    }

    /// The larger of two values.
    #[inline]
    pub fn max(self, other: Fixed) -> Fixed {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// The smaller of two values.
    #[inline]
    pub fn min(self, other: Fixed) -> Fixed {
        if self <= other {
            self
        } else {
            other
        }
    }
}

impl From<i32> for Fixed {
    fn from(n: i32) -> Self {
        Fixed::from_increments(n)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Add<i32> for Fixed {
    type Output = Fixed;
    fn add(self, rhs: i32) -> Fixed {
        self + Fixed::from(rhs)
    }
}

impl Sub<i32> for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: i32) -> Fixed {
        self - Fixed::from(rhs)
    }
}

impl Mul<i32> for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: i32) -> Fixed {
        Fixed(self.0 * rhs as i64)
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(div_round(self.0 as i128 * rhs.0 as i128, FIXED_SCALE as i128) as i64)
    }
}

impl Div<i32> for Fixed {
    type Output = Fixed;
    fn div(self, rhs: i32) -> Fixed {
        Fixed(div_round(self.0 as i128, rhs as i128) as i64)
    }
}

impl Div for Fixed {
    type Output = Fixed;
    fn div(self, rhs: Fixed) -> Fixed {
        Fixed(div_round(self.0 as i128 * FIXED_SCALE as i128, rhs.0 as i128) as i64)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", self)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let mag = self.0.abs();
        let whole = mag / FIXED_SCALE;
        let frac = mag % FIXED_SCALE;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:04}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}
