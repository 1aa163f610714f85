use rust_decimal::{Decimal, MathematicalOps};
use std::error::Error;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrecisionComplexError {
    DivisionByZero,
    Overflow,
}

impl fmt::Display for PrecisionComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "attempted to divide by zero"),
            Self::Overflow => write!(f, "decimal overflow during complex arithmetic"),
        }
    }
}

impl Error for PrecisionComplexError {}

/// Complex number over a fixed-precision decimal scalar.
///
/// Values are `Copy` and every operation returns a new value. Equality is exact
/// decimal equality on both components, so `2.0 + 0i == 2 + 0i`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PrecisionComplex {
    pub real: Decimal,
    pub imag: Decimal,
}

impl PrecisionComplex {
    pub const ZERO: Self = Self {
        real: Decimal::ZERO,
        imag: Decimal::ZERO,
    };

    #[must_use]
    pub const fn new(real: Decimal, imag: Decimal) -> Self {
        Self { real, imag }
    }

    /// Builds `magnitude * (cos(phase) + i sin(phase))`, with `phase` in radians.
    #[must_use]
    pub fn from_polar(magnitude: Decimal, phase: Decimal) -> Self {
        Self {
            real: magnitude * phase.cos(),
            imag: magnitude * phase.sin(),
        }
    }

    /// `real² + imag²`. Saturates at `Decimal::MAX` instead of overflowing, so
    /// the result is never negative.
    #[must_use]
    pub fn magnitude_squared(&self) -> Decimal {
        self.real
            .saturating_mul(self.real)
            .saturating_add(self.imag.saturating_mul(self.imag))
    }

    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.magnitude_squared().sqrt().unwrap_or_default()
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real,
            imag: -self.imag,
        }
    }

    /// Component-wise absolute value, the fold applied by Burning Ship rules.
    #[must_use]
    pub fn abs_components(&self) -> Self {
        Self {
            real: self.real.abs(),
            imag: self.imag.abs(),
        }
    }

    /// `self² + c`, or `None` if any intermediate value leaves the decimal range.
    #[must_use]
    pub fn checked_square_add(&self, c: Self) -> Option<Self> {
        let re_sq = self.real.checked_mul(self.real)?;
        let im_sq = self.imag.checked_mul(self.imag)?;
        let cross = self.real.checked_mul(self.imag)?.checked_mul(Decimal::TWO)?;

        Some(Self {
            real: re_sq.checked_sub(im_sq)?.checked_add(c.real)?,
            imag: cross.checked_add(c.imag)?,
        })
    }

    pub fn try_add(self, other: Self) -> Result<Self, PrecisionComplexError> {
        Ok(Self {
            real: checked(self.real.checked_add(other.real))?,
            imag: checked(self.imag.checked_add(other.imag))?,
        })
    }

    pub fn try_sub(self, other: Self) -> Result<Self, PrecisionComplexError> {
        Ok(Self {
            real: checked(self.real.checked_sub(other.real))?,
            imag: checked(self.imag.checked_sub(other.imag))?,
        })
    }

    pub fn try_mul(self, other: Self) -> Result<Self, PrecisionComplexError> {
        Ok(Self {
            real: checked_sum_of_products(self.real, other.real, -self.imag, other.imag)?,
            imag: checked_sum_of_products(self.real, other.imag, self.imag, other.real)?,
        })
    }

    /// `(self · conj(other)) / |other|²`.
    pub fn try_div(self, other: Self) -> Result<Self, PrecisionComplexError> {
        let re_sq = other.real.checked_mul(other.real);
        let im_sq = other.imag.checked_mul(other.imag);
        let denominator = match (re_sq, im_sq) {
            (Some(re_sq), Some(im_sq)) => re_sq
                .checked_add(im_sq)
                .ok_or(PrecisionComplexError::Overflow)?,
            _ => return Err(PrecisionComplexError::Overflow),
        };

        if denominator.is_zero() {
            return Err(PrecisionComplexError::DivisionByZero);
        }

        let conj = other.conjugate();
        let real = checked_sum_of_products(self.real, conj.real, -self.imag, conj.imag)?;
        let imag = checked_sum_of_products(self.real, conj.imag, self.imag, conj.real)?;

        Self { real, imag }.try_div_scalar(denominator)
    }

    pub fn try_div_scalar(self, divisor: Decimal) -> Result<Self, PrecisionComplexError> {
        if divisor.is_zero() {
            return Err(PrecisionComplexError::DivisionByZero);
        }

        Ok(Self {
            real: self
                .real
                .checked_div(divisor)
                .ok_or(PrecisionComplexError::Overflow)?,
            imag: self
                .imag
                .checked_div(divisor)
                .ok_or(PrecisionComplexError::Overflow)?,
        })
    }
}

fn checked(value: Option<Decimal>) -> Result<Decimal, PrecisionComplexError> {
    value.ok_or(PrecisionComplexError::Overflow)
}

fn checked_sum_of_products(
    a: Decimal,
    b: Decimal,
    c: Decimal,
    d: Decimal,
) -> Result<Decimal, PrecisionComplexError> {
    a.checked_mul(b)
        .zip(c.checked_mul(d))
        .and_then(|(ab, cd)| ab.checked_add(cd))
        .ok_or(PrecisionComplexError::Overflow)
}

impl From<(Decimal, Decimal)> for PrecisionComplex {
    fn from((real, imag): (Decimal, Decimal)) -> Self {
        Self { real, imag }
    }
}

impl fmt::Display for PrecisionComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imag.is_sign_negative() {
            write!(f, "{} - {}i", self.real, self.imag.abs())
        } else {
            write!(f, "{} + {}i", self.real, self.imag)
        }
    }
}

/// Panics on decimal overflow; see [`PrecisionComplex::try_add`].
impl Add for PrecisionComplex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

/// Panics on decimal overflow; see [`PrecisionComplex::try_sub`].
impl Sub for PrecisionComplex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            real: self.real - other.real,
            imag: self.imag - other.imag,
        }
    }
}

impl Neg for PrecisionComplex {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            real: -self.real,
            imag: -self.imag,
        }
    }
}

/// Panics on decimal overflow; see [`PrecisionComplex::try_mul`].
impl Mul for PrecisionComplex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}
