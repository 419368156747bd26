//! Unsigned 18-decimal fixed-point arithmetic for every accounting path.
//!
//! A [`Fixed`] is an `i128` mantissa with an implied scale of `10^18`, the
//! same unit as the settlement asset's smallest denomination. Every operation
//! rounds toward zero (floor, since values are never negative) and reports
//! results that do not fit an `i128` as [`PayrollError::ArithmeticOverflow`].
//! Products are formed in 256 bits through the host `U256` type, so
//! `a * b / d` is exact before the single floor at the end.

use soroban_sdk::{Env, U256};

use crate::errors::PayrollError;

pub const SCALE: i128 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(i128);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    /// Wraps a raw mantissa. Negative values are rejected.
    pub fn from_raw(raw: i128) -> Result<Self, PayrollError> {
        if raw < 0 {
            return Err(PayrollError::InvalidInput);
        }
        Ok(Fixed(raw))
    }

    /// `units` whole units, i.e. `units * 10^18`.
    pub fn from_units(units: i128) -> Result<Self, PayrollError> {
        units
            .checked_mul(SCALE)
            .ok_or(PayrollError::ArithmeticOverflow)
            .and_then(Self::from_raw)
    }

    pub fn raw(self) -> i128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `floor(self / divisor)` for a plain integer divisor.
    pub fn div_int(self, divisor: i128) -> Result<Self, PayrollError> {
        if divisor <= 0 {
            return Err(PayrollError::InvalidInput);
        }
        Ok(Fixed(self.0 / divisor))
    }

    /// `floor(self * num / den)` with a 256-bit intermediate product.
    pub fn mul_ratio(self, env: &Env, num: i128, den: i128) -> Result<Self, PayrollError> {
        mul_div_floor(env, self.0, num, den).map(Fixed)
    }

    /// Converts a reference-currency amount into a token quantity at `price`
    /// (reference currency per whole token): `floor(self * 10^18 / price)`.
    pub fn div_price(self, env: &Env, price: Fixed) -> Result<Self, PayrollError> {
        self.mul_ratio(env, SCALE, price.0)
    }

    /// Like [`Fixed::div_price`] but truncated to whole tokens:
    /// `floor(self / price) * 10^18`.
    pub fn whole_units_at(self, price: Fixed) -> Result<Self, PayrollError> {
        if price.0 <= 0 {
            return Err(PayrollError::InvalidInput);
        }
        Self::from_units(self.0 / price.0)
    }

    /// How many whole `per` fit in `self`. Any quotient of two `Fixed` values
    /// fits a `u128`.
    pub fn count_of(self, per: Fixed) -> Result<u128, PayrollError> {
        if per.0 <= 0 {
            return Err(PayrollError::InvalidInput);
        }
        Ok(self.0.unsigned_abs() / per.0.unsigned_abs())
    }

    pub fn checked_add(self, other: Fixed) -> Result<Self, PayrollError> {
        self.0
            .checked_add(other.0)
            .map(Fixed)
            .ok_or(PayrollError::ArithmeticOverflow)
    }

    /// Subtraction that refuses to go below zero.
    pub fn checked_sub(self, other: Fixed) -> Result<Self, PayrollError> {
        if other.0 > self.0 {
            return Err(PayrollError::InsufficientFunds);
        }
        Ok(Fixed(self.0 - other.0))
    }
}

/// `floor(a * b / d)` for non-negative `a`, `b` and positive `d`.
fn mul_div_floor(env: &Env, a: i128, b: i128, d: i128) -> Result<i128, PayrollError> {
    if a < 0 || b < 0 || d <= 0 {
        return Err(PayrollError::InvalidInput);
    }
    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product.div(&U256::from_u128(env, d as u128));
    quotient
        .to_u128()
        .and_then(|q| i128::try_from(q).ok())
        .ok_or(PayrollError::ArithmeticOverflow)
}
