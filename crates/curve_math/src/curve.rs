//! Curve evaluator
//!
//! Nominal pool price after `offset` steps from the starting price:
//! - offset == 0: starting price, no curve math
//! - Linear: starting_price - delta * offset
//! - Exponential, offset > 0: starting_price / ((BPS + delta) / BPS)^offset
//! - Exponential, offset < 0: starting_price * ((BPS + delta) / BPS)^|offset|
//!
//! Positive offsets step the price down, negative offsets step it up.
//!
//! Exponential prices are exact from 2^-64 up to about 2^80. Below that band every
//! price rounds to 0 down and 1 up, so they collapse to one sub-unit value.
//! Above it no fee short of 100% brings the price back into a u64, so it is
//! an overflow.
//! Either way the power stops growing once the outcome is settled.

use crate::{pow_bps_bounded, CurveError, CurvePrice, ScaledPow, MAX_CURVE_STEPS};
use num_bigint::{BigInt, BigUint};
use num_traits::One;

/// Exponential prices above 2^OVERFLOW_BITS are `PriceOverflow`
const OVERFLOW_BITS: u32 = 80;

/// Exponential prices below 2^-DUST_BITS collapse to `dust_price()`
const DUST_BITS: u32 = 64;

/// Price-step function of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CurveType {
    /// `delta` is an absolute amount per step
    Linear = 0,
    /// `delta` is basis points compounded per step
    Exponential = 1,
}

impl TryFrom<u8> for CurveType {
    type Error = CurveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CurveType::Linear),
            1 => Ok(CurveType::Exponential),
            _ => Err(CurveError::UnknownCurveType(value)),
        }
    }
}

impl From<CurveType> for u8 {
    fn from(curve: CurveType) -> Self {
        curve as u8
    }
}

/// Nominal price at `offset`, before any side-specific rounding or fees
pub fn evaluate(
    curve: CurveType,
    starting_price: u64,
    delta: u64,
    offset: i64,
) -> Result<CurvePrice, CurveError> {
    if offset == 0 {
        return Ok(CurvePrice::from_integer(starting_price));
    }

    match curve {
        CurveType::Linear => linear_price(starting_price, delta, offset),
        CurveType::Exponential => exponential_price(starting_price, delta, offset),
    }
}

fn linear_price(starting_price: u64, delta: u64, offset: i64) -> Result<CurvePrice, CurveError> {
    // u64 * i64 always fits in i128; the subtraction may not
    let step = i128::from(delta) * i128::from(offset);
    let price = i128::from(starting_price)
        .checked_sub(step)
        .ok_or(CurveError::PriceOverflow)?;

    Ok(CurvePrice::from_integer(price))
}

fn exponential_price(
    starting_price: u64,
    delta: u64,
    offset: i64,
) -> Result<CurvePrice, CurveError> {
    let steps = u32::try_from(offset.unsigned_abs())
        .ok()
        .filter(|steps| *steps <= MAX_CURVE_STEPS)
        .ok_or(CurveError::OffsetOutOfRange(offset))?;
    if starting_price == 0 {
        return Ok(CurvePrice::from_integer(0u64));
    }

    let start = BigUint::from(starting_price);
    if offset > 0 {
        // start / factor < 2^-DUST_BITS  <=>  factor > start * 2^DUST_BITS
        let limit = &start << DUST_BITS;
        let Some(factor) = bounded_factor(delta, steps, &limit, offset)? else {
            return Ok(dust_price());
        };
        // start / (mantissa / 10^scale)
        let numer = BigInt::from(start * factor.denominator());
        Ok(CurvePrice::unreduced(numer, factor.mantissa))
    } else {
        // factor > floor(2^OVERFLOW_BITS / start) puts the price above 2^(OVERFLOW_BITS - 1)
        let limit = (BigUint::one() << OVERFLOW_BITS) / &start;
        let Some(factor) = bounded_factor(delta, steps, &limit, offset)? else {
            return Err(CurveError::PriceOverflow);
        };
        // start * (mantissa / 10^scale)
        let denominator = factor.denominator();
        Ok(CurvePrice::unreduced(
            BigInt::from(start * factor.mantissa),
            denominator,
        ))
    }
}

fn bounded_factor(
    delta: u64,
    steps: u32,
    limit: &BigUint,
    offset: i64,
) -> Result<Option<ScaledPow>, CurveError> {
    pow_bps_bounded(delta, steps, limit).map_err(|_| CurveError::OffsetOutOfRange(offset))
}

/// Stand-in for every exponential price below 2^-DUST_BITS
fn dust_price() -> CurvePrice {
    CurvePrice::unreduced(BigInt::one(), BigUint::one() << (DUST_BITS + 1))
}
