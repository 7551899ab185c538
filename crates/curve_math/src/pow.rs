//! Scaled exponentiation for exponential curves
//!
//! One exponential step multiplies the price by `(BPS + delta) / BPS`. That
//! ratio is raised to a power over an arbitrary-precision integer mantissa
//! with a separate power-of-ten scale, so nothing is rounded until the caller
//! narrows the final price.

use crate::CurveError;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Basis points scale (10,000 bps = 100%)
pub const BPS: u64 = 10_000;

/// Decimal digits of BPS, i.e. BPS == 10^BPS_DIGITS
const BPS_DIGITS: u32 = 4;

/// Largest number of compounding steps the evaluator will compute
pub const MAX_CURVE_STEPS: u32 = 1 << 16;

/// Exact decimal value `mantissa / 10^scale`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledPow {
    pub mantissa: BigUint,
    pub scale: u32,
}

impl ScaledPow {
    pub fn one() -> Self {
        Self {
            mantissa: BigUint::one(),
            scale: 0,
        }
    }

    /// Single exponential step `(BPS + delta_bps) / BPS`
    pub fn step(delta_bps: u64) -> Self {
        Self {
            mantissa: BigUint::from(BPS) + BigUint::from(delta_bps),
            scale: BPS_DIGITS,
        }
        .normalized()
    }

    /// Product of two scaled values; scales add
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            mantissa: &self.mantissa * &other.mantissa,
            scale: self.scale + other.scale,
        }
        .normalized()
    }

    /// `10^scale`
    pub fn denominator(&self) -> BigUint {
        BigUint::from(10u32).pow(self.scale)
    }

    /// Whether `mantissa / 10^scale > limit`
    ///
    /// Bit lengths settle most comparisons; only values within a few bits of
    /// `limit` pay for the exact product.
    pub fn exceeds(&self, limit: &BigUint) -> bool {
        if self.mantissa.is_zero() {
            return false;
        }
        if limit.is_zero() {
            return true;
        }

        // log2(10) lies in (3.321928, 3.321929), so 2^low <= 10^scale < 2^high
        let scale = u64::from(self.scale);
        let low = scale * 3_321_928 / 1_000_000;
        let high = scale * 3_321_929 / 1_000_000 + 1;

        let mantissa_bits = self.mantissa.bits();
        let limit_bits = limit.bits();
        if mantissa_bits < limit_bits + low {
            return false;
        }
        if mantissa_bits > limit_bits + high {
            return true;
        }

        self.mantissa > limit * self.denominator()
    }

    /// Strip trailing factors of ten, only while the division is exact
    fn normalized(mut self) -> Self {
        let ten = BigUint::from(10u32);
        while self.scale > 0 && !self.mantissa.is_zero() {
            let (quotient, remainder) = self.mantissa.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            self.mantissa = quotient;
            self.scale -= 1;
        }
        self
    }
}

/// `((BPS + delta_bps) / BPS)^exponent`, computed by repeated squaring
pub fn pow_bps(delta_bps: u64, exponent: u32) -> Result<ScaledPow, CurveError> {
    // Without a limit the power is always produced
    power(delta_bps, exponent, None).map(|value| value.unwrap_or_else(ScaledPow::one))
}

/// Like [`pow_bps`], but `None` as soon as the power is known to exceed `limit`
///
/// The work stays proportional to the size of `limit` rather than to the
/// full power, which matters for large deltas.
pub fn pow_bps_bounded(
    delta_bps: u64,
    exponent: u32,
    limit: &BigUint,
) -> Result<Option<ScaledPow>, CurveError> {
    power(delta_bps, exponent, Some(limit))
}

fn power(
    delta_bps: u64,
    exponent: u32,
    limit: Option<&BigUint>,
) -> Result<Option<ScaledPow>, CurveError> {
    if exponent > MAX_CURVE_STEPS {
        return Err(CurveError::OffsetOutOfRange(i64::from(exponent)));
    }

    let past_limit = |value: &ScaledPow| limit.map_or(false, |limit| value.exceeds(limit));

    let mut base = ScaledPow::step(delta_bps);
    let mut result = ScaledPow::one();
    let mut remaining = exponent;

    // Both factors are >= 1, so neither ever shrinks
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.multiply(&base);
            if past_limit(&result) {
                return Ok(None);
            }
        }
        remaining >>= 1;
        if remaining > 0 {
            // base is still owed to result at least once
            if past_limit(&base) {
                return Ok(None);
            }
            base = base.multiply(&base);
        }
    }

    if past_limit(&result) {
        return Ok(None);
    }
    Ok(Some(result))
}
