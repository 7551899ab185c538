//! Exact curve price
//!
//! Curve prices are kept as exact rationals until the quote layer picks a
//! rounding direction: asks round up, bids round down.
//!
//! Deep exponential prices carry very large terms, so curve results are not
//! reduced. Equality and ordering compare values, not representations.

use crate::{CurveError, BPS};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Terms longer than this are logged by their integer part only
const DISPLAY_BITS: u64 = 256;

/// Price in the smallest currency unit as `numer / denom`, `denom > 0`
#[derive(Debug, Clone)]
pub struct CurvePrice {
    numer: BigInt,
    denom: BigUint,
}

impl CurvePrice {
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numer: value.into(),
            denom: BigUint::one(),
        }
    }

    /// Build a reduced rational; `None` when `denom` is zero
    pub fn from_ratio(numer: BigInt, denom: BigUint) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }

        let gcd = BigInt::from(denom.clone()).gcd(&numer);
        if gcd.is_one() || gcd.is_zero() {
            return Some(Self { numer, denom });
        }

        let (numer, _) = numer.div_rem(&gcd);
        let (denom, _) = BigInt::from(denom).div_rem(&gcd);
        Some(Self {
            numer,
            denom: denom.magnitude().clone(),
        })
    }

    /// Rational as given, without the gcd reduction; `denom` must be non-zero
    pub(crate) fn unreduced(numer: BigInt, denom: BigUint) -> Self {
        debug_assert!(!denom.is_zero());
        Self { numer, denom }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigUint {
        &self.denom
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one() || (self.numer.magnitude() % &self.denom).is_zero()
    }

    /// Largest integer <= price; `None` if that integer is negative
    pub fn floor_u64(&self) -> Result<Option<u64>, CurveError> {
        let floor = self.numer.div_floor(&BigInt::from(self.denom.clone()));
        narrow(floor)
    }

    /// Smallest integer >= price; `None` if that integer is negative
    pub fn ceil_u64(&self) -> Result<Option<u64>, CurveError> {
        // ceil(a / b) == -floor(-a / b)
        let neg_floor = (-&self.numer).div_floor(&BigInt::from(self.denom.clone()));
        narrow(-neg_floor)
    }

    /// Scale by `(BPS - fee_bps) / BPS`, i.e. deduct a basis-point fee
    pub fn apply_bps_discount(&self, fee_bps: u16) -> Result<Self, CurveError> {
        let fee = u64::from(fee_bps);
        if fee > BPS {
            return Err(CurveError::InvalidFeeBps(fee_bps));
        }

        let numer = &self.numer * BigInt::from(BPS - fee);
        let denom = &self.denom * BigUint::from(BPS);
        Ok(Self::unreduced(numer, denom))
    }
}

impl PartialEq for CurvePrice {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CurvePrice {}

impl PartialOrd for CurvePrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurvePrice {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order
        let lhs = &self.numer * BigInt::from(other.denom.clone());
        let rhs = &other.numer * BigInt::from(self.denom.clone());
        lhs.cmp(&rhs)
    }
}

fn narrow(value: BigInt) -> Result<Option<u64>, CurveError> {
    if value.is_negative() {
        return Ok(None);
    }
    value.to_u64().map(Some).ok_or(CurveError::PriceOverflow)
}

impl fmt::Display for CurvePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let denom = BigInt::from(self.denom.clone());
        if self.is_integer() {
            write!(f, "{}", self.numer.div_floor(&denom))
        } else if self.numer.bits().max(self.denom.bits()) <= DISPLAY_BITS {
            write!(f, "{}/{}", self.numer, self.denom)
        } else {
            write!(f, "~{}", self.numer.div_floor(&denom))
        }
    }
}
