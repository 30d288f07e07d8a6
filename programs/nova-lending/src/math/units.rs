//! Decimal normalization between native token units and WAD
//!
//! The stable unit (nUSD) is fixed at 6 decimals; debt assets carry their
//! own precision, capped at 18. All conversions out of WAD floor, never
//! round up.

use anchor_lang::prelude::*;
use crate::constants::{MAX_DEBT_DECIMALS, STABLE_TO_WAD};
use crate::errors::LendingError;
use super::safe_math::checked_mul;

#[inline]
fn wad_scale_factor(decimals: u8) -> Result<u128> {
    if decimals > MAX_DEBT_DECIMALS {
        return Err(LendingError::UnsupportedDecimals.into());
    }
    Ok(10u128.pow((MAX_DEBT_DECIMALS - decimals) as u32))
}

/// Scale a native amount with the given decimals up to WAD (18-decimal)
pub fn to_wad(amount: u128, decimals: u8) -> Result<u128> {
    checked_mul(amount, wad_scale_factor(decimals)?)
}

/// Scale a WAD amount down to native decimals, flooring
pub fn from_wad(amount_wad: u128, decimals: u8) -> Result<u128> {
    Ok(amount_wad / wad_scale_factor(decimals)?)
}

/// Scale a 6-decimal stable-unit amount up to WAD
#[inline]
pub fn stable_to_wad(amount: u128) -> Result<u128> {
    checked_mul(amount, STABLE_TO_WAD)
}

/// Scale a WAD amount down to 6-decimal stable units, flooring
#[inline]
pub fn wad_to_stable(amount_wad: u128) -> u128 {
    amount_wad / STABLE_TO_WAD
}
