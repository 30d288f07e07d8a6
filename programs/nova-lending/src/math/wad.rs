//! Fixed-point WAD (1e18) arithmetic operations
//!
//! All ratio math runs in u128 with WAD scaling. Intermediate products
//! of two u128 values are carried in two 128-bit limbs so that
//! `a * b / c` only fails when the final quotient itself cannot fit.
//! Rounding direction is part of each operation's contract; callers
//! pick the conservative side.

use anchor_lang::prelude::*;
use crate::constants::WAD;
use crate::errors::LendingError;

const LIMB_MASK: u128 = (1u128 << 64) - 1;

/// Full 256-bit product of two u128 values as (high, low) limbs
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    let (a_hi, a_lo) = (a >> 64, a & LIMB_MASK);
    let (b_hi, b_lo) = (b >> 64, b & LIMB_MASK);

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    let mid = (lo_lo >> 64) + (lo_hi & LIMB_MASK) + (hi_lo & LIMB_MASK);
    let low = (mid << 64) | (lo_lo & LIMB_MASK);
    let high = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (mid >> 64);

    (high, low)
}

/// Divide the 256-bit value (high, low) by divisor via shift-subtract
/// long division, returning (quotient, remainder).
///
/// Caller must ensure high < divisor so the quotient fits in 128 bits.
fn div_wide(high: u128, low: u128, divisor: u128) -> (u128, u128) {
    let mut remainder = high;
    let mut quotient = 0u128;

    for i in (0..128).rev() {
        // The remainder stays below the divisor, so one conditional
        // subtraction per bit is enough; the carry bit covers the case
        // where the shift itself leaves the 128-bit range.
        let carry = remainder >> 127;
        remainder = (remainder << 1) | ((low >> i) & 1);
        if carry == 1 || remainder >= divisor {
            remainder = remainder.wrapping_sub(divisor);
            quotient |= 1u128 << i;
        }
    }

    (quotient, remainder)
}

/// Multiply then divide, rounding DOWN: (a * b) / c
pub fn mul_div_down(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(LendingError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / c);
    }

    let (high, low) = mul_wide(a, b);
    if high >= c {
        return Err(LendingError::MathOverflow.into());
    }

    let (quotient, _) = div_wide(high, low, c);
    Ok(quotient)
}

/// Multiply then divide, rounding UP: ceil((a * b) / c)
pub fn mul_div_up(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(LendingError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    let (high, low) = mul_wide(a, b);
    if high >= c {
        return Err(LendingError::MathOverflow.into());
    }

    let (quotient, remainder) = div_wide(high, low, c);
    if remainder == 0 {
        return Ok(quotient);
    }
    quotient
        .checked_add(1)
        .ok_or_else(|| LendingError::MathOverflow.into())
}

/// WAD multiplication (a * b / WAD), rounded down
#[inline]
pub fn wad_mul_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, b, WAD)
}

/// WAD division (a * WAD / b), rounded down
#[inline]
pub fn wad_div_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, WAD, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_down() {
        // 100 * 200 / 300 = 66.666... → 66
        assert_eq!(mul_div_down(100, 200, 300).unwrap(), 66);

        assert_eq!(mul_div_down(0, 100, 50).unwrap(), 0);
        assert_eq!(mul_div_down(100, 0, 50).unwrap(), 0);
        assert!(mul_div_down(100, 200, 0).is_err());
    }

    #[test]
    fn test_mul_div_up() {
        // 100 * 200 / 300 = 66.666... → 67
        assert_eq!(mul_div_up(100, 200, 300).unwrap(), 67);

        // Exact division is unchanged
        assert_eq!(mul_div_up(100, 200, 200).unwrap(), 100);
    }

    #[test]
    fn test_wide_products_survive() {
        // 1e24 * 1e18 overflows a bare u128 product
        let big = 1_000_000_000_000_000_000_000_000u128;
        assert_eq!(mul_div_down(big, WAD, WAD).unwrap(), big);
        assert_eq!(mul_div_up(big, WAD, WAD).unwrap(), big);

        // Largest possible exact quotient
        assert_eq!(
            mul_div_down(u128::MAX, u128::MAX, u128::MAX).unwrap(),
            u128::MAX
        );
    }

    #[test]
    fn test_wide_remainder_rounds() {
        let big = 1_000_000_000_000_000_000_000_000u128;
        // (1e24 * (1e18 + 1)) / 1e18 = 1e24 + 1e6
        assert_eq!(mul_div_down(big, WAD + 1, WAD).unwrap(), big + 1_000_000);
        // One part in 1e18 above an exact multiple still rounds up
        assert_eq!(mul_div_up(big + 1, WAD + 1, WAD).unwrap(), big + 1_000_002);
    }

    #[test]
    fn test_unrepresentable_quotient_rejected() {
        // Quotient would need more than 128 bits
        assert!(mul_div_down(u128::MAX, 2, 1).is_err());
        assert!(mul_div_up(u128::MAX, 2, 1).is_err());
    }

    #[test]
    fn test_wad_mul() {
        let half_wad = WAD / 2;

        // 0.5 * 1.0 = 0.5
        assert_eq!(wad_mul_down(half_wad, WAD).unwrap(), half_wad);

        // 0.5 * 0.5 = 0.25
        assert_eq!(wad_mul_down(half_wad, half_wad).unwrap(), WAD / 4);
    }

    #[test]
    fn test_wad_div() {
        // 1.0 / 0.5 = 2.0
        assert_eq!(wad_div_down(WAD, WAD / 2).unwrap(), 2 * WAD);
        assert!(wad_div_down(WAD, 0).is_err());
    }
}
