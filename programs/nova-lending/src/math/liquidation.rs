//! Borrow ceiling and closed-form liquidation sizing
//!
//! A liquidation repays exactly the amount x such that seizing
//! (1 + bonus) * x worth of collateral lands the loan at the target
//! ratio t:
//!
//!   (C - (1 + b) * x * P) / ((B - x) * P) = t
//!   =>  x = (B * t - C / P) / (t - 1 - b)        (all WAD)
//!
//! Rounding is asymmetric on purpose: the borrow ceiling floors so the
//! protocol never lends above the ratio, and the seized reward floors so
//! the vault never pays out more collateral than the formula grants.

use anchor_lang::prelude::*;
use crate::constants::{BPS, WAD};
use crate::errors::LendingError;
use super::safe_math::checked_add;
use super::units::{from_wad, stable_to_wad, to_wad, wad_to_stable};
use super::wad::{mul_div_down, wad_mul_down};

/// Convert a basis-point ratio to WAD (e.g. 13000 bps → 1.3e18)
#[inline]
pub fn bps_to_wad(bps: u64) -> u128 {
    bps as u128 * (WAD / BPS as u128)
}

/// Maximum borrowable amount in native debt units.
///
/// Collateral (stable units) is valued in debt units at the oracle
/// price, then divided by the liquidation ratio. Floors at every step.
pub fn max_borrowable(
    collateral_stable: u128,
    price_wad: u128,
    liquidation_ratio_bps: u64,
    debt_decimals: u8,
) -> Result<u128> {
    let c18 = stable_to_wad(collateral_stable)?;
    let value18 = mul_div_down(c18, WAD, price_wad)?;
    let ceiling18 = mul_div_down(value18, BPS as u128, liquidation_ratio_bps as u128)?;
    from_wad(ceiling18, debt_decimals)
}

/// A position is liquidatable when its recomputed ceiling no longer
/// covers outstanding principal. Accrued interest and penalty are
/// deliberately excluded so fee accrual alone cannot trigger seizure.
pub fn is_undercollateralized(
    collateral_stable: u128,
    principal: u128,
    price_wad: u128,
    liquidation_ratio_bps: u64,
    debt_decimals: u8,
) -> Result<bool> {
    let ceiling = max_borrowable(
        collateral_stable,
        price_wad,
        liquidation_ratio_bps,
        debt_decimals,
    )?;
    Ok(ceiling <= principal)
}

/// Repay amount (native debt units) that restores the target ratio.
pub fn required_repay(
    collateral_stable: u128,
    principal: u128,
    debt_decimals: u8,
    price_wad: u128,
    target_ratio_bps: u64,
    bonus_bps: u64,
) -> Result<u128> {
    let t = bps_to_wad(target_ratio_bps);
    let b = bps_to_wad(bonus_bps);
    require!(t > checked_add(WAD, b)?, LendingError::LiquidationInfeasible);

    let c18 = stable_to_wad(collateral_stable)?;
    let b18 = to_wad(principal, debt_decimals)?;

    let collateral_value = mul_div_down(c18, WAD, price_wad)?;
    let scaled_debt = wad_mul_down(b18, t)?;
    require!(scaled_debt > collateral_value, LendingError::PositionAboveTarget);

    let numerator = scaled_debt - collateral_value;
    let denominator = t - WAD - b;
    let repay18 = mul_div_down(numerator, WAD, denominator)?;

    let repay = from_wad(repay18, debt_decimals)?;
    require!(repay > 0, LendingError::LiquidationTooSmall);

    Ok(repay)
}

/// Stable-unit reward for repaying `repay` debt units: the repaid value
/// plus the liquidator bonus, floored down to 6 decimals.
pub fn liquidation_reward(
    repay: u128,
    debt_decimals: u8,
    price_wad: u128,
    bonus_bps: u64,
) -> Result<u128> {
    let x18 = to_wad(repay, debt_decimals)?;
    let with_bonus = mul_div_down(x18, (BPS + bonus_bps) as u128, BPS as u128)?;
    let reward18 = wad_mul_down(with_bonus, price_wad)?;
    Ok(wad_to_stable(reward18))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE_PAR: u128 = WAD; // 1 debt unit = 1 nUSD
    const DECIMALS: u8 = 6;

    /// Collateral ratio of a position in WAD, for round-trip checks
    fn ratio_wad(collateral_stable: u128, principal: u128) -> u128 {
        let c18 = stable_to_wad(collateral_stable).unwrap();
        let value = mul_div_down(c18, WAD, PRICE_PAR).unwrap();
        let b18 = to_wad(principal, DECIMALS).unwrap();
        mul_div_down(value, WAD, b18).unwrap()
    }

    #[test]
    fn test_max_borrowable_reference_case() {
        // 1000 nUSD collateral at par, 125% liquidation ratio → 800 units
        let ceiling = max_borrowable(1_000_000_000, PRICE_PAR, 12_500, DECIMALS).unwrap();
        assert_eq!(ceiling, 800_000_000);
    }

    #[test]
    fn test_max_borrowable_floors() {
        // 3 nUSD at 150%: 2 units exactly, 3_000_001 truncates the dust
        assert_eq!(max_borrowable(3_000_000, PRICE_PAR, 15_000, DECIMALS).unwrap(), 2_000_000);
        assert_eq!(max_borrowable(3_000_001, PRICE_PAR, 15_000, DECIMALS).unwrap(), 2_000_000);
    }

    #[test]
    fn test_undercollateralization_boundary() {
        // Ceiling 800, principal 800: eligible (<= is inclusive)
        assert!(is_undercollateralized(
            1_000_000_000, 800_000_000, PRICE_PAR, 12_500, DECIMALS
        ).unwrap());

        assert!(!is_undercollateralized(
            1_000_000_000, 799_999_999, PRICE_PAR, 12_500, DECIMALS
        ).unwrap());
    }

    #[test]
    fn test_default_parameters_feasible() {
        // t = 1.30e18, b = 0.03e18 → t > 1e18 + b holds
        assert!(bps_to_wad(13_000) > WAD + bps_to_wad(300));
    }

    #[test]
    fn test_infeasible_bonus_rejected() {
        // Target 102% with a 3% bonus leaves nothing to restore the ratio
        let result = required_repay(1_000_000_000, 900_000_000, DECIMALS, PRICE_PAR, 10_200, 300);
        assert!(result.is_err());
    }

    #[test]
    fn test_healthy_position_rejected() {
        // 1000 collateral vs 500 debt is far above a 130% target
        let result = required_repay(1_000_000_000, 500_000_000, DECIMALS, PRICE_PAR, 13_000, 300);
        assert!(result.is_err());
    }

    #[test]
    fn test_required_repay_reference_case() {
        // C = 1000 nUSD, B = 900 units at par, t = 130%, b = 3%:
        // x = (900 * 1.3 - 1000) / 0.27 = 629.629629... → floored
        let repay = required_repay(1_000_000_000, 900_000_000, DECIMALS, PRICE_PAR, 13_000, 300)
            .unwrap();
        assert_eq!(repay, 629_629_629);

        let reward = liquidation_reward(repay, DECIMALS, PRICE_PAR, 300).unwrap();
        assert_eq!(reward, 648_518_517);
    }

    #[test]
    fn test_liquidation_round_trip_restores_target() {
        let collateral = 1_000_000_000u128;
        let principal = 900_000_000u128;

        let repay = required_repay(collateral, principal, DECIMALS, PRICE_PAR, 13_000, 300)
            .unwrap();
        let reward = liquidation_reward(repay, DECIMALS, PRICE_PAR, 300).unwrap();

        let post_ratio = ratio_wad(collateral - reward, principal - repay);
        let target = bps_to_wad(13_000);

        // Flooring leaves the post ratio at or a hair above target
        assert!(post_ratio >= target);
        assert!(post_ratio - target < 1_000_000_000_000);
    }

    #[test]
    fn test_reward_scales_with_price() {
        // At half price, repaying the same debt seizes half the stable value
        let at_par = liquidation_reward(100_000_000, DECIMALS, PRICE_PAR, 300).unwrap();
        let at_half = liquidation_reward(100_000_000, DECIMALS, PRICE_PAR / 2, 300).unwrap();
        assert_eq!(at_half * 2, at_par);
    }
}
