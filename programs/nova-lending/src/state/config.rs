//! Global lending configuration account
//!
//! Single admin-mutable account read by every operation. Ratio and rate
//! parameters are validated on write so the engines can trust them.

use anchor_lang::prelude::*;
use crate::constants::{MAX_RATE_TIERS, MIN_COLLATERAL_RATIO_BPS, PROGRAM_SEED_PREFIX};
use crate::errors::LendingError;

/// One entry of the per-duration interest rate table. Lookup is by
/// exact requested duration, not by elapsed time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RateTier {
    /// Loan duration in seconds
    pub duration: i64,

    /// Annualized interest rate in basis points
    pub rate_bps: u64,
}

/// Protocol-wide lending configuration
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"lending_config"]
#[account]
pub struct LendingConfig {
    /// PDA bump seed
    pub bump: u8,

    /// Administrator (can mutate settings, seize overdue collateral)
    pub admin: Pubkey,

    /// Pending admin for 2-step handover
    pub pending_admin: Pubkey,

    /// Authority allowed to register collateral receipts
    pub registry_authority: Pubkey,

    /// The 6-decimal stable unit mint (nUSD)
    pub stable_mint: Pubkey,

    /// Bump for the stable vault PDA
    pub stable_vault_bump: u8,

    /// Pause flag: blocks new borrows; repay and liquidation stay open
    pub paused: bool,

    /// Minimum safe collateral ratio (basis points, >= 10000)
    pub liquidation_ratio_bps: u64,

    /// Ratio restored by liquidation (basis points, > liquidation ratio)
    pub target_ratio_bps: u64,

    /// Liquidator bonus (basis points)
    pub liquidation_bonus_bps: u64,

    /// Penalty per overdue day (basis points of principal)
    pub penalty_ratio_bps: u64,

    /// Seconds past the due date before repay closes and seizure opens
    pub loan_grace_period: i64,

    /// Number of populated rate tiers
    pub tier_count: u8,

    /// Per-duration interest rate table
    pub rate_tiers: [RateTier; MAX_RATE_TIERS],

    /// Reserved for future upgrades
    pub reserved: [u8; 128],
}

impl LendingConfig {
    pub const SEED: &'static [u8] = b"lending_config";
    pub const STABLE_VAULT_SEED: &'static [u8] = b"stable_vault";

    pub fn space() -> usize {
        8 +                         // discriminator
        1 +                         // bump
        32 +                        // admin
        32 +                        // pending_admin
        32 +                        // registry_authority
        32 +                        // stable_mint
        1 +                         // stable_vault_bump
        1 +                         // paused
        8 +                         // liquidation_ratio_bps
        8 +                         // target_ratio_bps
        8 +                         // liquidation_bonus_bps
        8 +                         // penalty_ratio_bps
        8 +                         // loan_grace_period
        1 +                         // tier_count
        (16 * MAX_RATE_TIERS) +     // rate_tiers
        128                         // reserved
    }

    /// Both ratios at or above 100%, liquidation strictly below target
    pub fn validate_ratios(liquidation_ratio_bps: u64, target_ratio_bps: u64) -> Result<()> {
        require!(
            liquidation_ratio_bps >= MIN_COLLATERAL_RATIO_BPS
                && liquidation_ratio_bps < target_ratio_bps,
            LendingError::InvalidCollateralRatios
        );
        Ok(())
    }

    /// Interest rate for an exactly matching duration
    pub fn rate_for_duration(&self, duration: i64) -> Option<u64> {
        self.rate_tiers[..self.tier_count as usize]
            .iter()
            .find(|tier| tier.duration == duration)
            .map(|tier| tier.rate_bps)
    }

    /// Insert or update the tier for a duration
    pub fn set_rate_tier(&mut self, duration: i64, rate_bps: u64) -> Result<()> {
        require!(duration > 0, LendingError::InvalidDuration);

        if let Some(tier) = self.rate_tiers[..self.tier_count as usize]
            .iter_mut()
            .find(|tier| tier.duration == duration)
        {
            tier.rate_bps = rate_bps;
            return Ok(());
        }

        require!(
            (self.tier_count as usize) < MAX_RATE_TIERS,
            LendingError::RateTierTableFull
        );
        self.rate_tiers[self.tier_count as usize] = RateTier { duration, rate_bps };
        self.tier_count += 1;
        Ok(())
    }
}

/// Derive config PDA
pub fn derive_config(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        program_id,
    )
}

/// Derive stable vault PDA
pub fn derive_stable_vault(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, LendingConfig::STABLE_VAULT_SEED],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LendingConfig {
        LendingConfig {
            bump: 0,
            admin: Pubkey::default(),
            pending_admin: Pubkey::default(),
            registry_authority: Pubkey::default(),
            stable_mint: Pubkey::default(),
            stable_vault_bump: 0,
            paused: false,
            liquidation_ratio_bps: 12_500,
            target_ratio_bps: 13_000,
            liquidation_bonus_bps: 300,
            penalty_ratio_bps: 50,
            loan_grace_period: 14 * 86_400,
            tier_count: 0,
            rate_tiers: [RateTier::default(); MAX_RATE_TIERS],
            reserved: [0u8; 128],
        }
    }

    #[test]
    fn test_rate_lookup_is_exact_match() {
        let mut cfg = config();
        cfg.set_rate_tier(7 * 86_400, 30).unwrap();
        cfg.set_rate_tier(30 * 86_400, 80).unwrap();

        assert_eq!(cfg.rate_for_duration(7 * 86_400), Some(30));
        assert_eq!(cfg.rate_for_duration(30 * 86_400), Some(80));
        assert_eq!(cfg.rate_for_duration(14 * 86_400), None);
    }

    #[test]
    fn test_set_rate_tier_updates_in_place() {
        let mut cfg = config();
        cfg.set_rate_tier(7 * 86_400, 30).unwrap();
        cfg.set_rate_tier(7 * 86_400, 45).unwrap();

        assert_eq!(cfg.tier_count, 1);
        assert_eq!(cfg.rate_for_duration(7 * 86_400), Some(45));
    }

    #[test]
    fn test_rate_table_capacity() {
        let mut cfg = config();
        for i in 0..MAX_RATE_TIERS {
            cfg.set_rate_tier((i as i64 + 1) * 86_400, 10).unwrap();
        }
        assert!(cfg.set_rate_tier(99 * 86_400, 10).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut cfg = config();
        assert!(cfg.set_rate_tier(0, 30).is_err());
    }

    #[test]
    fn test_ratio_validation() {
        assert!(LendingConfig::validate_ratios(12_500, 13_000).is_ok());
        // Below 100%
        assert!(LendingConfig::validate_ratios(9_000, 13_000).is_err());
        // Liquidation not below target
        assert!(LendingConfig::validate_ratios(13_000, 13_000).is_err());
        assert!(LendingConfig::validate_ratios(13_500, 13_000).is_err());
    }
}
