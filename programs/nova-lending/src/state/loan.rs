//! Loan ledger account
//!
//! One record per collateral id, at most one active loan at a time.
//! All mutation of loan balances happens here; accrual settlement lives
//! in math::accrual and must run before apply_payment.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::math::{checked_add, checked_sub};

/// Active loan against a locked collateral receipt
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"loan", collateral_id]
#[account]
pub struct Loan {
    /// PDA bump seed
    pub bump: u8,

    /// Collateral receipt this loan is drawn against
    pub collateral_id: u64,

    /// Whether a borrow is outstanding. When false the numeric fields
    /// are stale and ignored; reactivation requires a fresh borrow.
    pub active: bool,

    /// Owner at origination. Liquidation does not transfer this.
    pub borrower: Pubkey,

    /// Borrowed token, fixed for the life of the loan
    pub debt_mint: Pubkey,

    /// Debt token decimals (cached at origination)
    pub debt_decimals: u8,

    /// Outstanding borrowed amount in native debt units
    pub principal: u128,

    /// Stable units (6-decimal) backing the loan; shrinks on liquidation
    pub remaining_collateral: u128,

    /// Origination time
    pub start_time: i64,

    /// Requested duration; selects the rate tier at origination
    pub duration: i64,

    /// Due date: start_time + duration
    pub end_time: i64,

    /// Annualized interest rate in basis points, fixed at origination
    pub rate_bps: u64,

    /// Interest settlement checkpoint
    pub last_interest_accrual: i64,

    /// Interest balance not yet repaid (never folded into principal)
    pub accrued_interest: u128,

    /// Penalty settlement checkpoint (0 until first settlement)
    pub last_penalty_accrual: i64,

    /// Penalty balance not yet repaid
    pub accrued_penalty: u128,

    /// Reserved for future use
    pub reserved: [u8; 64],
}

/// How a repayment was split across the waterfall tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepaymentBreakdown {
    pub penalty_paid: u128,
    pub interest_paid: u128,
    pub principal_paid: u128,
}

impl RepaymentBreakdown {
    pub fn total(&self) -> u128 {
        self.penalty_paid + self.interest_paid + self.principal_paid
    }
}

impl Loan {
    pub const SEED: &'static [u8] = b"loan";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        8 +     // collateral_id
        1 +     // active
        32 +    // borrower
        32 +    // debt_mint
        1 +     // debt_decimals
        16 +    // principal
        16 +    // remaining_collateral
        8 +     // start_time
        8 +     // duration
        8 +     // end_time
        8 +     // rate_bps
        8 +     // last_interest_accrual
        16 +    // accrued_interest
        8 +     // last_penalty_accrual
        16 +    // accrued_penalty
        64      // reserved
    }

    /// Total outstanding debt across all three tiers
    pub fn total_debt(&self) -> Result<u128> {
        let debt = checked_add(self.principal, self.accrued_interest)?;
        checked_add(debt, self.accrued_penalty)
    }

    /// Repayment stays open strictly before end_time + grace
    pub fn repay_open(&self, now: i64, grace_period: i64) -> bool {
        now < self.end_time + grace_period
    }

    /// Seizure opens strictly after end_time + grace
    pub fn seizable(&self, now: i64, grace_period: i64) -> bool {
        now > self.end_time + grace_period
    }

    /// Apply a payment in waterfall order: penalty, then interest, then
    /// principal. Amounts above the total debt are capped, not refunded.
    /// Requires accrual to be settled; deactivates the loan when the
    /// principal is cleared.
    pub fn apply_payment(&mut self, amount: u128) -> Result<RepaymentBreakdown> {
        require!(self.active, LendingError::LoanNotActive);

        let mut remaining = amount.min(self.total_debt()?);
        let mut breakdown = RepaymentBreakdown::default();

        breakdown.penalty_paid = remaining.min(self.accrued_penalty);
        self.accrued_penalty = checked_sub(self.accrued_penalty, breakdown.penalty_paid)?;
        remaining -= breakdown.penalty_paid;
        if remaining == 0 {
            return Ok(breakdown);
        }

        breakdown.interest_paid = remaining.min(self.accrued_interest);
        self.accrued_interest = checked_sub(self.accrued_interest, breakdown.interest_paid)?;
        remaining -= breakdown.interest_paid;
        if remaining == 0 {
            return Ok(breakdown);
        }

        breakdown.principal_paid = remaining.min(self.principal);
        self.principal = checked_sub(self.principal, breakdown.principal_paid)?;

        if self.principal == 0 {
            self.active = false;
        }

        Ok(breakdown)
    }
}

/// Derive loan PDA
pub fn derive_loan(program_id: &Pubkey, collateral_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, Loan::SEED, &collateral_id.to_le_bytes()],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_with_debt(penalty: u128, interest: u128, principal: u128) -> Loan {
        Loan {
            bump: 0,
            collateral_id: 7,
            active: true,
            borrower: Pubkey::default(),
            debt_mint: Pubkey::default(),
            debt_decimals: 6,
            principal,
            remaining_collateral: 5_000_000,
            start_time: 0,
            duration: 604_800,
            end_time: 604_800,
            rate_bps: 30,
            last_interest_accrual: 0,
            accrued_interest: interest,
            last_penalty_accrual: 0,
            accrued_penalty: penalty,
            reserved: [0u8; 64],
        }
    }

    #[test]
    fn test_partial_payment_touches_only_penalty() {
        let mut loan = loan_with_debt(300, 200, 1_000);
        let split = loan.apply_payment(100).unwrap();

        assert_eq!(split.penalty_paid, 100);
        assert_eq!(split.interest_paid, 0);
        assert_eq!(split.principal_paid, 0);
        assert_eq!(loan.accrued_penalty, 200);
        assert_eq!(loan.accrued_interest, 200);
        assert_eq!(loan.principal, 1_000);
        assert!(loan.active);
    }

    #[test]
    fn test_payment_spills_from_penalty_into_interest() {
        let mut loan = loan_with_debt(300, 200, 1_000);
        let split = loan.apply_payment(400).unwrap();

        assert_eq!(split.penalty_paid, 300);
        assert_eq!(split.interest_paid, 100);
        assert_eq!(split.principal_paid, 0);
        assert_eq!(loan.accrued_penalty, 0);
        assert_eq!(loan.accrued_interest, 100);
        assert_eq!(loan.principal, 1_000);
    }

    #[test]
    fn test_exact_tier_boundary_stops_short_of_next_tier() {
        let mut loan = loan_with_debt(300, 200, 1_000);
        let split = loan.apply_payment(300).unwrap();

        assert_eq!(split.penalty_paid, 300);
        assert_eq!(split.interest_paid, 0);
        assert_eq!(loan.accrued_interest, 200);
    }

    #[test]
    fn test_full_payment_clears_and_deactivates() {
        let mut loan = loan_with_debt(300, 200, 1_000);
        let split = loan.apply_payment(1_500).unwrap();

        assert_eq!(split.penalty_paid, 300);
        assert_eq!(split.interest_paid, 200);
        assert_eq!(split.principal_paid, 1_000);
        assert_eq!(loan.total_debt().unwrap(), 0);
        assert!(!loan.active);
    }

    #[test]
    fn test_overpayment_is_capped() {
        let mut loan = loan_with_debt(300, 200, 1_000);
        let split = loan.apply_payment(u128::MAX).unwrap();

        assert_eq!(split.total(), 1_500);
        assert!(!loan.active);
    }

    #[test]
    fn test_grace_period_boundaries() {
        let loan = loan_with_debt(0, 0, 1_000);
        let grace = 14 * 86_400;
        let cutoff = loan.end_time + grace;

        // Open right up to the cutoff, closed from the cutoff on
        assert!(loan.repay_open(cutoff - 1, grace));
        assert!(!loan.repay_open(cutoff, grace));
        assert!(!loan.repay_open(cutoff + 1, grace));

        // Seizure only strictly past the cutoff
        assert!(!loan.seizable(cutoff, grace));
        assert!(loan.seizable(cutoff + 1, grace));
    }

    #[test]
    fn test_inactive_loan_rejects_payment() {
        let mut loan = loan_with_debt(0, 0, 100);
        loan.active = false;
        assert!(loan.apply_payment(50).is_err());
    }
}
