//! Interest and penalty accrual for active loans
//!
//! Accrual is lazy: nothing runs in the background. The two projections
//! are pure reads; settle() is the single mutation point and MUST be
//! called before any operation that reads or changes principal,
//! accrued_interest, or accrued_penalty.

use anchor_lang::prelude::*;
use crate::constants::{BPS, PENALTY_DELAY, SECONDS_PER_DAY, SECONDS_PER_YEAR};
use crate::state::Loan;
use super::safe_math::{checked_add, checked_mul};

/// Project the interest balance as of `now` without mutating the loan.
///
/// Interest accrues continuously from origination (or the last
/// settlement checkpoint) and does not stop at the due date. The stored
/// rate is an annualized basis-point rate.
pub fn project_interest(loan: &Loan, now: i64) -> Result<u128> {
    if !loan.active {
        return Ok(0);
    }

    let from = loan.last_interest_accrual.max(loan.start_time);
    if now <= from {
        return Ok(loan.accrued_interest);
    }

    let elapsed = (now - from) as u128;
    let delta = checked_mul(loan.principal, loan.rate_bps as u128)?;
    let delta = checked_mul(delta, elapsed)?;
    let delta = delta / (BPS as u128 * SECONDS_PER_YEAR);

    checked_add(loan.accrued_interest, delta)
}

/// Project the penalty balance as of `now` without mutating the loan.
///
/// Penalties start only once the loan is more than PENALTY_DELAY past
/// its due date, then accrue on principal per overdue day (rounded up),
/// counted from the due date or the last penalty checkpoint.
pub fn project_penalty(loan: &Loan, now: i64, penalty_ratio_bps: u64) -> Result<u128> {
    if !loan.active || now <= loan.end_time + PENALTY_DELAY {
        return Ok(loan.accrued_penalty);
    }

    let from = loan.last_penalty_accrual.max(loan.end_time);
    if now <= from {
        return Ok(loan.accrued_penalty);
    }

    let overdue = (now - from) as u128;
    let overdue_days = overdue.div_ceil(SECONDS_PER_DAY as u128);

    let delta = checked_mul(loan.principal, penalty_ratio_bps as u128)?;
    let delta = checked_mul(delta, overdue_days)? / BPS as u128;

    checked_add(loan.accrued_penalty, delta)
}

/// Fold both projections into the loan and advance both checkpoints.
pub fn settle(loan: &mut Loan, now: i64, penalty_ratio_bps: u64) -> Result<()> {
    loan.accrued_interest = project_interest(loan, now)?;
    loan.accrued_penalty = project_penalty(loan, now, penalty_ratio_bps)?;
    loan.last_interest_accrual = now;
    loan.last_penalty_accrual = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PENALTY_DELAY;

    const DAY: i64 = SECONDS_PER_DAY;

    fn week_loan(start: i64) -> Loan {
        Loan {
            bump: 0,
            collateral_id: 1,
            active: true,
            borrower: Pubkey::default(),
            debt_mint: Pubkey::default(),
            debt_decimals: 6,
            principal: 1_000_000,
            remaining_collateral: 2_000_000,
            start_time: start,
            duration: 7 * DAY,
            end_time: start + 7 * DAY,
            rate_bps: 30,
            last_interest_accrual: start,
            accrued_interest: 0,
            last_penalty_accrual: 0,
            accrued_penalty: 0,
            reserved: [0u8; 64],
        }
    }

    #[test]
    fn test_inactive_loan_projects_zero_interest() {
        let mut loan = week_loan(0);
        loan.active = false;
        loan.accrued_interest = 123;
        assert_eq!(project_interest(&loan, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn test_interest_exact_one_day() {
        // 1_000_000 * 30 * 86400 / (10000 * 31536000) = 8 (floored)
        let loan = week_loan(0);
        assert_eq!(project_interest(&loan, DAY).unwrap(), 8);
    }

    #[test]
    fn test_interest_continues_past_due_date() {
        let loan = week_loan(0);
        let at_due = project_interest(&loan, 7 * DAY).unwrap();
        let after_due = project_interest(&loan, 14 * DAY).unwrap();
        assert!(after_due > at_due);
    }

    #[test]
    fn test_interest_monotonic() {
        let loan = week_loan(0);
        let mut last = 0u128;
        for day in 1..30 {
            let projected = project_interest(&loan, day * DAY).unwrap();
            assert!(projected >= last);
            last = projected;
        }
    }

    #[test]
    fn test_settle_idempotent_at_same_timestamp() {
        let mut loan = week_loan(0);
        let now = 5 * DAY;

        settle(&mut loan, now, 50).unwrap();
        let interest = loan.accrued_interest;
        let penalty = loan.accrued_penalty;

        settle(&mut loan, now, 50).unwrap();
        assert_eq!(loan.accrued_interest, interest);
        assert_eq!(loan.accrued_penalty, penalty);
    }

    #[test]
    fn test_no_penalty_inside_delay_window() {
        let loan = week_loan(0);
        let due = loan.end_time;

        assert_eq!(project_penalty(&loan, due, 50).unwrap(), 0);
        assert_eq!(project_penalty(&loan, due + PENALTY_DELAY, 50).unwrap(), 0);
    }

    #[test]
    fn test_penalty_backdates_to_due_date() {
        // One second past the delay window: overdue spans the whole
        // delay plus one second, rounded up to 4 days.
        let loan = week_loan(0);
        let now = loan.end_time + PENALTY_DELAY + 1;

        // 1_000_000 * 50 * 4 / 10000 = 20_000
        assert_eq!(project_penalty(&loan, now, 50).unwrap(), 20_000);
    }

    #[test]
    fn test_penalty_whole_days_round_up() {
        let loan = week_loan(0);

        // Exactly 5 overdue days
        let now = loan.end_time + 5 * DAY;
        assert_eq!(project_penalty(&loan, now, 50).unwrap(), 25_000);

        // A second more rounds up to 6
        let now = loan.end_time + 5 * DAY + 1;
        assert_eq!(project_penalty(&loan, now, 50).unwrap(), 30_000);
    }

    #[test]
    fn test_penalty_counts_from_checkpoint_after_settle() {
        let mut loan = week_loan(0);
        let first = loan.end_time + 4 * DAY;

        settle(&mut loan, first, 50).unwrap();
        let settled = loan.accrued_penalty;
        assert_eq!(settled, 20_000);

        // Next projection counts only from the checkpoint
        let next = first + DAY;
        assert_eq!(project_penalty(&loan, next, 50).unwrap(), settled + 5_000);
    }

    #[test]
    fn test_settle_zero_elapsed_keeps_balances() {
        let mut loan = week_loan(100);
        loan.accrued_interest = 42;
        loan.last_interest_accrual = 500;

        // Clock at the checkpoint: no change
        settle(&mut loan, 500, 50).unwrap();
        assert_eq!(loan.accrued_interest, 42);
    }
}
