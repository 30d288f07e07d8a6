//! Utility instructions (settle accrual)

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::AccrualSettled;
use crate::math::settle;
use crate::state::{LendingConfig, Loan};

// ============================================================================
// Settle Accrual (Public)
// ============================================================================

/// Anyone can crank settlement; callers use this to quote exact debt
/// from the settled account before repaying.
#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct SettleAccrual<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, LendingConfig>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Loan::SEED, &collateral_id.to_le_bytes()],
        bump = loan.bump,
    )]
    pub loan: Account<'info, Loan>,
}

pub fn settle_accrual(ctx: Context<SettleAccrual>, collateral_id: u64) -> Result<()> {
    require!(ctx.accounts.loan.active, LendingError::LoanNotActive);

    let now = Clock::get()?.unix_timestamp;
    let penalty_ratio_bps = ctx.accounts.config.penalty_ratio_bps;

    let loan = &mut ctx.accounts.loan;
    settle(loan, now, penalty_ratio_bps)?;

    emit!(AccrualSettled {
        collateral_id,
        accrued_interest: loan.accrued_interest,
        accrued_penalty: loan.accrued_penalty,
    });

    Ok(())
}
