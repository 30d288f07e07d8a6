//! Liquidation and administrative seizure instructions
//!
//! A liquidation call is sized to land the loan exactly at the target
//! ratio; severely undercollateralized loans take repeated calls, each
//! recomputing the formula against updated state. Seizure is the blunt
//! admin fallback for loans past the grace period.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events;
use crate::interfaces::PriceFeed;
use crate::math::{
    checked_sub, is_undercollateralized, liquidation_reward, required_repay,
    safe_u128_to_u64, settle,
};
use crate::state::{CollateralReceipt, DebtAssetConfig, LendingConfig, Loan};

// ============================================================================
// Liquidate
// ============================================================================

#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, LendingConfig>>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::SEED, debt_mint.key().as_ref()],
        bump = debt_asset.bump,
    )]
    pub debt_asset: Box<Account<'info, DebtAssetConfig>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Loan::SEED, &collateral_id.to_le_bytes()],
        bump = loan.bump,
        constraint = loan.debt_mint == debt_mint.key() @ LendingError::WrongDebtMint,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [
            PROGRAM_SEED_PREFIX,
            CollateralReceipt::SEED,
            &collateral_id.to_le_bytes(),
        ],
        bump = receipt.bump,
    )]
    pub receipt: Box<Account<'info, CollateralReceipt>>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, PriceFeed::SEED, debt_mint.key().as_ref()],
        bump = price_feed.bump,
    )]
    pub price_feed: Box<Account<'info, PriceFeed>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::VAULT_SEED, debt_mint.key().as_ref()],
        bump = debt_asset.vault_bump,
    )]
    pub debt_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::STABLE_VAULT_SEED],
        bump = config.stable_vault_bump,
    )]
    pub stable_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = liquidator_debt_account.mint == debt_mint.key(),
    )]
    pub liquidator_debt_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = liquidator_stable_account.mint == config.stable_mint,
    )]
    pub liquidator_stable_account: InterfaceAccount<'info, TokenAccount>,

    pub debt_mint: InterfaceAccount<'info, Mint>,

    #[account(constraint = stable_mint.key() == config.stable_mint @ LendingError::InvalidStableMint)]
    pub stable_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn liquidate(ctx: Context<Liquidate>, collateral_id: u64, max_repay: u128) -> Result<()> {
    // ===== CHECKS =====
    // Liquidation stays available while paused (maintains protocol health)
    require!(ctx.accounts.loan.active, LendingError::LoanNotActive);
    require!(max_repay > 0, LendingError::ZeroAmount);

    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;
    let price = ctx.accounts.price_feed.validated_price(now)?;

    let loan = &ctx.accounts.loan;
    require!(
        is_undercollateralized(
            loan.remaining_collateral,
            loan.principal,
            price,
            config.liquidation_ratio_bps,
            loan.debt_decimals,
        )?,
        LendingError::PositionHealthy
    );

    let repay_amount = required_repay(
        loan.remaining_collateral,
        loan.principal,
        loan.debt_decimals,
        price,
        config.target_ratio_bps,
        config.liquidation_bonus_bps,
    )?;
    require!(
        repay_amount <= loan.principal,
        LendingError::LiquidationExceedsPrincipal
    );
    require!(repay_amount <= max_repay, LendingError::ExceedsMaxRepay);

    let reward = liquidation_reward(
        repay_amount,
        loan.debt_decimals,
        price,
        config.liquidation_bonus_bps,
    )?;
    require!(
        reward <= loan.remaining_collateral,
        LendingError::RewardExceedsCollateral
    );

    // ===== EFFECTS =====
    let loan = &mut ctx.accounts.loan;
    settle(loan, now, config.penalty_ratio_bps)?;

    loan.principal = checked_sub(loan.principal, repay_amount)?;
    loan.remaining_collateral = checked_sub(loan.remaining_collateral, reward)?;

    // Keep the registry record consistent for the accounting controller
    ctx.accounts.receipt.reduce_locked(loan.remaining_collateral)?;
    emit!(events::CollateralReduced {
        collateral_id,
        controller: ctx.accounts.receipt.controller,
        new_remaining_amount: loan.remaining_collateral,
    });

    if loan.principal == 0 {
        loan.active = false;
        ctx.accounts.receipt.release_to(loan.borrower)?;
        emit!(events::LoanClosed {
            collateral_id,
            borrower: loan.borrower,
        });
    }

    // ===== INTERACTIONS =====
    // Liquidator funds the vault with the repaid debt
    let repay_u64 = safe_u128_to_u64(repay_amount)?;
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.liquidator_debt_account.to_account_info(),
                to: ctx.accounts.debt_vault.to_account_info(),
                authority: ctx.accounts.liquidator.to_account_info(),
                mint: ctx.accounts.debt_mint.to_account_info(),
            },
        ),
        repay_u64,
        ctx.accounts.debt_mint.decimals,
    )?;

    // Vault pays the stable-unit reward
    let reward_u64 = safe_u128_to_u64(reward)?;
    let bump = ctx.accounts.config.bump;
    let seeds = &[PROGRAM_SEED_PREFIX, LendingConfig::SEED, &[bump]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.stable_vault.to_account_info(),
                to: ctx.accounts.liquidator_stable_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
                mint: ctx.accounts.stable_mint.to_account_info(),
            },
            &[seeds],
        ),
        reward_u64,
        ctx.accounts.stable_mint.decimals,
    )?;

    emit!(events::Liquidated {
        collateral_id,
        liquidator: ctx.accounts.liquidator.key(),
        borrower: ctx.accounts.loan.borrower,
        repaid_amount: repay_amount,
        reward_stable: reward,
        remaining_principal: ctx.accounts.loan.principal,
        remaining_collateral: ctx.accounts.loan.remaining_collateral,
    });

    Ok(())
}

// ============================================================================
// Seize Overdue Collateral
// ============================================================================

#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct SeizeOverdue<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Loan::SEED, &collateral_id.to_le_bytes()],
        bump = loan.bump,
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [
            PROGRAM_SEED_PREFIX,
            CollateralReceipt::SEED,
            &collateral_id.to_le_bytes(),
        ],
        bump = receipt.bump,
    )]
    pub receipt: Account<'info, CollateralReceipt>,
}

pub fn seize_overdue(ctx: Context<SeizeOverdue>, collateral_id: u64) -> Result<()> {
    require!(ctx.accounts.loan.active, LendingError::LoanNotActive);

    let now = Clock::get()?.unix_timestamp;
    let config = &ctx.accounts.config;
    let loan = &mut ctx.accounts.loan;

    require!(
        loan.seizable(now, config.loan_grace_period),
        LendingError::LoanNotPastGracePeriod
    );

    // Blunt fallback: bypasses the liquidation formula entirely
    let borrower = loan.borrower;
    loan.active = false;
    ctx.accounts.receipt.release_to(ctx.accounts.admin.key())?;

    emit!(events::OverdueCollateralSeized {
        collateral_id,
        admin: ctx.accounts.admin.key(),
        borrower,
    });

    Ok(())
}
