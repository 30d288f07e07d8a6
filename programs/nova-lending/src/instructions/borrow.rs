//! Borrow and repay instructions
//!
//! CEI Pattern: Checks → Effects → Interactions

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events;
use crate::interfaces::PriceFeed;
use crate::math::{max_borrowable, safe_u128_to_u64, settle};
use crate::state::{CollateralReceipt, DebtAssetConfig, LendingConfig, Loan};

// ============================================================================
// Borrow
// ============================================================================

#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct Borrow<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

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
        seeds = [
            PROGRAM_SEED_PREFIX,
            CollateralReceipt::SEED,
            &collateral_id.to_le_bytes(),
        ],
        bump = receipt.bump,
    )]
    pub receipt: Box<Account<'info, CollateralReceipt>>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = Loan::space(),
        seeds = [PROGRAM_SEED_PREFIX, Loan::SEED, &collateral_id.to_le_bytes()],
        bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

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
        constraint = borrower_token_account.mint == debt_mint.key(),
    )]
    pub borrower_token_account: InterfaceAccount<'info, TokenAccount>,

    pub debt_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn borrow(
    ctx: Context<Borrow>,
    collateral_id: u64,
    amount: u128,
    duration: i64,
) -> Result<()> {
    // ===== CHECKS =====
    require!(!ctx.accounts.config.paused, LendingError::ProtocolPaused);
    require!(amount > 0, LendingError::ZeroAmount);
    require!(ctx.accounts.debt_asset.enabled, LendingError::AssetNotEnabled);
    require!(
        ctx.accounts.receipt.owner == ctx.accounts.borrower.key(),
        LendingError::NotReceiptOwner
    );
    require!(ctx.accounts.receipt.active, LendingError::ReceiptInactive);
    require!(!ctx.accounts.loan.active, LendingError::LoanAlreadyActive);

    let config = &ctx.accounts.config;
    let rate_bps = config
        .rate_for_duration(duration)
        .ok_or(LendingError::RateTierNotFound)?;

    let now = Clock::get()?.unix_timestamp;
    let price = ctx.accounts.price_feed.validated_price(now)?;

    let ceiling = max_borrowable(
        ctx.accounts.receipt.amount,
        price,
        config.liquidation_ratio_bps,
        ctx.accounts.debt_asset.decimals,
    )?;
    require!(amount <= ceiling, LendingError::ExceedsBorrowCeiling);

    // ===== EFFECTS =====
    ctx.accounts.receipt.transfer_to_custody()?;

    let loan = &mut ctx.accounts.loan;
    loan.bump = ctx.bumps.loan;
    loan.collateral_id = collateral_id;
    loan.active = true;
    loan.borrower = ctx.accounts.borrower.key();
    loan.debt_mint = ctx.accounts.debt_mint.key();
    loan.debt_decimals = ctx.accounts.debt_asset.decimals;
    loan.principal = amount;
    loan.remaining_collateral = ctx.accounts.receipt.amount;
    loan.start_time = now;
    loan.duration = duration;
    loan.end_time = now + duration;
    loan.rate_bps = rate_bps;
    loan.last_interest_accrual = now;
    loan.accrued_interest = 0;
    loan.last_penalty_accrual = 0;
    loan.accrued_penalty = 0;

    // ===== INTERACTIONS =====
    let amount_u64 = safe_u128_to_u64(amount)?;
    let bump = ctx.accounts.config.bump;
    let seeds = &[PROGRAM_SEED_PREFIX, LendingConfig::SEED, &[bump]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.debt_vault.to_account_info(),
                to: ctx.accounts.borrower_token_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
                mint: ctx.accounts.debt_mint.to_account_info(),
            },
            &[seeds],
        ),
        amount_u64,
        ctx.accounts.debt_mint.decimals,
    )?;

    emit!(events::Borrowed {
        collateral_id,
        borrower: ctx.accounts.borrower.key(),
        debt_mint: ctx.accounts.debt_mint.key(),
        amount,
        duration,
        rate_bps,
        end_time: now + duration,
    });

    Ok(())
}

// ============================================================================
// Repay
// ============================================================================

#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct Repay<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

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
        mut,
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::VAULT_SEED, debt_mint.key().as_ref()],
        bump = debt_asset.vault_bump,
    )]
    pub debt_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = payer_token_account.mint == debt_mint.key(),
    )]
    pub payer_token_account: InterfaceAccount<'info, TokenAccount>,

    pub debt_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn repay(ctx: Context<Repay>, collateral_id: u64, amount: u128) -> Result<()> {
    // ===== CHECKS =====
    // Repay stays available while paused so borrowers can always exit.
    require!(ctx.accounts.loan.active, LendingError::LoanNotActive);
    require!(amount > 0, LendingError::ZeroAmount);

    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    let loan = &mut ctx.accounts.loan;
    settle(loan, now, config.penalty_ratio_bps)?;

    require!(
        loan.repay_open(now, config.loan_grace_period),
        LendingError::LoanPastGracePeriod
    );

    // ===== EFFECTS =====
    let split = loan.apply_payment(amount)?;
    let paid = split.total();

    if !loan.active {
        ctx.accounts.receipt.release_to(loan.borrower)?;
        emit!(events::LoanClosed {
            collateral_id,
            borrower: loan.borrower,
        });
    }

    // ===== INTERACTIONS =====
    let paid_u64 = safe_u128_to_u64(paid)?;
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.payer_token_account.to_account_info(),
                to: ctx.accounts.debt_vault.to_account_info(),
                authority: ctx.accounts.payer.to_account_info(),
                mint: ctx.accounts.debt_mint.to_account_info(),
            },
        ),
        paid_u64,
        ctx.accounts.debt_mint.decimals,
    )?;

    emit!(events::Repaid {
        collateral_id,
        payer: ctx.accounts.payer.key(),
        penalty_paid: split.penalty_paid,
        interest_paid: split.interest_paid,
        principal_paid: split.principal_paid,
        remaining_principal: ctx.accounts.loan.principal,
    });

    Ok(())
}
