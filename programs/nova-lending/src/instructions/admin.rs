//! Admin instructions for protocol management
//!
//! - Initialize the lending configuration and stable vault
//! - Two-step admin handover
//! - Pause control
//! - Ratio, bonus, penalty, grace-period and rate-table setters
//! - Debt asset enablement

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{MAX_DEBT_DECIMALS, MAX_RATE_TIERS, PROGRAM_SEED_PREFIX, STABLE_DECIMALS};
use crate::errors::LendingError;
use crate::events::*;
use crate::state::{DebtAssetConfig, LendingConfig, RateTier};

// ============================================================================
// Initialize
// ============================================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = LendingConfig::space(),
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump,
    )]
    pub config: Box<Account<'info, LendingConfig>>,

    pub stable_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        token::mint = stable_mint,
        token::authority = config,
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::STABLE_VAULT_SEED],
        bump,
    )]
    pub stable_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn initialize(
    ctx: Context<Initialize>,
    admin: Pubkey,
    registry_authority: Pubkey,
    liquidation_ratio_bps: u64,
    target_ratio_bps: u64,
    liquidation_bonus_bps: u64,
    penalty_ratio_bps: u64,
    loan_grace_period: i64,
) -> Result<()> {
    require!(
        ctx.accounts.stable_mint.decimals == STABLE_DECIMALS,
        LendingError::InvalidStableMint
    );
    LendingConfig::validate_ratios(liquidation_ratio_bps, target_ratio_bps)?;

    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.admin = admin;
    config.pending_admin = Pubkey::default();
    config.registry_authority = registry_authority;
    config.stable_mint = ctx.accounts.stable_mint.key();
    config.stable_vault_bump = ctx.bumps.stable_vault;
    config.paused = false;
    config.liquidation_ratio_bps = liquidation_ratio_bps;
    config.target_ratio_bps = target_ratio_bps;
    config.liquidation_bonus_bps = liquidation_bonus_bps;
    config.penalty_ratio_bps = penalty_ratio_bps;
    config.loan_grace_period = loan_grace_period;
    config.tier_count = 0;
    config.rate_tiers = [RateTier::default(); MAX_RATE_TIERS];

    emit!(LendingInitialized {
        admin,
        registry_authority,
        stable_mint: config.stable_mint,
    });
    Ok(())
}

// ============================================================================
// Admin Handover (Two-Step)
// ============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    ctx.accounts.config.pending_admin = new_admin;

    emit!(AdminTransferStarted {
        current_admin: ctx.accounts.admin.key(),
        pending_admin: new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    pub pending_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.pending_admin == pending_admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,
}

pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let previous_admin = config.admin;

    config.admin = config.pending_admin;
    config.pending_admin = Pubkey::default();

    emit!(AdminTransferred {
        previous_admin,
        new_admin: config.admin,
    });
    Ok(())
}

// ============================================================================
// Configuration Setters
// ============================================================================

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,
}

pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    ctx.accounts.config.paused = paused;
    emit!(PausedSet { paused });
    Ok(())
}

pub fn set_collateral_ratios(
    ctx: Context<UpdateConfig>,
    liquidation_ratio_bps: u64,
    target_ratio_bps: u64,
) -> Result<()> {
    LendingConfig::validate_ratios(liquidation_ratio_bps, target_ratio_bps)?;

    let config = &mut ctx.accounts.config;
    config.liquidation_ratio_bps = liquidation_ratio_bps;
    config.target_ratio_bps = target_ratio_bps;

    emit!(CollateralRatiosSet {
        liquidation_ratio_bps,
        target_ratio_bps,
    });
    Ok(())
}

pub fn set_liquidation_bonus(ctx: Context<UpdateConfig>, bonus_bps: u64) -> Result<()> {
    ctx.accounts.config.liquidation_bonus_bps = bonus_bps;
    emit!(LiquidationBonusSet { bonus_bps });
    Ok(())
}

pub fn set_penalty_ratio(ctx: Context<UpdateConfig>, penalty_ratio_bps: u64) -> Result<()> {
    ctx.accounts.config.penalty_ratio_bps = penalty_ratio_bps;
    emit!(PenaltyRatioSet { penalty_ratio_bps });
    Ok(())
}

pub fn set_grace_period(ctx: Context<UpdateConfig>, grace_period: i64) -> Result<()> {
    ctx.accounts.config.loan_grace_period = grace_period;
    emit!(GracePeriodSet { grace_period });
    Ok(())
}

pub fn set_rate_tier(ctx: Context<UpdateConfig>, duration: i64, rate_bps: u64) -> Result<()> {
    ctx.accounts.config.set_rate_tier(duration, rate_bps)?;
    emit!(RateTierSet { duration, rate_bps });
    Ok(())
}

// ============================================================================
// Debt Asset Enablement
// ============================================================================

#[derive(Accounts)]
pub struct EnableDebtAsset<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Box<Account<'info, LendingConfig>>,

    #[account(
        init,
        payer = admin,
        space = DebtAssetConfig::space(),
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::SEED, mint.key().as_ref()],
        bump,
    )]
    pub debt_asset: Box<Account<'info, DebtAssetConfig>>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = config,
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::VAULT_SEED, mint.key().as_ref()],
        bump,
    )]
    pub debt_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn enable_debt_asset(ctx: Context<EnableDebtAsset>) -> Result<()> {
    require!(
        ctx.accounts.mint.decimals <= MAX_DEBT_DECIMALS,
        LendingError::UnsupportedDecimals
    );

    let asset = &mut ctx.accounts.debt_asset;
    asset.bump = ctx.bumps.debt_asset;
    asset.mint = ctx.accounts.mint.key();
    asset.decimals = ctx.accounts.mint.decimals;
    asset.enabled = true;
    asset.vault_bump = ctx.bumps.debt_vault;

    emit!(DebtAssetEnabled {
        mint: asset.mint,
        decimals: asset.decimals,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetDebtAssetStatus<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, DebtAssetConfig::SEED, debt_asset.mint.as_ref()],
        bump = debt_asset.bump,
    )]
    pub debt_asset: Account<'info, DebtAssetConfig>,
}

pub fn set_debt_asset_status(ctx: Context<SetDebtAssetStatus>, enabled: bool) -> Result<()> {
    ctx.accounts.debt_asset.enabled = enabled;

    emit!(DebtAssetStatusSet {
        mint: ctx.accounts.debt_asset.mint,
        enabled,
    });
    Ok(())
}
