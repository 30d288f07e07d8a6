//! Nova collateralized lending program
//!
//! Users lock a yield-bearing position, represented by a non-fungible
//! collateral receipt, and borrow a whitelisted debt asset against it in
//! the protocol's 6-decimal stable unit of account (nUSD).
//!
//! ## Features
//! - Loan-to-value ceiling from a staleness-checked price feed
//! - Duration-keyed fixed interest rates, lazily settled on every touch
//! - Per-day overdue penalties after a hard delay past the due date
//! - Waterfall repayment: penalty, then interest, then principal
//! - Closed-form partial liquidation restoring a target collateral ratio
//!   with a fixed liquidator bonus
//! - Admin seizure of loans overdue past the grace period
//! - Two-step admin handover and pause control

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod state;
pub mod interfaces;
pub mod instructions;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod nova_lending {
    use super::*;

    // =========================================================================
    // Admin Instructions
    // =========================================================================

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
        instructions::admin::initialize(
            ctx,
            admin,
            registry_authority,
            liquidation_ratio_bps,
            target_ratio_bps,
            liquidation_bonus_bps,
            penalty_ratio_bps,
            loan_grace_period,
        )
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::admin::accept_admin(ctx)
    }

    pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        instructions::admin::set_paused(ctx, paused)
    }

    pub fn set_collateral_ratios(
        ctx: Context<UpdateConfig>,
        liquidation_ratio_bps: u64,
        target_ratio_bps: u64,
    ) -> Result<()> {
        instructions::admin::set_collateral_ratios(ctx, liquidation_ratio_bps, target_ratio_bps)
    }

    pub fn set_liquidation_bonus(ctx: Context<UpdateConfig>, bonus_bps: u64) -> Result<()> {
        instructions::admin::set_liquidation_bonus(ctx, bonus_bps)
    }

    pub fn set_penalty_ratio(ctx: Context<UpdateConfig>, penalty_ratio_bps: u64) -> Result<()> {
        instructions::admin::set_penalty_ratio(ctx, penalty_ratio_bps)
    }

    pub fn set_grace_period(ctx: Context<UpdateConfig>, grace_period: i64) -> Result<()> {
        instructions::admin::set_grace_period(ctx, grace_period)
    }

    pub fn set_rate_tier(
        ctx: Context<UpdateConfig>,
        duration: i64,
        rate_bps: u64,
    ) -> Result<()> {
        instructions::admin::set_rate_tier(ctx, duration, rate_bps)
    }

    pub fn enable_debt_asset(ctx: Context<EnableDebtAsset>) -> Result<()> {
        instructions::admin::enable_debt_asset(ctx)
    }

    pub fn set_debt_asset_status(ctx: Context<SetDebtAssetStatus>, enabled: bool) -> Result<()> {
        instructions::admin::set_debt_asset_status(ctx, enabled)
    }

    // =========================================================================
    // Oracle Instructions
    // =========================================================================

    pub fn init_price_feed(ctx: Context<InitPriceFeed>, authority: Pubkey) -> Result<()> {
        instructions::oracle::init_price_feed(ctx, authority)
    }

    pub fn post_price(ctx: Context<PostPrice>, price: u128) -> Result<()> {
        instructions::oracle::post_price(ctx, price)
    }

    // =========================================================================
    // Registry Instructions
    // =========================================================================

    pub fn register_collateral(
        ctx: Context<RegisterCollateral>,
        collateral_id: u64,
        owner: Pubkey,
        amount: u128,
        controller: Pubkey,
    ) -> Result<()> {
        instructions::registry::register_collateral(ctx, collateral_id, owner, amount, controller)
    }

    // =========================================================================
    // Borrow Instructions
    // =========================================================================

    pub fn borrow(
        ctx: Context<Borrow>,
        collateral_id: u64,
        amount: u128,
        duration: i64,
    ) -> Result<()> {
        instructions::borrow::borrow(ctx, collateral_id, amount, duration)
    }

    pub fn repay(ctx: Context<Repay>, collateral_id: u64, amount: u128) -> Result<()> {
        instructions::borrow::repay(ctx, collateral_id, amount)
    }

    // =========================================================================
    // Liquidation Instructions
    // =========================================================================

    pub fn liquidate(
        ctx: Context<Liquidate>,
        collateral_id: u64,
        max_repay: u128,
    ) -> Result<()> {
        instructions::liquidate::liquidate(ctx, collateral_id, max_repay)
    }

    pub fn seize_overdue(ctx: Context<SeizeOverdue>, collateral_id: u64) -> Result<()> {
        instructions::liquidate::seize_overdue(ctx, collateral_id)
    }

    // =========================================================================
    // Utility Instructions
    // =========================================================================

    pub fn settle_accrual(ctx: Context<SettleAccrual>, collateral_id: u64) -> Result<()> {
        instructions::utils::settle_accrual(ctx, collateral_id)
    }
}
